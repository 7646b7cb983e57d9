extern crate tempdir;

use chrono::DateTime;
use tempdir::TempDir;
use test_utils::transcript_fixture;

use super::render;
use super::ExportFormat;
use super::Exports;
use crate::domain::models::Author;
use crate::domain::models::Message;

fn transcript() -> Vec<Message> {
    return transcript_fixture()
        .iter()
        .map(|(role, content, timestamp)| {
            let author = if *role == "user" {
                Author::User
            } else {
                Author::Assistant
            };
            return Message::new_at(
                author,
                content,
                DateTime::parse_from_rfc3339(timestamp).unwrap(),
            );
        })
        .collect();
}

fn exported_at() -> chrono::DateTime<chrono::FixedOffset> {
    return DateTime::parse_from_rfc3339("2023-11-14T23:00:00+00:00").unwrap();
}

#[test]
fn it_parses_formats() {
    assert_eq!(ExportFormat::parse("txt".to_string()), Some(ExportFormat::Txt));
    assert_eq!(ExportFormat::parse("json".to_string()), Some(ExportFormat::Json));
    assert_eq!(ExportFormat::parse("csv".to_string()), Some(ExportFormat::Csv));
    assert_eq!(ExportFormat::parse("html".to_string()), Some(ExportFormat::Html));
    assert_eq!(ExportFormat::parse("pdf".to_string()), None);
}

#[test]
fn it_renders_txt() {
    let content = render(ExportFormat::Txt, &transcript(), exported_at()).unwrap();

    insta::assert_snapshot!(content, @r###"
    [2023-11-14 22:13:20] You: What does the demo do?

    [2023-11-14 22:13:25] Tryit: It echoes canned responses until you wire up a real backend.

    [2023-11-14 22:14:02] You: Can I export this chat, with "quotes" and
    newlines?

    [2023-11-14 22:14:06] Tryit: Yes. TXT, JSON, CSV, and HTML are supported.
    "###);
}

#[test]
fn it_renders_json() {
    let content = render(ExportFormat::Json, &transcript(), exported_at()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(doc["exportDate"], "2023-11-14T23:00:00Z");
    assert_eq!(doc["totalMessages"], 4);
    assert_eq!(doc["messages"][0]["role"], "user");
    assert_eq!(doc["messages"][0]["content"], "What does the demo do?");
    assert_eq!(doc["messages"][0]["timestamp"], "2023-11-14T22:13:20Z");
    assert_eq!(doc["messages"][1]["role"], "assistant");
}

#[test]
fn it_renders_csv_with_escaped_quotes() {
    let content = render(ExportFormat::Csv, &transcript(), exported_at()).unwrap();
    let lines = content.split('\n').collect::<Vec<&str>>();

    assert_eq!(lines[0], "Timestamp,Role,Content");
    assert_eq!(
        lines[1],
        "2023-11-14 22:13:20,user,\"What does the demo do?\""
    );
    // The third message holds a quote and a newline; the quote doubles and
    // the newline stays inside the quoted cell.
    assert_eq!(
        lines[3],
        "2023-11-14 22:14:02,user,\"Can I export this chat, with \"\"quotes\"\" and"
    );
    assert_eq!(lines[4], "newlines?\"");
}

#[test]
fn it_renders_html() {
    let content = render(ExportFormat::Html, &transcript(), exported_at()).unwrap();

    assert!(content.starts_with("<!DOCTYPE html>"));
    assert!(content.contains("<title>Chat Export - 2023-11-14</title>"));
    assert!(content.contains("<strong>Total Messages:</strong> 4<br>"));
    assert!(content.contains("<strong>User Messages:</strong> 2<br>"));
    assert!(content.contains("<strong>Assistant Messages:</strong> 2"));
    assert!(content.contains(r#"<div class="message user">"#));
    assert!(content.contains(r#"<div class="message assistant">"#));
    // Newlines in message bodies become line breaks.
    assert!(content.contains("and<br>newlines?"));
}

#[test]
fn it_exports_to_disk() {
    let tmp_dir = TempDir::new("exports").unwrap();
    let exports = Exports::new(tmp_dir.path().join("nested"));

    let file_path = exports.export(ExportFormat::Txt, &transcript()).unwrap();

    assert!(file_path.exists());
    let name = file_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("chat-export-"));
    assert!(name.ends_with(".txt"));

    let written = std::fs::read_to_string(file_path).unwrap();
    assert!(written.contains("What does the demo do?"));
}

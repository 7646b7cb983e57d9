#[cfg(test)]
#[path = "exports_test.rs"]
mod tests;

use std::env;
use std::fs;
use std::path;

use anyhow::Result;
use chrono::DateTime;
use chrono::FixedOffset;
use chrono::Local;
use chrono::SecondsFormat;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use crate::domain::models::Author;
use crate::domain::models::Message;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Txt,
    Json,
    Csv,
    Html,
}

impl ExportFormat {
    pub fn parse(text: String) -> Option<ExportFormat> {
        return ExportFormat::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Serialize)]
struct ExportedMessage {
    role: String,
    content: String,
    timestamp: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument {
    export_date: String,
    total_messages: usize,
    messages: Vec<ExportedMessage>,
}

const HTML_STYLE: &str = r#"        body {
            font-family: monospace;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            background-color: #f8fafc;
            color: #1e293b;
        }
        .message {
            margin-bottom: 20px;
            padding: 15px;
            border-radius: 10px;
        }
        .user {
            background: #3b82f6;
            color: white;
            margin-left: 50px;
        }
        .assistant {
            background: white;
            color: #1e293b;
            margin-right: 50px;
        }
        .timestamp {
            font-size: 0.8em;
            opacity: 0.7;
        }
        .role {
            font-weight: bold;
        }
        .content {
            line-height: 1.5;
            white-space: pre-wrap;
        }"#;

fn role_label(author: Author) -> &'static str {
    match author {
        Author::User => return "You",
        Author::Assistant => return "Tryit",
    }
}

fn human_time(timestamp: &DateTime<FixedOffset>) -> String {
    return timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
}

/// Renders a transcript into the requested format. Pure over its inputs;
/// file placement is handled separately by [`Exports`].
pub fn render(
    format: ExportFormat,
    messages: &[Message],
    exported_at: DateTime<FixedOffset>,
) -> Result<String> {
    match format {
        ExportFormat::Txt => return Ok(render_txt(messages)),
        ExportFormat::Json => return render_json(messages, exported_at),
        ExportFormat::Csv => return Ok(render_csv(messages)),
        ExportFormat::Html => return Ok(render_html(messages, exported_at)),
    }
}

fn render_txt(messages: &[Message]) -> String {
    return messages
        .iter()
        .map(|msg| {
            return format!(
                "[{timestamp}] {role}: {content}",
                timestamp = human_time(&msg.timestamp),
                role = role_label(msg.author),
                content = msg.text
            );
        })
        .collect::<Vec<String>>()
        .join("\n\n");
}

fn render_json(messages: &[Message], exported_at: DateTime<FixedOffset>) -> Result<String> {
    let doc = ExportDocument {
        export_date: exported_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        total_messages: messages.len(),
        messages: messages
            .iter()
            .map(|msg| {
                return ExportedMessage {
                    role: msg.author.role().to_string(),
                    content: msg.text.clone(),
                    timestamp: msg.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
                };
            })
            .collect(),
    };

    return Ok(serde_json::to_string_pretty(&doc)?);
}

fn render_csv(messages: &[Message]) -> String {
    let mut lines = vec!["Timestamp,Role,Content".to_string()];
    for msg in messages {
        lines.push(format!(
            "{timestamp},{role},\"{content}\"",
            timestamp = human_time(&msg.timestamp),
            role = msg.author.role(),
            content = msg.text.replace('"', "\"\"")
        ));
    }

    return lines.join("\n");
}

fn render_html(messages: &[Message], exported_at: DateTime<FixedOffset>) -> String {
    let user_count = messages
        .iter()
        .filter(|msg| return msg.author == Author::User)
        .count();

    let bubbles = messages
        .iter()
        .map(|msg| {
            return format!(
                r#"    <div class="message {role}">
        <div class="timestamp">{timestamp}</div>
        <div class="role">{label}</div>
        <div class="content">{content}</div>
    </div>"#,
                role = msg.author.role(),
                timestamp = human_time(&msg.timestamp),
                label = role_label(msg.author),
                content = msg.text.replace('\n', "<br>")
            );
        })
        .collect::<Vec<String>>()
        .join("\n");

    return format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Chat Export - {date}</title>
    <style>
{style}
    </style>
</head>
<body>
    <div class="header">
        <h1>Tryit Chat Export</h1>
        <p>Exported on {exported_at}</p>
    </div>
    <div class="stats">
        <strong>Total Messages:</strong> {total}<br>
        <strong>User Messages:</strong> {user_count}<br>
        <strong>Assistant Messages:</strong> {assistant_count}
    </div>
{bubbles}
</body>
</html>"#,
        date = exported_at.format("%Y-%m-%d"),
        style = HTML_STYLE,
        exported_at = human_time(&exported_at),
        total = messages.len(),
        user_count = user_count,
        assistant_count = messages.len() - user_count,
    );
}

pub struct Exports {
    pub out_dir: path::PathBuf,
}

impl Default for Exports {
    fn default() -> Exports {
        let out_dir = env::current_dir().unwrap_or_else(|_| return path::PathBuf::from("."));
        return Exports::new(out_dir);
    }
}

impl Exports {
    pub fn new(out_dir: path::PathBuf) -> Exports {
        return Exports { out_dir };
    }

    /// Renders in memory first, then writes `chat-export-YYYY-MM-DD.<ext>`
    /// into the output directory. No partial-file cleanup is needed since
    /// nothing touches disk until rendering succeeded.
    pub fn export(&self, format: ExportFormat, messages: &[Message]) -> Result<path::PathBuf> {
        let exported_at = Local::now().fixed_offset();
        let content = render(format, messages, exported_at)?;

        if !self.out_dir.exists() {
            fs::create_dir_all(&self.out_dir)?;
        }

        let file_path = self.out_dir.join(format!(
            "chat-export-{date}.{ext}",
            date = exported_at.format("%Y-%m-%d"),
            ext = format
        ));
        fs::write(&file_path, content)?;

        return Ok(file_path);
    }
}

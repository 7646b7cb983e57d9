use std::sync::Arc;

use super::HistoryBuffer;
use super::HistoryDirection;
use super::CHAT_SURFACE;
use crate::domain::models::KeyValueStore;
use crate::domain::models::LEGACY_CHAT_HISTORY_KEY;
use crate::infrastructure::stores::MemoryStore;

fn buffer() -> HistoryBuffer {
    return HistoryBuffer::new(Arc::new(MemoryStore::default()));
}

#[test]
fn it_records_most_recent_first() {
    let mut history = buffer();
    history.record(CHAT_SURFACE, "first");
    history.record(CHAT_SURFACE, "second");

    assert_eq!(
        history.entries(CHAT_SURFACE),
        vec!["second".to_string(), "first".to_string()]
    );
}

#[test]
fn it_skips_empty_messages() {
    let mut history = buffer();
    history.record(CHAT_SURFACE, "   ");
    assert!(history.entries(CHAT_SURFACE).is_empty());
}

#[test]
fn it_deduplicates_resubmitted_messages() {
    let mut history = buffer();
    history.record(CHAT_SURFACE, "hi");
    history.record(CHAT_SURFACE, " hi ");

    assert_eq!(history.entries(CHAT_SURFACE), vec!["hi".to_string()]);
}

#[test]
fn it_evicts_oldest_beyond_the_cap() {
    let mut history = buffer();
    for idx in 1..=11 {
        history.record(CHAT_SURFACE, &format!("message {idx}"));
    }

    let entries = history.entries(CHAT_SURFACE);
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0], "message 11");
    assert_eq!(entries[9], "message 2");
}

#[test]
fn it_keeps_surfaces_independent() {
    let mut history = buffer();
    history.record("chat", "one");
    history.record("newChat", "two");

    assert_eq!(history.entries("chat"), vec!["one".to_string()]);
    assert_eq!(history.entries("newChat"), vec!["two".to_string()]);
}

#[test]
fn it_navigates_with_an_empty_buffer() {
    let mut history = buffer();
    assert_eq!(history.navigate(CHAT_SURFACE, HistoryDirection::Older), "");
    assert_eq!(history.navigate(CHAT_SURFACE, HistoryDirection::Newer), "");
}

#[test]
fn it_navigates_older_and_clamps_at_the_oldest_entry() {
    let mut history = buffer();
    history.record(CHAT_SURFACE, "first");
    history.record(CHAT_SURFACE, "second");

    assert_eq!(
        history.navigate(CHAT_SURFACE, HistoryDirection::Older),
        "second"
    );
    assert_eq!(
        history.navigate(CHAT_SURFACE, HistoryDirection::Older),
        "first"
    );
    assert_eq!(
        history.navigate(CHAT_SURFACE, HistoryDirection::Older),
        "first"
    );
}

#[test]
fn it_round_trips_back_to_the_draft() {
    let mut history = buffer();
    for idx in 1..=3 {
        history.record(CHAT_SURFACE, &format!("message {idx}"));
    }

    history.stash_draft(CHAT_SURFACE, "work in progress");
    for _ in 0..3 {
        history.navigate(CHAT_SURFACE, HistoryDirection::Older);
    }
    assert_eq!(
        history.navigate(CHAT_SURFACE, HistoryDirection::Newer),
        "message 2"
    );
    assert_eq!(
        history.navigate(CHAT_SURFACE, HistoryDirection::Newer),
        "message 3"
    );
    assert_eq!(
        history.navigate(CHAT_SURFACE, HistoryDirection::Newer),
        "work in progress"
    );

    // Already at the draft position, nothing further to do.
    assert_eq!(history.navigate(CHAT_SURFACE, HistoryDirection::Newer), "");
}

#[test]
fn it_resets_the_cursor_on_record() {
    let mut history = buffer();
    history.record(CHAT_SURFACE, "first");
    history.record(CHAT_SURFACE, "second");
    history.navigate(CHAT_SURFACE, HistoryDirection::Older);

    history.record(CHAT_SURFACE, "third");
    assert_eq!(
        history.navigate(CHAT_SURFACE, HistoryDirection::Older),
        "third"
    );
}

#[test]
fn it_resets_the_cursor_when_recording_a_duplicate() {
    let mut history = buffer();
    history.record(CHAT_SURFACE, "first");
    history.record(CHAT_SURFACE, "second");
    history.navigate(CHAT_SURFACE, HistoryDirection::Older);
    history.navigate(CHAT_SURFACE, HistoryDirection::Older);

    // Resending an existing entry leaves the list alone but still counts
    // as a send, so navigation starts over from the newest entry.
    history.record(CHAT_SURFACE, "first");

    assert_eq!(
        history.entries(CHAT_SURFACE),
        vec!["second".to_string(), "first".to_string()]
    );
    assert_eq!(
        history.navigate(CHAT_SURFACE, HistoryDirection::Older),
        "second"
    );
}

#[test]
fn it_clears_a_surface() {
    let store = Arc::new(MemoryStore::default());
    let mut history = HistoryBuffer::new(store.clone());
    history.record(CHAT_SURFACE, "hi");
    history.clear(CHAT_SURFACE);

    assert!(history.entries(CHAT_SURFACE).is_empty());
    assert!(store.get("chatInputHistory").is_none());
}

#[test]
fn it_persists_across_instances() {
    let store = Arc::new(MemoryStore::default());
    let mut history = HistoryBuffer::new(store.clone());
    history.record(CHAT_SURFACE, "hi");

    let mut rehydrated = HistoryBuffer::new(store);
    assert_eq!(rehydrated.entries(CHAT_SURFACE), vec!["hi".to_string()]);
}

#[test]
fn it_migrates_the_legacy_chat_history_blob() {
    let store = Arc::new(MemoryStore::default());
    store.set(
        LEGACY_CHAT_HISTORY_KEY,
        r#"{"messages": ["one", "two", "one"], "currentIndex": 1}"#,
    );

    let mut history = HistoryBuffer::new(store.clone());
    history.migrate_legacy();

    assert_eq!(
        history.entries(CHAT_SURFACE),
        vec!["two".to_string(), "one".to_string()]
    );
    assert!(store.get(LEGACY_CHAT_HISTORY_KEY).is_none());
}

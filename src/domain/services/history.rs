#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

use std::collections::HashMap;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::domain::models::StoreArc;
use crate::domain::models::LEGACY_CHAT_HISTORY_KEY;

pub const HISTORY_LIMIT: usize = 10;

/// The surface used by the main chat loop. Other chat surfaces get their
/// own independent buffers under their own ids.
pub const CHAT_SURFACE: &str = "chat";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryDirection {
    Older,
    Newer,
}

// Pre-unification persisted shape from the alternate chat implementation.
#[derive(Serialize, Deserialize)]
struct LegacyChatHistory {
    messages: Vec<String>,
    #[serde(rename = "currentIndex")]
    current_index: i64,
}

struct SurfaceState {
    entries: Vec<String>,
    cursor: isize,
    draft: String,
}

impl Default for SurfaceState {
    fn default() -> SurfaceState {
        return SurfaceState {
            entries: vec![],
            cursor: -1,
            draft: "".to_string(),
        };
    }
}

/// A bounded, deduplicated input-history buffer, most-recent-first, keyed
/// by chat surface. Cursor -1 means "not navigating, show the live draft".
pub struct HistoryBuffer {
    store: StoreArc,
    surfaces: HashMap<String, SurfaceState>,
}

impl HistoryBuffer {
    pub fn new(store: StoreArc) -> HistoryBuffer {
        return HistoryBuffer {
            store,
            surfaces: HashMap::new(),
        };
    }

    fn storage_key(surface: &str) -> String {
        return format!("{surface}InputHistory");
    }

    fn surface_mut(&mut self, surface: &str) -> &mut SurfaceState {
        if !self.surfaces.contains_key(surface) {
            let entries = self
                .store
                .get(&HistoryBuffer::storage_key(surface))
                .and_then(|raw| return serde_json::from_str::<Vec<String>>(&raw).ok())
                .unwrap_or_default();

            self.surfaces.insert(
                surface.to_string(),
                SurfaceState {
                    entries,
                    ..SurfaceState::default()
                },
            );
        }

        return self.surfaces.get_mut(surface).unwrap();
    }

    fn persist(&self, surface: &str, entries: &[String]) {
        match serde_json::to_string(entries) {
            Ok(raw) => self.store.set(&HistoryBuffer::storage_key(surface), &raw),
            Err(err) => tracing::warn!(err = ?err, "Failed to serialize input history"),
        }
    }

    /// Called on every successful send. The entry list is untouched for
    /// empty or duplicate messages, but the cursor always drops back to the
    /// live-draft position.
    pub fn record(&mut self, surface: &str, message: &str) {
        let trimmed = message.trim().to_string();
        if trimmed.is_empty() {
            return;
        }

        let state = self.surface_mut(surface);
        state.cursor = -1;
        state.draft = "".to_string();

        if state.entries.contains(&trimmed) {
            return;
        }

        state.entries.insert(0, trimmed);
        state.entries.truncate(HISTORY_LIMIT);

        let entries = state.entries.clone();
        self.persist(surface, &entries);
    }

    /// Captures the text the user was composing before the first `Older`
    /// step, so `Newer` can restore it when leaving history.
    pub fn stash_draft(&mut self, surface: &str, draft: &str) {
        let state = self.surface_mut(surface);
        if state.cursor == -1 {
            state.draft = draft.to_string();
        }
    }

    pub fn navigate(&mut self, surface: &str, direction: HistoryDirection) -> String {
        let state = self.surface_mut(surface);
        if state.entries.is_empty() {
            return "".to_string();
        }

        match direction {
            HistoryDirection::Older => {
                if state.cursor < state.entries.len() as isize - 1 {
                    state.cursor += 1;
                }
                return state.entries[state.cursor as usize].clone();
            }
            HistoryDirection::Newer => {
                if state.cursor > 0 {
                    state.cursor -= 1;
                    return state.entries[state.cursor as usize].clone();
                }
                if state.cursor == 0 {
                    state.cursor = -1;
                    return state.draft.clone();
                }
                return "".to_string();
            }
        }
    }

    pub fn entries(&mut self, surface: &str) -> Vec<String> {
        return self.surface_mut(surface).entries.clone();
    }

    pub fn clear(&mut self, surface: &str) {
        self.surfaces
            .insert(surface.to_string(), SurfaceState::default());
        self.store.remove(&HistoryBuffer::storage_key(surface));
    }

    /// One-time import of the alternate implementation's `chatHistory`
    /// blob into the chat surface, applying dedup and the entry cap, then
    /// drops the legacy key.
    pub fn migrate_legacy(&mut self) {
        let raw = match self.store.get(LEGACY_CHAT_HISTORY_KEY) {
            Some(raw) => raw,
            None => return,
        };

        match serde_json::from_str::<LegacyChatHistory>(&raw) {
            Ok(legacy) => {
                for message in legacy.messages {
                    self.record(CHAT_SURFACE, &message);
                }
                tracing::debug!("Migrated legacy chat history");
            }
            Err(err) => {
                tracing::warn!(err = ?err, "Unreadable legacy chat history, dropping");
            }
        }

        self.store.remove(LEGACY_CHAT_HISTORY_KEY);
    }
}

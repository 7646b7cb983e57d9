use dashmap::DashMap;

use crate::domain::models::KeyValueStore;

/// Ephemeral store used by tests. Dropping it is the same as clearing the
/// browser's local storage.
#[derive(Default)]
pub struct MemoryStore {
    values: DashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        return self.values.get(key).map(|value| return value.clone());
    }

    fn set(&self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.remove(key);
    }
}

use std::sync::Arc;

/// Persisted key names shared between components.
pub const TOKEN_KEY: &str = "token";
pub const MOCK_USERS_KEY: &str = "mockUsers";
pub const LEGACY_CHAT_HISTORY_KEY: &str = "chatHistory";

/// Local key-value persistence, UTF-8 values. Failures degrade to
/// "absent": implementations log and return None rather than erroring, as
/// loss of this data is equivalent to a cold start.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

pub type StoreArc = Arc<dyn KeyValueStore + Send + Sync>;

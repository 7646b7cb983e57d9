#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::Message;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BackendName {
    Mock,
    Remote,
}

impl BackendName {
    pub fn parse(text: String) -> Option<BackendName> {
        return BackendName::iter().find(|e| return e.to_string() == text);
    }
}

/// A single completion request: the new user message plus the full prior
/// transcript, which the backend replays to the API on every call.
pub struct BackendPrompt {
    pub text: String,
    pub transcript: Vec<Message>,
}

impl BackendPrompt {
    pub fn new(text: String, transcript: Vec<Message>) -> BackendPrompt {
        return BackendPrompt { text, transcript };
    }
}

#[derive(Debug)]
pub struct BackendResponse {
    pub text: String,
}

#[async_trait]
pub trait Backend {
    fn name(&self) -> BackendName;

    /// Used at startup to verify all configurations are available to work
    /// with the backend.
    async fn health_check(&self) -> Result<()>;

    /// Requests a single completion. One suspend point, no streaming; the
    /// whole reply comes back in one response.
    async fn get_completion(&self, prompt: BackendPrompt) -> Result<BackendResponse>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;

#[cfg(test)]
#[path = "mock_test.rs"]
mod tests;

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::time;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;

const RESPONSES: [&str; 5] = [
    "I understand you're asking about \"{message}\". This is a mock response since there's no real AI backend connected. In a real application, this would be an AI-generated response based on your input.",
    "Thanks for your message: \"{message}\". I'm currently running in demo mode with mock responses. The actual AI functionality would be available when connected to a real backend service.",
    "Interesting question about \"{message}\"! This is a placeholder response. In production, this would be processed by an AI model like GPT-4 or similar.",
    "I received your message: \"{message}\". Since this is a demo version, I'm providing mock responses. The real chat would connect to an AI service for intelligent responses.",
    "You said: \"{message}\". This is a demo response. In a real application, this would be an AI-generated answer tailored to your specific question.",
];

/// Canned responses for running without a completion API. Templates rotate
/// deterministically so transcripts stay reproducible.
#[derive(Default)]
pub struct MockBackend {
    counter: AtomicUsize,
}

impl MockBackend {
    fn latency(&self) -> Duration {
        let millis = Config::get(ConfigKey::MockLatencyMs)
            .parse::<u64>()
            .unwrap_or(1000);
        return Duration::from_millis(millis);
    }
}

#[async_trait]
impl Backend for MockBackend {
    fn name(&self) -> BackendName {
        return BackendName::Mock;
    }

    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn get_completion(&self, prompt: BackendPrompt) -> Result<BackendResponse> {
        time::sleep(self.latency()).await;

        let idx = self.counter.fetch_add(1, Ordering::Relaxed) % RESPONSES.len();
        let text = RESPONSES[idx].replace("{message}", prompt.text.trim());

        return Ok(BackendResponse { text });
    }
}

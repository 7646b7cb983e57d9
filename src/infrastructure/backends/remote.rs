#[cfg(test)]
#[path = "remote_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionMessageResponse {
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    message: CompletionMessageResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoiceResponse>,
}

/// OpenAI-compatible chat completions client. The configured URL is the full
/// completions endpoint, not a base URL.
pub struct RemoteBackend {
    url: String,
    key: String,
    timeout: String,
}

impl Default for RemoteBackend {
    fn default() -> RemoteBackend {
        return RemoteBackend {
            url: Config::get(ConfigKey::ApiURL),
            key: Config::get(ConfigKey::ApiKey),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

#[async_trait]
impl Backend for RemoteBackend {
    fn name(&self) -> BackendName {
        return BackendName::Remote;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("API URL is not defined");
        }
        if self.key.is_empty() {
            bail!("API key is not defined");
        }

        // The URL points at the completions endpoint itself, which only
        // accepts POST, so any HTTP response at all counts as reachable.
        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Completion API is not reachable");
            bail!("Completion API is not reachable");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, prompt: BackendPrompt) -> Result<BackendResponse> {
        let mut messages: Vec<MessageRequest> = prompt
            .transcript
            .iter()
            .map(|message| {
                return MessageRequest {
                    role: message.author.role().to_string(),
                    content: message.text.to_string(),
                };
            })
            .collect();
        messages.push(MessageRequest {
            role: "user".to_string(),
            content: prompt.text,
        });

        let req = CompletionRequest {
            model: Config::get(ConfigKey::Model),
            messages,
            max_tokens: Config::get(ConfigKey::MaxTokens).parse::<u32>().unwrap_or(1000),
            temperature: Config::get(ConfigKey::Temperature).parse::<f64>().unwrap_or(0.7),
        };

        let res = reqwest::Client::new()
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.key))
            .json(&req)
            .send()
            .await?;

        let status = res.status().as_u16();
        if status == 401 {
            tracing::error!(status = status, "Completion request rejected");
            bail!("API key is invalid. Please check your configuration.");
        }
        if status == 429 {
            tracing::warn!(status = status, "Completion request rate limited");
            bail!("Rate limit exceeded. Please try again later.");
        }
        if !res.status().is_success() {
            tracing::error!(status = status, "Failed to make completion request");
            bail!("API request failed with status {status}");
        }

        let body = res.json::<CompletionResponse>().await?;
        tracing::debug!(body = ?body, "Completion response");

        if body.choices.is_empty() {
            bail!("API response contained no choices");
        }

        return Ok(BackendResponse {
            text: body.choices[0].message.content.to_string(),
        });
    }
}

//! Ollama chat client with timeout and retry

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::types::response::UNKNOWN_ERROR;
use crate::types::ChatMessage;

const MAX_RETRY_DELAY_SECS: u64 = 60;

/// Ollama API client
pub struct OllamaClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: LlmConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<ChatOptions>,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.config.base_url.trim_end_matches('/'))
    }

    /// Check if Ollama is available
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.config.base_url.trim_end_matches('/'));

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Send a system instruction and a user message, returning the reply
    /// text. Requests that never reached the service are retried with
    /// exponential backoff up to `max_retries` times.
    pub async fn chat(&self, system: &str, user: &str) -> Result<String> {
        let mut attempt = 0;

        loop {
            match self.send_chat(system, user).await {
                Err(Error::ServiceUnavailable(detail)) if attempt < self.config.max_retries => {
                    let delay = retry_delay(attempt);
                    tracing::warn!(
                        "Chat request failed (attempt {}/{}): {}, retrying in {:?}",
                        attempt + 1,
                        self.config.max_retries.saturating_add(1),
                        detail,
                        delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// One non-streaming request to `/api/chat`
    async fn send_chat(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            stream: false,
            options: self.config.temperature.map(|temperature| ChatOptions { temperature }),
        };

        tracing::info!("Asking {} ({} context chars)", self.config.model, system.len());

        let response = self
            .client
            .post(self.chat_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            tracing::warn!("Ollama replied HTTP {}", status);
        }

        parse_chat_response(&body)
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.config.timeout_secs)
        } else {
            Error::ServiceUnavailable(err.to_string())
        }
    }
}

/// Exponential backoff, capped at a minute
fn retry_delay(attempt: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(attempt).min(MAX_RETRY_DELAY_SECS))
}

/// Pull the answer out of a chat response body.
///
/// A body without `message` is malformed; its `error` field (if any) is
/// the detail.
fn parse_chat_response(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(format!("invalid response body: {}", e)))?;

    match response.message {
        Some(message) => Ok(message.content),
        None => {
            let detail = match response.error {
                Some(serde_json::Value::String(s)) => s,
                Some(other) => other.to_string(),
                None => UNKNOWN_ERROR.to_string(),
            };
            Err(Error::MalformedResponse(detail))
        }
    }
}

//! Ollama-based LLM provider
//!
//! Wraps `OllamaClient` and folds its errors into tagged answers.

use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::error::Result;
use crate::generation::OllamaClient;
use crate::types::{Answer, GenerationFailure};

use super::llm::LlmProvider;

/// Ollama LLM provider for answer generation
pub struct OllamaLlm {
    client: OllamaClient,
    model: String,
}

impl OllamaLlm {
    /// Create a new Ollama LLM provider
    pub fn new(config: &LlmConfig) -> Result<Self> {
        Ok(Self {
            client: OllamaClient::new(config)?,
            model: config.model.clone(),
        })
    }

}

#[async_trait]
impl LlmProvider for OllamaLlm {
    async fn answer(&self, instruction: &str, question: &str) -> Answer {
        match self.client.chat(instruction, question).await {
            Ok(content) => Answer::generated(content),
            Err(e) => {
                tracing::warn!("Ollama call failed: {}", e);
                Answer::failed(GenerationFailure::from(e))
            }
        }
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

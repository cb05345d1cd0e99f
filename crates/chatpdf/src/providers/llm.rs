//! LLM provider trait for generating answers

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Answer;

/// Trait for LLM-based answer generation
///
/// Implementations:
/// - `OllamaLlm`: Local Ollama server (llama3.2, phi3, etc.)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Answer `question` under the system-level `instruction`.
    ///
    /// Never fails: service errors come back as `Answer::Failed`.
    async fn answer(&self, instruction: &str, question: &str) -> Answer;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}

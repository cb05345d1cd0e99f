//! Answer generation: grounding prompt and the Ollama chat client

pub mod ollama;
pub mod prompt;

pub use ollama::OllamaClient;
pub use prompt::PromptBuilder;

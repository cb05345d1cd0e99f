//! Provider abstraction for the language model
//!
//! The session pipeline only sees `LlmProvider`, so the Ollama backend can
//! be swapped for a scripted one in tests.

pub mod llm;
pub mod ollama;

pub use llm::LlmProvider;
pub use ollama::OllamaLlm;

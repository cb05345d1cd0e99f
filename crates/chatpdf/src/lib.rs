//! chatpdf: chat with your PDFs
//!
//! Uploaded PDFs are extracted to text once per session, split into
//! fixed-size chunks and searched by keyword overlap. The best chunks ground
//! a prompt that is answered by a local Ollama model, and every turn is kept
//! in the session transcript.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod session;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::ChatConfig;
pub use error::{Error, Result};
pub use session::{ChatPipeline, Session, TurnOutcome};
pub use types::{
    chat::{ChatMessage, Transcript, Turn},
    document::{Chunk, DocumentSet, UploadedFile},
    response::{Answer, GenerationFailure},
};

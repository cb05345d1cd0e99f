//! Core types for the chat pipeline

pub mod chat;
pub mod document;
pub mod response;

pub use chat::{ChatMessage, Role, Transcript, Turn};
pub use document::{Chunk, DocumentSet, UploadedFile};
pub use response::{Answer, GenerationFailure, ERROR_MARKER};

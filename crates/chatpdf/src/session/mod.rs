//! Per-session chat state and the turn pipeline

mod pipeline;
mod state;

pub use pipeline::{ChatPipeline, TurnOutcome};
pub use state::{ChunkCache, Session, SessionSnapshot};

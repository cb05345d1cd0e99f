//! Session state: transcript, chunk cache and pending question

use serde::Serialize;

use crate::types::{ChatMessage, Chunk, Transcript};

/// Chunks for the document set a session is currently chatting about
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ChunkCache {
    /// Nothing extracted yet
    #[default]
    Empty,
    /// Chunks built from the document set with this fingerprint
    Populated {
        fingerprint: String,
        chunks: Vec<Chunk>,
    },
}

impl ChunkCache {
    pub fn is_populated(&self) -> bool {
        matches!(self, Self::Populated { .. })
    }

    /// Cached chunks, empty when nothing is cached
    pub fn chunks(&self) -> &[Chunk] {
        match self {
            Self::Empty => &[],
            Self::Populated { chunks, .. } => chunks,
        }
    }

    pub fn fingerprint(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Populated { fingerprint, .. } => Some(fingerprint),
        }
    }

    /// Whether the cache was built from the document set with `fingerprint`
    pub fn matches(&self, fingerprint: &str) -> bool {
        self.fingerprint() == Some(fingerprint)
    }
}

/// One user's conversation. Sessions share nothing with each other.
#[derive(Debug, Clone, Default)]
pub struct Session {
    transcript: Transcript,
    cache: ChunkCache,
    pending_question: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn cache(&self) -> &ChunkCache {
        &self.cache
    }

    pub(crate) fn set_cache(&mut self, cache: ChunkCache) {
        self.cache = cache;
    }

    /// Question typed but not yet answered
    pub fn pending_question(&self) -> &str {
        &self.pending_question
    }

    pub fn set_pending_question(&mut self, question: impl Into<String>) {
        self.pending_question = question.into();
    }

    /// Reset transcript, chunk cache and pending question
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.cache = ChunkCache::Empty;
        self.pending_question.clear();
    }

    /// Read-only view for display
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.transcript.messages(),
            turns: self.transcript.len(),
            chunk_count: self.cache.chunks().len(),
            documents_fingerprint: self.cache.fingerprint().map(str::to_string),
            pending_question: self.pending_question.clone(),
        }
    }
}

/// Serializable view of a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// User/assistant messages, two per turn
    pub messages: Vec<ChatMessage>,
    pub turns: usize,
    pub chunk_count: usize,
    pub documents_fingerprint: Option<String>,
    pub pending_question: String,
}

//! Application state for the chat server

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::ChatConfig;
use crate::error::{Error, Result};
use crate::providers::{LlmProvider, OllamaLlm};
use crate::session::{ChatPipeline, Session};
use crate::types::DocumentSet;

/// Everything one browser tab owns: the chat session and the files it
/// currently has attached
#[derive(Debug, Default)]
pub struct SessionSlot {
    pub session: Session,
    pub documents: DocumentSet,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: ChatConfig,
    /// Turn pipeline shared by all sessions (stateless)
    pipeline: ChatPipeline,
    /// One slot per session; turns on a session serialise on its own lock
    sessions: DashMap<Uuid, Arc<Mutex<SessionSlot>>>,
}

impl AppState {
    /// Create new application state backed by Ollama
    pub fn new(config: ChatConfig) -> Result<Self> {
        tracing::info!("Initializing chat state (model: {})...", config.llm.model);

        let llm: Arc<dyn LlmProvider> = Arc::new(OllamaLlm::new(&config.llm)?);
        let pipeline = ChatPipeline::from_config(&config, llm);

        Ok(Self::with_pipeline(config, pipeline))
    }

    /// Create state around an existing pipeline
    pub fn with_pipeline(config: ChatConfig, pipeline: ChatPipeline) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pipeline,
                sessions: DashMap::new(),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &ChatConfig {
        &self.inner.config
    }

    pub fn pipeline(&self) -> &ChatPipeline {
        &self.inner.pipeline
    }

    /// Start a new empty session
    pub fn create_session(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.inner
            .sessions
            .insert(id, Arc::new(Mutex::new(SessionSlot::default())));
        tracing::info!("Created session {}", id);
        id
    }

    /// Look up a session slot
    pub fn session(&self, id: &Uuid) -> Result<Arc<Mutex<SessionSlot>>> {
        self.inner
            .sessions
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))
    }

    /// Drop a session and everything it holds
    pub fn remove_session(&self, id: &Uuid) -> Result<()> {
        match self.inner.sessions.remove(id) {
            Some(_) => {
                tracing::info!("Removed session {}", id);
                Ok(())
            }
            None => Err(Error::SessionNotFound(id.to_string())),
        }
    }

    pub fn session_count(&self) -> usize {
        self.inner.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingExtractor, ScriptedLlm};
    use crate::types::Answer;

    fn state() -> AppState {
        let config = ChatConfig::default();
        let pipeline = ChatPipeline::with_extractor(
            &config,
            Arc::new(CountingExtractor::default()),
            Arc::new(ScriptedLlm::new(Answer::generated("X"))),
        );
        AppState::with_pipeline(config, pipeline)
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let state = state();
        let a = state.create_session();
        let b = state.create_session();
        assert_ne!(a, b);
        assert_eq!(state.session_count(), 2);

        state.session(&a).unwrap().lock().await.session.set_pending_question("only in a");
        assert_eq!(state.session(&b).unwrap().lock().await.session.pending_question(), "");
    }

    #[test]
    fn test_remove_session() {
        let state = state();
        let id = state.create_session();
        state.remove_session(&id).unwrap();

        assert!(matches!(state.session(&id), Err(Error::SessionNotFound(_))));
        assert!(state.remove_session(&id).is_err());
    }
}

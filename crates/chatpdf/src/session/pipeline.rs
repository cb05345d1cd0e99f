//! Turn handling: extract once, retrieve, generate, record

use std::sync::Arc;

use crate::config::ChatConfig;
use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::ingestion::{IngestPipeline, PdfExtractor, TextChunker, TextExtractor};
use crate::providers::LlmProvider;
use crate::retrieval::KeywordRetriever;
use crate::types::{DocumentSet, Turn};

use super::state::{ChunkCache, Session};

/// Result of a single user turn
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// No documents were supplied; the session is unchanged
    Rejected,
    /// The turn was appended to the transcript
    Answered(Turn),
}

impl TurnOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }

    pub fn turn(&self) -> Option<&Turn> {
        match self {
            Self::Rejected => None,
            Self::Answered(turn) => Some(turn),
        }
    }
}

/// Extractor, chunker, retriever and model wired together
#[derive(Clone)]
pub struct ChatPipeline {
    ingest: IngestPipeline,
    retriever: KeywordRetriever,
    llm: Arc<dyn LlmProvider>,
}

impl ChatPipeline {
    pub fn new(ingest: IngestPipeline, retriever: KeywordRetriever, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            ingest,
            retriever,
            llm,
        }
    }

    /// Build a pipeline from configuration with the given extractor and model
    pub fn with_extractor(
        config: &ChatConfig,
        extractor: Arc<dyn TextExtractor>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        Self::new(
            IngestPipeline::new(extractor, TextChunker::new(config.chunking.chunk_size)),
            KeywordRetriever::new(config.retrieval.top_k),
            llm,
        )
    }

    /// Build a pipeline reading PDFs
    pub fn from_config(config: &ChatConfig, llm: Arc<dyn LlmProvider>) -> Self {
        let extractor = PdfExtractor::new(std::time::Duration::from_secs(config.extraction.timeout_secs));
        Self::with_extractor(config, Arc::new(extractor), llm)
    }

    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        &self.llm
    }

    /// Answer `question` against `documents` and record the turn.
    ///
    /// Chunks are built once per document set and reused while the set's
    /// fingerprint stays the same. A parse failure returns the error before
    /// the session is touched. Model failures do not error: they are
    /// recorded as a failed answer.
    pub async fn handle_turn(
        &self,
        session: &mut Session,
        question: &str,
        documents: &DocumentSet,
    ) -> Result<TurnOutcome> {
        if documents.is_empty() {
            tracing::info!("Turn rejected: no documents uploaded");
            return Ok(TurnOutcome::Rejected);
        }

        self.ensure_chunks(session, documents).await?;

        let instruction = {
            let results = self.retriever.search(session.cache().chunks(), question);
            PromptBuilder::build_grounding_instruction(&results)
        };

        let answer = self.llm.answer(&instruction, question).await;
        if answer.is_error() {
            tracing::warn!("Recording failed answer: {}", answer);
        }

        let turn = Turn::new(question, answer);
        session.transcript_mut().push(turn.clone());
        session.set_pending_question(String::new());

        tracing::info!(
            "Turn {} answered with {} ({})",
            session.transcript().len(),
            self.llm.model(),
            self.llm.name()
        );

        Ok(TurnOutcome::Answered(turn))
    }

    /// Populate the cache unless it already holds this document set
    async fn ensure_chunks(&self, session: &mut Session, documents: &DocumentSet) -> Result<()> {
        let fingerprint = documents.fingerprint();
        if session.cache().matches(&fingerprint) {
            tracing::debug!("Reusing {} cached chunks", session.cache().chunks().len());
            return Ok(());
        }

        if session.cache().is_populated() {
            tracing::info!("Document set changed, rebuilding chunk cache");
        }

        // PDF parsing is CPU-bound; keep it off the async workers
        let ingest = self.ingest.clone();
        let documents = documents.clone();
        let chunks = tokio::task::spawn_blocking(move || ingest.ingest(&documents))
            .await
            .map_err(|e| Error::internal(format!("Extraction task failed: {}", e)))??;

        session.set_cache(ChunkCache::Populated { fingerprint, chunks });
        Ok(())
    }
}

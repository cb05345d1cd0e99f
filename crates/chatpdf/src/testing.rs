//! Test doubles shared by unit tests

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};
use crate::ingestion::TextExtractor;
use crate::providers::LlmProvider;
use crate::types::{Answer, DocumentSet};

/// Reads each file's bytes as UTF-8 text and counts calls
#[derive(Default)]
pub struct CountingExtractor {
    calls: AtomicUsize,
}

impl CountingExtractor {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextExtractor for CountingExtractor {
    fn extract(&self, documents: &DocumentSet) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut text = String::new();
        for file in documents.files() {
            let part = std::str::from_utf8(&file.data)
                .map_err(|e| Error::document_parse(&file.filename, e.to_string()))?;
            text.push_str(part);
        }
        Ok(text)
    }
}

/// Returns a fixed answer and remembers every (instruction, question)
pub struct ScriptedLlm {
    reply: Answer,
    requests: Mutex<Vec<(String, String)>>,
}

impl ScriptedLlm {
    pub fn new(reply: Answer) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn answer(&self, instruction: &str, question: &str) -> Answer {
        self.requests
            .lock()
            .push((instruction.to_string(), question.to_string()));
        self.reply.clone()
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "test-model"
    }
}

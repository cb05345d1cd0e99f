//! Ingestion pipeline orchestration

use std::sync::Arc;

use crate::error::Result;
use crate::types::{Chunk, DocumentSet};

use super::chunker::TextChunker;
use super::parser::TextExtractor;

/// Extract + chunk in one step
#[derive(Clone)]
pub struct IngestPipeline {
    /// Text extractor
    extractor: Arc<dyn TextExtractor>,
    /// Text chunker
    chunker: TextChunker,
}

impl IngestPipeline {
    /// Create a new ingestion pipeline
    pub fn new(extractor: Arc<dyn TextExtractor>, chunker: TextChunker) -> Self {
        Self { extractor, chunker }
    }

    /// Full ingestion: extract + chunk
    pub fn ingest(&self, documents: &DocumentSet) -> Result<Vec<Chunk>> {
        let text = self.extractor.extract(documents)?;
        let chunks = self.chunker.chunk(&text);

        tracing::info!(
            "Ingested {} file(s): {} chars -> {} chunks",
            documents.len(),
            text.chars().count(),
            chunks.len()
        );

        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::UploadedFile;

    /// Treats each file's bytes as its text
    struct PlainTextExtractor;

    impl TextExtractor for PlainTextExtractor {
        fn extract(&self, documents: &DocumentSet) -> Result<String> {
            let mut text = String::new();
            for file in documents.files() {
                let part = std::str::from_utf8(&file.data)
                    .map_err(|e| Error::document_parse(&file.filename, e.to_string()))?;
                text.push_str(part);
            }
            Ok(text)
        }
    }

    #[test]
    fn test_ingest_concatenates_in_order() {
        let pipeline = IngestPipeline::new(Arc::new(PlainTextExtractor), TextChunker::new(12));
        let docs = DocumentSet::new(vec![
            UploadedFile::new("a.pdf", b"alpha beta ".to_vec()),
            UploadedFile::new("b.pdf", b"gamma delta".to_vec()),
        ]);

        let chunks = pipeline.ingest(&docs).unwrap();
        let contents: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn test_ingest_propagates_parse_error() {
        let pipeline = IngestPipeline::new(Arc::new(PlainTextExtractor), TextChunker::default());
        let docs = DocumentSet::new(vec![UploadedFile::new("bad.pdf", vec![0xff, 0xfe])]);

        assert!(matches!(
            pipeline.ingest(&docs),
            Err(Error::DocumentParse { .. })
        ));
    }
}

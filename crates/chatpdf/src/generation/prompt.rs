//! Grounding prompt for PDF questions

use crate::retrieval::SearchResult;

/// Instruction placed before the retrieved context
pub const GROUNDING_PREFIX: &str = "You are a PDF assistant. Answer ONLY from the text below.\n\n";

/// Separator between retrieved chunks
pub const CHUNK_SEPARATOR: &str = "\n\n---\n\n";

/// Prompt builder for grounded answers
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join retrieved chunk texts, best match first
    pub fn build_context(results: &[SearchResult<'_>]) -> String {
        results
            .iter()
            .map(|r| r.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR)
    }

    /// System-level instruction: fixed prefix followed by the context
    pub fn build_grounding_instruction(results: &[SearchResult<'_>]) -> String {
        format!("{}{}", GROUNDING_PREFIX, Self::build_context(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chunk;

    #[test]
    fn test_instruction_layout() {
        let first = Chunk::new(1, "second chunk text".to_string());
        let second = Chunk::new(0, "first chunk text".to_string());
        let results = vec![
            SearchResult { chunk: &first, score: 2 },
            SearchResult { chunk: &second, score: 0 },
        ];

        let instruction = PromptBuilder::build_grounding_instruction(&results);
        assert_eq!(
            instruction,
            "You are a PDF assistant. Answer ONLY from the text below.\n\n\
             second chunk text\n\n---\n\nfirst chunk text"
        );
    }

    #[test]
    fn test_no_results_leaves_prefix_only() {
        assert_eq!(PromptBuilder::build_grounding_instruction(&[]), GROUNDING_PREFIX);
    }
}

//! Lexical overlap scoring and top-K selection

use crate::types::Chunk;

/// Search result with chunk and relevance score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<'a> {
    /// The retrieved chunk
    pub chunk: &'a Chunk,
    /// Number of query words found in the chunk
    pub score: usize,
}

/// Count the query words that occur as substrings of the chunk.
///
/// Both sides are lower-cased. Query words are taken from a whitespace
/// split and are not deduplicated, so a word repeated in the query counts
/// once per repetition.
pub fn relevance_score(query_words: &[String], chunk: &str) -> usize {
    let chunk = chunk.to_lowercase();
    query_words
        .iter()
        .filter(|word| chunk.contains(word.as_str()))
        .count()
}

/// Naive keyword retriever: no stemming, stop words or weighting
#[derive(Debug, Clone)]
pub struct KeywordRetriever {
    top_k: usize,
}

impl KeywordRetriever {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Retrieve the configured number of chunks
    pub fn search<'a>(&self, chunks: &'a [Chunk], query: &str) -> Vec<SearchResult<'a>> {
        Self::retrieve(chunks, query, self.top_k)
    }

    /// Rank chunks by descending score and keep the first `k`.
    ///
    /// The sort is stable, so equal scores keep chunk order; an empty query
    /// returns the first `k` chunks unchanged.
    pub fn retrieve<'a>(chunks: &'a [Chunk], query: &str, k: usize) -> Vec<SearchResult<'a>> {
        let query_words: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let mut results: Vec<SearchResult<'a>> = chunks
            .iter()
            .map(|chunk| SearchResult {
                chunk,
                score: relevance_score(&query_words, &chunk.content),
            })
            .collect();

        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(k);

        tracing::debug!(
            "Retrieved {} of {} chunks for {} query words, scores {:?}",
            results.len(),
            chunks.len(),
            query_words.len(),
            results.iter().map(|r| r.score).collect::<Vec<_>>()
        );

        results
    }
}

impl Default for KeywordRetriever {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(texts: &[&str]) -> Vec<Chunk> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Chunk::new(i, t.to_string()))
            .collect()
    }

    fn indices(results: &[SearchResult<'_>]) -> Vec<usize> {
        results.iter().map(|r| r.chunk.index).collect()
    }

    #[test]
    fn test_score_counts_every_query_word() {
        let words = vec!["solar".to_string(), "panel".to_string(), "cost".to_string()];
        assert_eq!(relevance_score(&words, "Solar PANEL installation COSTS"), 3);
        assert_eq!(relevance_score(&words, "wind turbines"), 0);
    }

    #[test]
    fn test_score_matches_substrings() {
        let words = vec!["cat".to_string()];
        assert_eq!(relevance_score(&words, "concatenate"), 1);
    }

    #[test]
    fn test_duplicate_query_words_count_each_time() {
        let data = chunks(&["the cat sat"]);
        let results = KeywordRetriever::retrieve(&data, "cat cat CAT", 1);
        assert_eq!(results[0].score, 3);
    }

    #[test]
    fn test_ranks_by_score_descending() {
        let data = chunks(&[
            "nothing relevant here",
            "tax rates only",
            "tax rates and filing deadlines",
        ]);
        let results = KeywordRetriever::retrieve(&data, "tax filing deadlines", 3);
        assert_eq!(indices(&results), vec![2, 1, 0]);
        assert_eq!(results[0].score, 3);
        assert_eq!(results[1].score, 1);
        assert_eq!(results[2].score, 0);
    }

    #[test]
    fn test_ties_keep_original_order() {
        let data = chunks(&["apple one", "banana", "apple two", "apple three"]);
        let results = KeywordRetriever::retrieve(&data, "apple", 10);
        assert_eq!(indices(&results), vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_k_larger_than_chunks_returns_all() {
        let data = chunks(&["a b", "b", "c"]);
        let results = KeywordRetriever::retrieve(&data, "b", 10);
        assert_eq!(results.len(), 3);
        assert_eq!(indices(&results), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_query_returns_first_k() {
        let data = chunks(&["first", "second", "third", "fourth"]);
        for query in ["", "   \n\t"] {
            let results = KeywordRetriever::retrieve(&data, query, 3);
            assert_eq!(indices(&results), vec![0, 1, 2]);
            assert!(results.iter().all(|r| r.score == 0));
        }
    }

    #[test]
    fn test_zero_k_and_no_chunks() {
        let data = chunks(&["something"]);
        assert!(KeywordRetriever::retrieve(&data, "something", 0).is_empty());
        assert!(KeywordRetriever::retrieve(&[], "something", 3).is_empty());
    }

    #[test]
    fn test_search_uses_configured_k() {
        let data = chunks(&["a", "b", "c", "d"]);
        let retriever = KeywordRetriever::default();
        assert_eq!(retriever.search(&data, "d").len(), 3);
        assert_eq!(indices(&retriever.search(&data, "d")), vec![3, 0, 1]);
    }
}

//! Keyword retrieval over cached chunks

mod search;

pub use search::{relevance_score, KeywordRetriever, SearchResult};

//! Document ingestion: PDF text extraction and chunking

mod chunker;
mod parser;
mod processor;

pub use chunker::TextChunker;
pub use parser::{PdfExtractor, TextExtractor};
pub use processor::IngestPipeline;

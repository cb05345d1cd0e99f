//! Word-wrapping text chunker

use unicode_segmentation::UnicodeSegmentation;

use crate::types::Chunk;

/// Splits text into chunks of at most `max_chars` characters.
///
/// Text is split on whitespace and the words are packed greedily, joined by
/// a single space. Whitespace runs therefore collapse to one space and
/// leading/trailing whitespace is dropped. A word longer than `max_chars`
/// is broken at grapheme boundaries.
#[derive(Debug, Clone)]
pub struct TextChunker {
    max_chars: usize,
}

impl TextChunker {
    /// Create a new chunker; a zero size is treated as 1
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
        }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Chunk text in order
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let mut builder = ChunkBuilder::new(self.max_chars);

        for word in text.split_whitespace() {
            let word_len = word.chars().count();

            if word_len <= self.max_chars {
                builder.push_word(word, word_len);
            } else {
                builder.push_long_word(word);
            }
        }

        builder.finish()
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(1200)
    }
}

struct ChunkBuilder {
    max_chars: usize,
    chunks: Vec<Chunk>,
    current: String,
    current_len: usize,
}

impl ChunkBuilder {
    fn new(max_chars: usize) -> Self {
        Self {
            max_chars,
            chunks: Vec::new(),
            current: String::new(),
            current_len: 0,
        }
    }

    fn push_word(&mut self, word: &str, word_len: usize) {
        if self.current_len > 0 && self.current_len + 1 + word_len > self.max_chars {
            self.flush();
        }

        if self.current_len > 0 {
            self.current.push(' ');
            self.current_len += 1;
        }
        self.current.push_str(word);
        self.current_len += word_len;
    }

    /// Full-size pieces become chunks of their own, the remainder opens the
    /// next chunk
    fn push_long_word(&mut self, word: &str) {
        self.flush();

        for grapheme in word.graphemes(true) {
            let len = grapheme.chars().count();
            if len <= self.max_chars {
                self.push_piece(grapheme, len);
            } else {
                // A cluster wider than a chunk can only be cut between chars
                let mut buf = [0u8; 4];
                for c in grapheme.chars() {
                    self.push_piece(c.encode_utf8(&mut buf), 1);
                }
            }
        }
    }

    fn push_piece(&mut self, piece: &str, len: usize) {
        if self.current_len > 0 && self.current_len + len > self.max_chars {
            self.flush();
        }
        self.current.push_str(piece);
        self.current_len += len;
    }

    fn flush(&mut self) {
        if self.current_len > 0 {
            let content = std::mem::take(&mut self.current);
            self.current_len = 0;
            self.emit(content);
        }
    }

    fn emit(&mut self, content: String) {
        let index = self.chunks.len();
        self.chunks.push(Chunk::new(index, content));
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.content.as_str()).collect()
    }

    fn sample_text() -> String {
        let mut text = String::new();
        for i in 0..400 {
            text.push_str(&format!("word{}  with\tsome\n\nspacing ", i));
            if i % 37 == 0 {
                text.push_str(&"x".repeat(2500));
                text.push(' ');
            }
        }
        text
    }

    #[test]
    fn test_packs_words_greedily() {
        let chunker = TextChunker::new(11);
        let chunks = chunker.chunk("the quick brown fox jumps over");
        assert_eq!(contents(&chunks), vec!["the quick", "brown fox", "jumps over"]);
        assert_eq!(chunks[2].index, 2);
    }

    #[test]
    fn test_respects_max_size() {
        let chunker = TextChunker::new(1200);
        let chunks = chunker.chunk(&sample_text());
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.char_len() <= 1200));
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        let chunker = TextChunker::new(1200);
        let text = sample_text();

        let first = chunker.chunk(&text);
        let second = chunker.chunk(&text);
        assert_eq!(first, second);

        let rejoined = contents(&first).join(" ");
        assert_eq!(chunker.chunk(&rejoined), first);
    }

    #[test]
    fn test_reconstructs_text_modulo_whitespace() {
        let chunker = TextChunker::new(50);
        let text = sample_text();
        let chunks = chunker.chunk(&text);

        let normalized = text.split_whitespace().collect::<String>();
        let rebuilt = chunks
            .iter()
            .flat_map(|c| c.content.split_whitespace())
            .collect::<String>();
        assert_eq!(rebuilt, normalized);
    }

    #[test]
    fn test_breaks_long_words() {
        let chunker = TextChunker::new(4);
        let chunks = chunker.chunk("abcdefghij kl");
        assert_eq!(contents(&chunks), vec!["abcd", "efgh", "ij", "kl"]);

        let chunks = chunker.chunk("abcdefghij k");
        assert_eq!(contents(&chunks), vec!["abcd", "efgh", "ij k"]);
    }

    #[test]
    fn test_keeps_graphemes_whole_when_they_fit() {
        let chunker = TextChunker::new(3);
        let chunks = chunker.chunk("e\u{301}e\u{301}e\u{301}");
        assert_eq!(contents(&chunks), vec!["e\u{301}", "e\u{301}", "e\u{301}"]);
    }

    #[test]
    fn test_splits_grapheme_wider_than_chunk() {
        let chunker = TextChunker::new(1);
        let chunks = chunker.chunk("e\u{301}");
        assert_eq!(contents(&chunks), vec!["e", "\u{301}"]);

        let cluster = format!("a{}", "\u{301}".repeat(1300));
        let chunks = TextChunker::default().chunk(&cluster);
        assert!(chunks.iter().all(|c| c.char_len() <= 1200));
        assert_eq!(
            chunks.iter().map(Chunk::char_len).collect::<Vec<_>>(),
            vec![1200, 101]
        );
        assert_eq!(contents(&chunks).concat(), cluster);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let chunker = TextChunker::new(5);
        let chunks = chunker.chunk("héllo wörld");
        assert_eq!(contents(&chunks), vec!["héllo", "wörld"]);
    }

    #[test]
    fn test_whitespace_only_yields_nothing() {
        let chunker = TextChunker::default();
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk(" \n\t ").is_empty());
    }

    #[test]
    fn test_zero_size_treated_as_one() {
        let chunker = TextChunker::new(0);
        assert_eq!(chunker.max_chars(), 1);
        assert_eq!(contents(&chunker.chunk("ab")), vec!["a", "b"]);
    }
}

//! Fixed-size text chunking

/// Splits text into contiguous slices of at most `max_chunk_chars` characters
///
/// Chunks never overlap, keep their original order and concatenate back to
/// the input exactly. Boundaries fall on character (not byte) positions.
pub struct TextChunker {
    max_chunk_chars: usize,
}

impl TextChunker {
    /// Create a new text chunker
    ///
    /// A size of zero is treated as one character per chunk.
    pub fn new(max_chunk_chars: usize) -> Self {
        Self {
            max_chunk_chars: max_chunk_chars.max(1),
        }
    }

    /// Chunk the given text
    ///
    /// Empty input yields no chunks.
    pub fn chunk<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut count = 0;

        for (idx, _) in text.char_indices() {
            if count == self.max_chunk_chars {
                chunks.push(&text[start..idx]);
                start = idx;
                count = 0;
            }
            count += 1;
        }

        if start < text.len() {
            chunks.push(&text[start..]);
        }

        chunks
    }
}

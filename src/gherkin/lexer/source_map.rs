//! Source location utilities for converting byte offsets to line/column positions
//!
//! Lines and columns are 1-based and columns count characters, not bytes, so
//! reported locations line up with what an editor shows.

/// Provides fast conversion from byte offsets to line/column positions
pub struct SourceMap<'a> {
    source: &'a str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceMap<'a> {
    /// Create a new SourceMap from source text
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a 1-based `(line, column)` pair
    pub fn position(&self, byte_offset: usize) -> (usize, usize) {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let start = self.line_starts[line];
        let end = byte_offset.min(self.source.len());
        let column = self.source[start..end].chars().count() + 1;

        (line + 1, column)
    }

    /// Get the total number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of a 1-based line, without its line terminator
    pub fn line(&self, line: usize) -> Option<&'a str> {
        let index = line.checked_sub(1)?;
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());
        let text = &self.source[start..end];
        Some(text.strip_suffix('\r').unwrap_or(text))
    }
}

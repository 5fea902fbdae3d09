//! Byte offset → line/column conversion.

use text_size::{TextRange, TextSize};

use super::position::{Position, Span};

/// Precomputed line starts for one source text.
///
/// Columns are reported in UTF-16 code units, which is what LSP clients
/// expect by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    text: String,
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self {
            text: text.to_string(),
            line_starts,
        }
    }

    /// Number of lines (a trailing newline opens an empty last line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn position(&self, offset: TextSize) -> Position {
        let offset = offset.min(TextSize::of(self.text.as_str()));
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = usize::from(self.line_starts[line]);
        let end = usize::from(offset);
        let column = self
            .text
            .get(start..end)
            .map(|slice| slice.encode_utf16().count())
            .unwrap_or(end - start);
        Position::new(line, column)
    }

    pub fn span(&self, range: TextRange) -> Span {
        Span::new(self.position(range.start()), self.position(range.end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_across_lines() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.position(TextSize::new(0)), Position::new(0, 0));
        assert_eq!(index.position(TextSize::new(3)), Position::new(1, 0));
        assert_eq!(index.position(TextSize::new(4)), Position::new(1, 1));
        assert_eq!(index.position(TextSize::new(7)), Position::new(3, 0));
    }

    #[test]
    fn test_utf16_columns() {
        // 'é' is two bytes in UTF-8 but one UTF-16 unit
        let index = LineIndex::new("é x");
        assert_eq!(index.position(TextSize::new(3)), Position::new(0, 2));
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let index = LineIndex::new("abc");
        assert_eq!(index.position(TextSize::new(99)), Position::new(0, 3));
    }
}

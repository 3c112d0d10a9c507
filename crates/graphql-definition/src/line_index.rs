use crate::Position;

/// Offset-to-position and position-to-offset conversion over a pre-built line table.
///
/// Line starts are recorded once, so converting an offset is a binary search
/// over lines followed by a UTF-16 count within a single line.
///
/// # Example
///
/// ```
/// use graphql_definition::{LineIndex, Position};
///
/// let index = LineIndex::new("query A { x }\nquery B { y }");
///
/// assert_eq!(index.offset_to_position(20), Position::new(1, 6));
/// assert_eq!(index.position_to_offset(Position::new(1, 6)), Some(20));
/// ```
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    /// Byte offset of the start of each line.
    /// Index 0 is always 0; index N is the offset just past the Nth '\n'.
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();

        Self { text, line_starts }
    }

    /// Convert a byte offset to a row/column position.
    ///
    /// Offsets past the end of the text are clamped to its end, and offsets
    /// inside a multi-byte character are moved back to that character's start,
    /// so the result always lies within the text.
    #[must_use]
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let row = match self.line_starts.binary_search(&offset) {
            Ok(row) => row,
            Err(row) => row.saturating_sub(1),
        };

        let line_start = self.line_starts[row];
        Position {
            row,
            column: self.text[line_start..offset].encode_utf16().count(),
        }
    }

    /// Convert a row/column position to a byte offset.
    ///
    /// Returns `None` if the row does not exist, the column is past the end of
    /// the row, or the column splits a surrogate pair.
    #[must_use]
    pub fn position_to_offset(&self, position: Position) -> Option<usize> {
        let line_start = self.line_start(position.row)?;
        let line_end = self
            .line_start(position.row + 1)
            .map_or(self.text.len(), |next| next - 1);

        let mut units = 0;
        for (idx, ch) in self.text[line_start..line_end].char_indices() {
            if units >= position.column {
                return (units == position.column).then_some(line_start + idx);
            }
            units += ch.len_utf16();
        }

        (units == position.column).then_some(line_end)
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset of the start of a row, `None` if out of bounds
    #[must_use]
    pub fn line_start(&self, row: usize) -> Option<usize> {
        self.line_starts.get(row).copied()
    }
}

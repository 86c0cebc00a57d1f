//! Per-column vertical cursors.

use crate::types::GridSpan;

/// Next free Y position of every column in a section.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnCursors {
    offsets: Vec<f32>,
}

impl ColumnCursors {
    /// All `columns` cursors start at `y`.
    pub fn new(columns: usize, y: f32) -> Self {
        Self {
            offsets: vec![y; columns],
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Cursor of a single column, `None` if out of range.
    pub fn get(&self, column: usize) -> Option<f32> {
        self.offsets.get(column).copied()
    }

    /// Lowest free position across every column of `span`.
    ///
    /// Returns `None` if the span is inverted or leaves the section.
    pub fn top_of(&self, span: GridSpan) -> Option<f32> {
        if !span.fits(self.offsets.len()) {
            return None;
        }
        self.offsets
            .get(span.indices())?
            .iter()
            .copied()
            .reduce(f32::max)
    }

    /// Move every column of `span` to `y`. Out-of-range columns are ignored.
    pub fn advance(&mut self, span: GridSpan, y: f32) {
        let end = span.end().min(self.offsets.len().saturating_sub(1));
        if let Some(columns) = self.offsets.get_mut(span.start()..=end) {
            for offset in columns {
                *offset = y;
            }
        }
    }

    /// Furthest cursor, `None` when there are no columns.
    pub fn max(&self) -> Option<f32> {
        self.offsets.iter().copied().reduce(f32::max)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.offsets
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_top_of_uses_lowest_column() {
        let mut cursors = ColumnCursors::new(3, 10.0);
        cursors.advance(GridSpan::Single(1), 60.0);

        assert_eq!(cursors.top_of(GridSpan::Single(0)), Some(10.0));
        assert_eq!(cursors.top_of(GridSpan::Range(0, 1)), Some(60.0));
        assert_eq!(cursors.top_of(GridSpan::Range(1, 2)), Some(60.0));
        assert_eq!(cursors.top_of(GridSpan::Range(0, 3)), None);
        assert_eq!(cursors.top_of(GridSpan::Range(2, 0)), None);
    }

    #[test]
    fn test_advance_synchronizes_span() {
        let mut cursors = ColumnCursors::new(4, 0.0);
        cursors.advance(GridSpan::Range(1, 2), 50.0);
        assert_eq!(cursors.as_slice(), &[0.0, 50.0, 50.0, 0.0]);
        assert_eq!(cursors.max(), Some(50.0));
    }

    #[test]
    fn test_advance_out_of_range_is_ignored() {
        let mut cursors = ColumnCursors::new(2, 0.0);
        cursors.advance(GridSpan::Single(5), 50.0);
        assert_eq!(cursors.as_slice(), &[0.0, 0.0]);
        assert_eq!(ColumnCursors::new(0, 0.0).max(), None);
    }
}

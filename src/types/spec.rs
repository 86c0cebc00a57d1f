use serde::{Deserialize, Serialize};

use super::{SectionInsets, Size};

/// Width rule for one column of a column-flow section.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColumnWidthSpec {
    /// Share whatever width is left after fixed and ratio columns equally
    #[default]
    EqualShare,
    /// Fraction (0, 1] of the width left after fixed columns
    Ratio(f32),
    /// Exact width in layout units
    Fixed(f32),
}

/// Base height of an item (column engine) or a row (grid engine).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemHeight {
    /// Height equals the resolved column width (square cells)
    #[default]
    EqualToColumnWidth,
    /// Exact height in layout units
    Fixed(f32),
}

impl ItemHeight {
    /// Base height for a column of the given width.
    pub fn resolve(self, column_width: f32) -> f32 {
        match self {
            ItemHeight::EqualToColumnWidth => column_width,
            ItemHeight::Fixed(height) => height,
        }
    }

    /// Height of an item that visually covers `multiple` flow rows of its column.
    ///
    /// `multiple × base + (multiple − 1) × line_spacing`
    pub fn with_multiple(self, column_width: f32, multiple: f32, line_spacing: f32) -> f32 {
        multiple * self.resolve(column_width) + (multiple - 1.0) * line_spacing
    }
}

/// Row or column coverage of a grid item. Ranges are inclusive.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GridSpan {
    Single(usize),
    Range(usize, usize),
}

impl Default for GridSpan {
    fn default() -> Self {
        GridSpan::Single(0)
    }
}

impl GridSpan {
    pub fn start(&self) -> usize {
        match *self {
            GridSpan::Single(index) => index,
            GridSpan::Range(start, _) => start,
        }
    }

    pub fn end(&self) -> usize {
        match *self {
            GridSpan::Single(index) => index,
            GridSpan::Range(_, end) => end,
        }
    }

    /// Number of tracks covered, `None` for an inverted range or one whose
    /// length does not fit in `usize`
    pub fn checked_len(&self) -> Option<usize> {
        self.end()
            .checked_sub(self.start())
            .and_then(|d| d.checked_add(1))
    }

    /// Number of tracks covered (0 when [`GridSpan::checked_len`] is `None`)
    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// An inverted range (`end < start`) covers nothing.
    pub fn is_valid(&self) -> bool {
        self.end() >= self.start()
    }

    /// True when every covered index is below `limit`
    pub fn fits(&self, limit: usize) -> bool {
        self.is_valid() && self.end() < limit
    }

    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.start()..=self.end()
    }
}

/// Everything the engines need to know about one section, pulled once per pass.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SectionLayoutSpec {
    /// Number of columns (default 1)
    pub number_of_columns: usize,
    /// Vertical gap between consecutive items of a column (default 0)
    pub line_spacing: f32,
    /// Horizontal gap between adjacent columns (default 0)
    pub inter_item_spacing: f32,
    /// Margins around the section (default zero)
    pub insets: SectionInsets,
    /// Header size; only the height matters (default zero, no header)
    pub header_size: Size,
    /// Footer size; only the height matters (default zero, no footer)
    pub footer_size: Size,
    /// Emit a background frame behind the section (default false)
    pub renders_background: bool,
}

impl Default for SectionLayoutSpec {
    fn default() -> Self {
        Self {
            number_of_columns: 1,
            line_spacing: 0.0,
            inter_item_spacing: 0.0,
            insets: SectionInsets::default(),
            header_size: Size::ZERO,
            footer_size: Size::ZERO,
            renders_background: false,
        }
    }
}

impl SectionLayoutSpec {
    /// Width left for content once insets are removed.
    pub fn usable_width(&self, content_width: f32) -> f32 {
        (content_width - self.insets.horizontal()).max(0.0)
    }

    /// Total inter-item spacing across a row of columns
    pub fn total_inter_item_spacing(&self) -> f32 {
        self.number_of_columns.saturating_sub(1) as f32 * self.inter_item_spacing
    }
}

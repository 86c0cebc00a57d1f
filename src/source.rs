//! Collaborator traits the layout engines pull their inputs from.
//!
//! Every method is a pure function of its arguments and must return the same
//! value for the whole of one pass. Optional inputs have default methods;
//! the documented defaults match [`SectionLayoutSpec::default`].

use crate::layout::PassStats;
use crate::types::{
    ColumnWidthSpec, GridSpan, ItemHeight, ItemIndex, SectionInsets, SectionLayoutSpec, Size,
};

/// Counts shared by both engines.
pub trait CollectionDataSource {
    fn number_of_sections(&self) -> usize;

    fn number_of_items(&self, section: usize) -> usize;

    fn number_of_columns(&self, section: usize) -> usize;
}

/// Data source for the column-flow engine.
pub trait ColumnFlowDataSource: CollectionDataSource {
    /// Explicit column for an item. `None` places it round robin
    /// (`item % number_of_columns`).
    fn column_for_item(&self, _index: ItemIndex, _number_of_columns: usize) -> Option<usize> {
        None
    }
}

/// Data source for the span-grid engine.
pub trait GridSpanDataSource: CollectionDataSource {
    fn row_span(&self, index: ItemIndex) -> GridSpan;

    fn column_span(&self, index: ItemIndex) -> GridSpan;
}

/// Per-section geometry shared by both engines.
pub trait SectionDelegate {
    /// Default: zero on every edge
    fn insets(&self, _section: usize) -> SectionInsets {
        SectionInsets::default()
    }

    /// Default: 0
    fn line_spacing(&self, _section: usize) -> f32 {
        0.0
    }

    /// Default: 0
    fn inter_item_spacing(&self, _section: usize) -> f32 {
        0.0
    }

    /// Default: zero size (no header)
    fn header_size(&self, _section: usize) -> Size {
        Size::ZERO
    }

    /// Default: zero size (no footer)
    fn footer_size(&self, _section: usize) -> Size {
        Size::ZERO
    }

    /// Default: false
    fn renders_background(&self, _section: usize) -> bool {
        false
    }
}

/// Geometry delegate for the column-flow engine.
pub trait ColumnFlowDelegate: SectionDelegate {
    /// Default: [`ColumnWidthSpec::EqualShare`]
    fn column_width(&self, _section: usize, _column: usize) -> ColumnWidthSpec {
        ColumnWidthSpec::EqualShare
    }

    /// Default: [`ItemHeight::EqualToColumnWidth`]
    fn item_height(&self, _index: ItemIndex) -> ItemHeight {
        ItemHeight::EqualToColumnWidth
    }

    /// Default: 1.0
    fn height_multiple(&self, _index: ItemIndex) -> f32 {
        1.0
    }
}

/// Geometry delegate for the span-grid engine.
pub trait GridSpanDelegate: SectionDelegate {
    /// Default: [`ItemHeight::EqualToColumnWidth`]
    fn row_height(&self, _section: usize, _row: usize) -> ItemHeight {
        ItemHeight::EqualToColumnWidth
    }
}

impl SectionLayoutSpec {
    /// Pull every per-section value from the collaborators once.
    ///
    /// Negative or NaN sizes are recorded as missing data and replaced by zero.
    pub fn resolve<S, D>(source: &S, delegate: &D, section: usize, stats: &mut PassStats) -> Self
    where
        S: CollectionDataSource + ?Sized,
        D: SectionDelegate + ?Sized,
    {
        let insets = delegate.insets(section);
        let header = delegate.header_size(section);
        let footer = delegate.footer_size(section);

        let mut size = |value: f32, what: &str| stats.sanitize(value, section, what);

        let insets = SectionInsets {
            top: size(insets.top, "top inset"),
            left: size(insets.left, "left inset"),
            bottom: size(insets.bottom, "bottom inset"),
            right: size(insets.right, "right inset"),
        };
        let line_spacing = size(delegate.line_spacing(section), "line spacing");
        let inter_item_spacing = size(delegate.inter_item_spacing(section), "inter-item spacing");
        let header_size = Size::new(
            size(header.width, "header width"),
            size(header.height, "header height"),
        );
        let footer_size = Size::new(
            size(footer.width, "footer width"),
            size(footer.height, "footer height"),
        );

        SectionLayoutSpec {
            number_of_columns: source.number_of_columns(section),
            line_spacing,
            inter_item_spacing,
            insets,
            header_size,
            footer_size,
            renders_background: delegate.renders_background(section),
        }
    }
}

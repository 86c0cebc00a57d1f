//! Span-grid layout engine.
//!
//! Items name the rows and columns they cover instead of flowing into
//! columns. Columns are uniform; an item's height is the sum of its rows'
//! heights plus the line spacing between them, and its width the sum of its
//! columns plus the inter-item spacing between them.
//!
//! Vertical placement is cursor based: an item starts at the lowest free
//! position across every column it covers, and afterwards all of those
//! columns continue below its bottom edge.

use crate::error::Result;
use crate::source::{GridSpanDataSource, GridSpanDelegate};
use crate::types::{Frame, ItemIndex, SectionLayoutSpec, Size};

use super::{ColumnCursors, LayoutCache, PassStats, SectionAccumulator};

/// Most rows a single item may span. Longer row spans are skipped as
/// missing data.
pub const MAX_ROW_SPAN: usize = 4096;

/// Runs span-grid passes for a collection of a given width.
#[derive(Debug, Clone, Copy)]
pub struct GridSpanEngine {
    content_width: f32,
}

impl GridSpanEngine {
    pub fn new(content_width: f32) -> Self {
        Self {
            content_width: content_width.max(0.0),
        }
    }

    /// Uniform column width for a section.
    pub fn column_width(&self, spec: &SectionLayoutSpec) -> f32 {
        if spec.number_of_columns == 0 {
            return 0.0;
        }
        let usable = spec.usable_width(self.content_width) - spec.total_inter_item_spacing();
        (usable / spec.number_of_columns as f32).max(0.0)
    }

    /// Invalidate `cache` and fill it with every section's frames.
    ///
    /// # Errors
    /// The grid engine has no configuration that can be inconsistent; items
    /// with malformed spans or row heights are skipped and reported in the
    /// returned stats.
    pub fn run<S, D>(&self, source: &S, delegate: &D, cache: &mut LayoutCache) -> Result<PassStats>
    where
        S: GridSpanDataSource + ?Sized,
        D: GridSpanDelegate + ?Sized,
    {
        cache.invalidate();
        let mut stats = PassStats::default();
        let mut accumulator = SectionAccumulator::new(self.content_width);

        for section in 0..source.number_of_sections() {
            let spec = SectionLayoutSpec::resolve(source, delegate, section, &mut stats);
            self.layout_section(
                section,
                &spec,
                source,
                delegate,
                &mut accumulator,
                cache,
                &mut stats,
            );
            stats.sections += 1;
        }

        cache.set_content_size(Size::new(self.content_width, accumulator.max_y()));
        Ok(stats)
    }

    #[allow(clippy::too_many_arguments)]
    fn layout_section<S, D>(
        &self,
        section: usize,
        spec: &SectionLayoutSpec,
        source: &S,
        delegate: &D,
        accumulator: &mut SectionAccumulator,
        cache: &mut LayoutCache,
        stats: &mut PassStats,
    ) where
        S: GridSpanDataSource + ?Sized,
        D: GridSpanDelegate + ?Sized,
    {
        let columns = spec.number_of_columns;
        let column_width = self.column_width(spec);
        let items_top = accumulator.begin(section, spec, cache);
        let mut cursors = ColumnCursors::new(columns, items_top);
        let mut placed_any = false;

        for item in 0..source.number_of_items(section) {
            let index = ItemIndex::new(section, item);
            let column_span = source.column_span(index);
            let row_span = source.row_span(index);

            let Some(y) = cursors.top_of(column_span) else {
                stats.skip_item(format!(
                    "item {section}/{item}: column span {column_span:?} outside 0..{columns}"
                ));
                continue;
            };
            let rows = match row_span.checked_len() {
                Some(rows) if rows <= MAX_ROW_SPAN => rows,
                Some(rows) => {
                    stats.skip_item(format!(
                        "item {section}/{item}: row span {row_span:?} covers {rows} rows \
                         (limit {MAX_ROW_SPAN})"
                    ));
                    continue;
                }
                None => {
                    stats.skip_item(format!(
                        "item {section}/{item}: row span {row_span:?} is inverted or unbounded"
                    ));
                    continue;
                }
            };

            let mut height = rows.saturating_sub(1) as f32 * spec.line_spacing;
            let mut bad_row = None;
            for row in row_span.indices() {
                let row_height = delegate.row_height(section, row).resolve(column_width);
                if row_height.is_nan() || row_height < 0.0 {
                    bad_row = Some((row, row_height));
                    break;
                }
                height += row_height;
            }
            if let Some((row, row_height)) = bad_row {
                stats.skip_item(format!(
                    "item {section}/{item}: row {row} height {row_height} is not a valid size"
                ));
                continue;
            }

            let span_columns = column_span.len();
            let width = span_columns as f32 * column_width
                + span_columns.saturating_sub(1) as f32 * spec.inter_item_spacing;
            let x = spec.insets.left
                + column_span.start() as f32 * (column_width + spec.inter_item_spacing);

            cache.insert_item(index, Frame::new(x, y, width, height));
            stats.record_placed();
            placed_any = true;
            tracing::trace!(section, item, x, y, width, height, "placed spanning item");

            let next = y + height + spec.line_spacing;
            cursors.advance(column_span, next);
            accumulator.extend_to(next);
        }

        // Trailing spacing comes off once per section, not per column.
        if placed_any {
            accumulator.retract(spec.line_spacing);
        }

        accumulator.finish(section, spec, cache);
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::source::{CollectionDataSource, SectionDelegate};
    use crate::types::{GridSpan, ItemHeight, SectionInsets, SupplementaryKind};

    /// One section; `spans[i]` is (rows, columns) of item i.
    #[derive(Default)]
    struct Grid {
        columns: usize,
        spans: Vec<(GridSpan, GridSpan)>,
        row_heights: Vec<ItemHeight>,
        line_spacing: f32,
        inter_item_spacing: f32,
        insets: SectionInsets,
        header: f32,
        footer: f32,
    }

    impl CollectionDataSource for Grid {
        fn number_of_sections(&self) -> usize {
            1
        }
        fn number_of_items(&self, _section: usize) -> usize {
            self.spans.len()
        }
        fn number_of_columns(&self, _section: usize) -> usize {
            self.columns
        }
    }

    impl GridSpanDataSource for Grid {
        fn row_span(&self, index: ItemIndex) -> GridSpan {
            self.spans[index.item].0
        }
        fn column_span(&self, index: ItemIndex) -> GridSpan {
            self.spans[index.item].1
        }
    }

    impl SectionDelegate for Grid {
        fn insets(&self, _section: usize) -> SectionInsets {
            self.insets
        }
        fn line_spacing(&self, _section: usize) -> f32 {
            self.line_spacing
        }
        fn inter_item_spacing(&self, _section: usize) -> f32 {
            self.inter_item_spacing
        }
        fn header_size(&self, _section: usize) -> Size {
            Size::new(0.0, self.header)
        }
        fn footer_size(&self, _section: usize) -> Size {
            Size::new(0.0, self.footer)
        }
    }

    impl GridSpanDelegate for Grid {
        fn row_height(&self, _section: usize, row: usize) -> ItemHeight {
            self.row_heights.get(row).copied().unwrap_or_default()
        }
    }

    fn run(grid: &Grid, width: f32) -> (LayoutCache, PassStats) {
        let mut cache = LayoutCache::new();
        let stats = GridSpanEngine::new(width)
            .run(grid, grid, &mut cache)
            .unwrap();
        (cache, stats)
    }

    #[test]
    fn test_two_column_span_synchronizes_cursors() {
        let grid = Grid {
            columns: 3,
            spans: vec![
                (GridSpan::Single(0), GridSpan::Range(0, 1)),
                (GridSpan::Single(1), GridSpan::Single(0)),
                (GridSpan::Single(1), GridSpan::Single(1)),
                (GridSpan::Single(0), GridSpan::Single(2)),
            ],
            row_heights: vec![ItemHeight::Fixed(50.0), ItemHeight::Fixed(20.0)],
            line_spacing: 10.0,
            inter_item_spacing: 6.0,
            ..Grid::default()
        };
        let (cache, _) = run(&grid, 312.0);

        // column width = (312 - 2 * 6) / 3 = 100
        let wide = cache.frame_for_item(0, 0).unwrap();
        assert_eq!(wide, Frame::new(0.0, 0.0, 206.0, 50.0));

        // both covered columns continue at 50 + line spacing
        assert_eq!(cache.frame_for_item(0, 1).unwrap().y, 60.0);
        assert_eq!(cache.frame_for_item(0, 2).unwrap().y, 60.0);
        assert_eq!(cache.frame_for_item(0, 2).unwrap().x, 106.0);
        // the uncovered column is untouched
        assert_eq!(
            cache.frame_for_item(0, 3).unwrap(),
            Frame::new(212.0, 0.0, 100.0, 50.0)
        );

        // tallest cursor 90, trailing spacing removed once
        assert_eq!(cache.content_size().height, 80.0);
    }

    #[test]
    fn test_span_starts_below_lowest_covered_column() {
        let grid = Grid {
            columns: 2,
            spans: vec![
                (GridSpan::Range(0, 1), GridSpan::Single(0)),
                (GridSpan::Single(0), GridSpan::Single(1)),
                (GridSpan::Single(2), GridSpan::Range(0, 1)),
            ],
            row_heights: vec![ItemHeight::Fixed(30.0); 3],
            line_spacing: 4.0,
            ..Grid::default()
        };
        let (cache, _) = run(&grid, 200.0);

        // two rows plus the internal gap
        assert_eq!(cache.frame_for_item(0, 0).unwrap().height, 64.0);
        // column 0 is lower (68) than column 1 (34)
        assert_eq!(cache.frame_for_item(0, 2).unwrap().y, 68.0);
        assert_eq!(cache.frame_for_item(0, 2).unwrap().width, 200.0);
    }

    #[test]
    fn test_equal_to_column_width_rows() {
        let grid = Grid {
            columns: 4,
            spans: vec![(GridSpan::Single(0), GridSpan::Single(3))],
            ..Grid::default()
        };
        let (cache, _) = run(&grid, 400.0);
        assert_eq!(
            cache.frame_for_item(0, 0),
            Some(Frame::new(300.0, 0.0, 100.0, 100.0))
        );
        assert_eq!(cache.content_size(), Size::new(400.0, 100.0));
    }

    #[test]
    fn test_insets_header_footer() {
        let grid = Grid {
            columns: 2,
            spans: vec![(GridSpan::Single(0), GridSpan::Single(1))],
            row_heights: vec![ItemHeight::Fixed(40.0)],
            line_spacing: 8.0,
            insets: SectionInsets::new(5.0, 10.0, 7.0, 10.0),
            header: 20.0,
            footer: 12.0,
            ..Grid::default()
        };
        let (cache, _) = run(&grid, 220.0);

        assert_eq!(
            cache.frame_for_item(0, 0),
            Some(Frame::new(110.0, 25.0, 100.0, 40.0))
        );
        let footer = cache
            .frame_for_supplementary(SupplementaryKind::Footer, 0)
            .unwrap();
        assert_eq!(footer, Frame::new(10.0, 65.0, 200.0, 12.0));
        assert_eq!(cache.content_size().height, 84.0);
    }

    #[test]
    fn test_empty_section_keeps_header_height() {
        let grid = Grid {
            columns: 2,
            line_spacing: 8.0,
            header: 20.0,
            ..Grid::default()
        };
        let (cache, _) = run(&grid, 100.0);
        assert_eq!(cache.content_size().height, 20.0);
    }

    #[test]
    fn test_malformed_spans_are_skipped() {
        let grid = Grid {
            columns: 2,
            spans: vec![
                (GridSpan::Single(0), GridSpan::Range(1, 2)),
                (GridSpan::Range(3, 1), GridSpan::Single(0)),
                (GridSpan::Single(0), GridSpan::Single(0)),
            ],
            row_heights: vec![ItemHeight::Fixed(10.0)],
            ..Grid::default()
        };
        let (cache, stats) = run(&grid, 100.0);

        assert_eq!(stats.items_skipped, 2);
        assert_eq!(stats.warnings.len(), 2);
        assert!(cache.frame_for_item(0, 0).is_none());
        assert!(cache.frame_for_item(0, 1).is_none());
        assert_eq!(cache.frame_for_item(0, 2).unwrap().y, 0.0);
    }

    #[test]
    fn test_unbounded_row_span_is_skipped() {
        let grid = Grid {
            columns: 1,
            spans: vec![
                (GridSpan::Range(0, usize::MAX), GridSpan::Single(0)),
                (GridSpan::Range(0, MAX_ROW_SPAN), GridSpan::Single(0)),
                (GridSpan::Single(0), GridSpan::Single(0)),
            ],
            row_heights: vec![ItemHeight::Fixed(10.0)],
            ..Grid::default()
        };
        let (cache, stats) = run(&grid, 100.0);

        assert_eq!(stats.items_skipped, 2);
        assert!(cache.frame_for_item(0, 0).is_none());
        assert!(cache.frame_for_item(0, 1).is_none());
        assert_eq!(
            cache.frame_for_item(0, 2).unwrap(),
            Frame::new(0.0, 0.0, 100.0, 10.0)
        );
        assert_eq!(cache.content_size().height, 10.0);
    }

    #[test]
    fn test_negative_row_height_skips_item() {
        let grid = Grid {
            columns: 1,
            spans: vec![(GridSpan::Range(0, 1), GridSpan::Single(0))],
            row_heights: vec![ItemHeight::Fixed(10.0), ItemHeight::Fixed(-10.0)],
            ..Grid::default()
        };
        let (cache, stats) = run(&grid, 100.0);
        assert_eq!(stats.items_skipped, 1);
        assert!(cache.frame_for_item(0, 0).is_none());
        assert_eq!(cache.content_size().height, 0.0);
    }
}

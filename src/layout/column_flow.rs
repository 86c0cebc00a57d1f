//! Column-flow layout engine.
//!
//! Items flow into a fixed number of columns per section. Each item lands in
//! its explicit column, or round robin (`item % columns`) when the data
//! source has no opinion, and stacks below the previous occupant of that
//! column. Columns keep independent vertical cursors, so cells of different
//! heights produce a masonry look.

use crate::error::Result;
use crate::source::{ColumnFlowDataSource, ColumnFlowDelegate};
use crate::types::{Frame, GridSpan, ItemIndex, SectionLayoutSpec, Size};

use super::columns::{column_offsets, resolve_column_widths};
use super::{ColumnCursors, LayoutCache, PassStats, SectionAccumulator};

/// Runs column-flow passes for a collection of a given width.
#[derive(Debug, Clone, Copy)]
pub struct ColumnFlowEngine {
    content_width: f32,
}

/// Upper bound on the placement buffer reserved up front. Item counts come
/// from the data source and are not trusted for allocation.
const MAX_PREALLOCATED_ITEMS: usize = 4096;

/// An item that passed validation and is ready to be placed.
struct Placement {
    index: ItemIndex,
    column: usize,
    height: f32,
}

impl ColumnFlowEngine {
    pub fn new(content_width: f32) -> Self {
        Self {
            content_width: content_width.max(0.0),
        }
    }

    /// Invalidate `cache` and fill it with every section's frames.
    ///
    /// # Errors
    /// Returns a configuration error as soon as a section's column widths
    /// fail validation. Frames written before that point stay in `cache`;
    /// callers that publish results should discard it.
    pub fn run<S, D>(&self, source: &S, delegate: &D, cache: &mut LayoutCache) -> Result<PassStats>
    where
        S: ColumnFlowDataSource + ?Sized,
        D: ColumnFlowDelegate + ?Sized,
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
            )?;
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
    ) -> Result<()>
    where
        S: ColumnFlowDataSource + ?Sized,
        D: ColumnFlowDelegate + ?Sized,
    {
        let columns = spec.number_of_columns;
        let usable =
            (spec.usable_width(self.content_width) - spec.total_inter_item_spacing()).max(0.0);
        let width_specs: Vec<_> = (0..columns)
            .map(|column| delegate.column_width(section, column))
            .collect();
        let widths = resolve_column_widths(section, usable, &width_specs)?;
        let offsets = column_offsets(&widths, spec.inter_item_spacing);

        let items_top = accumulator.begin(section, spec, cache);

        let placements = collect_placements(section, spec, &widths, source, delegate, stats);

        // Last occupant of every column gets no trailing line spacing.
        let mut last_in_column: Vec<Option<usize>> = vec![None; columns];
        for placement in &placements {
            if let Some(last) = last_in_column.get_mut(placement.column) {
                *last = Some(placement.index.item);
            }
        }

        let mut cursors = ColumnCursors::new(columns, items_top);
        for placement in placements {
            let column = placement.column;
            let (Some(width), Some(offset), Some(y)) = (
                widths.get(column).copied(),
                offsets.get(column).copied(),
                cursors.get(column),
            ) else {
                continue;
            };

            let frame = Frame::new(spec.insets.left + offset, y, width, placement.height);
            cache.insert_item(placement.index, frame);
            stats.record_placed();
            tracing::trace!(
                section,
                item = placement.index.item,
                column,
                y,
                "placed item"
            );

            let is_last =
                last_in_column.get(column).copied().flatten() == Some(placement.index.item);
            let spacing = if is_last { 0.0 } else { spec.line_spacing };
            let next = y + placement.height + spacing;
            cursors.advance(GridSpan::Single(column), next);
            accumulator.extend_to(next);
        }

        accumulator.finish(section, spec, cache);
        Ok(())
    }
}

/// Query every item of a section once and keep the ones that can be placed.
fn collect_placements<S, D>(
    section: usize,
    spec: &SectionLayoutSpec,
    widths: &[f32],
    source: &S,
    delegate: &D,
    stats: &mut PassStats,
) -> Vec<Placement>
where
    S: ColumnFlowDataSource + ?Sized,
    D: ColumnFlowDelegate + ?Sized,
{
    let columns = spec.number_of_columns;
    let count = source.number_of_items(section);
    let mut placements = Vec::with_capacity(count.min(MAX_PREALLOCATED_ITEMS));

    for item in 0..count {
        let index = ItemIndex::new(section, item);
        if columns == 0 {
            stats.skip_item(format!("item {section}/{item}: section has no columns"));
            continue;
        }

        let column = source
            .column_for_item(index, columns)
            .unwrap_or(item % columns);
        let Some(column_width) = widths.get(column).copied() else {
            stats.skip_item(format!(
                "item {section}/{item}: column {column} out of range (0..{columns})"
            ));
            continue;
        };

        let multiple = delegate.height_multiple(index);
        let height = delegate
            .item_height(index)
            .with_multiple(column_width, multiple, spec.line_spacing);
        if height.is_nan() || height < 0.0 {
            stats.skip_item(format!(
                "item {section}/{item}: height {height} (multiple {multiple}) is not a valid size"
            ));
            continue;
        }

        placements.push(Placement {
            index,
            column,
            height,
        });
    }

    placements
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
    use crate::error::LayoutError;
    use crate::source::{CollectionDataSource, SectionDelegate};
    use crate::types::{ColumnWidthSpec, ItemHeight, SectionInsets, SupplementaryKind};

    /// Single-section column collection with per-test knobs.
    #[derive(Default)]
    struct Flow {
        items: usize,
        columns: usize,
        widths: Vec<ColumnWidthSpec>,
        heights: Vec<ItemHeight>,
        multiples: Vec<f32>,
        explicit: Vec<Option<usize>>,
        line_spacing: f32,
        inter_item_spacing: f32,
        insets: SectionInsets,
        header: f32,
        footer: f32,
        background: bool,
    }

    impl CollectionDataSource for Flow {
        fn number_of_sections(&self) -> usize {
            1
        }
        fn number_of_items(&self, _section: usize) -> usize {
            self.items
        }
        fn number_of_columns(&self, _section: usize) -> usize {
            self.columns
        }
    }

    impl ColumnFlowDataSource for Flow {
        fn column_for_item(&self, index: ItemIndex, _columns: usize) -> Option<usize> {
            self.explicit.get(index.item).copied().flatten()
        }
    }

    impl SectionDelegate for Flow {
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
        fn renders_background(&self, _section: usize) -> bool {
            self.background
        }
    }

    impl ColumnFlowDelegate for Flow {
        fn column_width(&self, _section: usize, column: usize) -> ColumnWidthSpec {
            self.widths.get(column).copied().unwrap_or_default()
        }
        fn item_height(&self, index: ItemIndex) -> ItemHeight {
            self.heights.get(index.item).copied().unwrap_or_default()
        }
        fn height_multiple(&self, index: ItemIndex) -> f32 {
            self.multiples.get(index.item).copied().unwrap_or(1.0)
        }
    }

    fn run(flow: &Flow, width: f32) -> (LayoutCache, PassStats) {
        let mut cache = LayoutCache::new();
        let stats = ColumnFlowEngine::new(width)
            .run(flow, flow, &mut cache)
            .unwrap();
        (cache, stats)
    }

    #[test]
    fn test_square_grid_of_equal_columns() {
        let flow = Flow {
            items: 8,
            columns: 4,
            ..Flow::default()
        };
        let (cache, stats) = run(&flow, 400.0);

        assert_eq!(stats.items_placed, 8);
        assert_eq!(cache.content_size(), Size::new(400.0, 200.0));
        for item in 0..8 {
            let col = (item % 4) as f32;
            let row = (item / 4) as f32;
            assert_eq!(
                cache.frame_for_item(0, item),
                Some(Frame::new(col * 100.0, row * 100.0, 100.0, 100.0))
            );
        }
    }

    #[test]
    fn test_spacing_insets_header_footer() {
        let flow = Flow {
            items: 3,
            columns: 2,
            heights: vec![ItemHeight::Fixed(40.0); 3],
            line_spacing: 5.0,
            inter_item_spacing: 10.0,
            insets: SectionInsets::new(8.0, 20.0, 12.0, 20.0),
            header: 30.0,
            footer: 16.0,
            ..Flow::default()
        };
        let (cache, _) = run(&flow, 250.0);

        // usable = 250 - 40 insets - 10 spacing = 200, two columns of 100
        assert_eq!(
            cache.frame_for_item(0, 0),
            Some(Frame::new(20.0, 38.0, 100.0, 40.0))
        );
        assert_eq!(
            cache.frame_for_item(0, 1),
            Some(Frame::new(130.0, 38.0, 100.0, 40.0))
        );
        assert_eq!(
            cache.frame_for_item(0, 2),
            Some(Frame::new(20.0, 83.0, 100.0, 40.0))
        );

        let footer = cache
            .frame_for_supplementary(SupplementaryKind::Footer, 0)
            .unwrap();
        assert_eq!(footer, Frame::new(20.0, 123.0, 210.0, 16.0));
        assert_eq!(cache.content_size().height, 151.0);
    }

    #[test]
    fn test_explicit_columns_and_last_occupant_spacing() {
        let flow = Flow {
            items: 4,
            columns: 2,
            heights: vec![ItemHeight::Fixed(10.0); 4],
            explicit: vec![Some(0), Some(0), Some(0), Some(1)],
            line_spacing: 4.0,
            ..Flow::default()
        };
        let (cache, _) = run(&flow, 200.0);

        assert_eq!(cache.frame_for_item(0, 1).unwrap().y, 14.0);
        assert_eq!(cache.frame_for_item(0, 2).unwrap().y, 28.0);
        assert_eq!(cache.frame_for_item(0, 3).unwrap().y, 0.0);
        // no spacing after item 2, the last occupant of column 0
        assert_eq!(cache.content_size().height, 38.0);
    }

    #[test]
    fn test_height_multiple() {
        let flow = Flow {
            items: 3,
            columns: 2,
            heights: vec![ItemHeight::Fixed(50.0); 3],
            multiples: vec![2.0, 1.0, 1.0],
            line_spacing: 10.0,
            ..Flow::default()
        };
        let (cache, _) = run(&flow, 200.0);

        assert_eq!(cache.frame_for_item(0, 0).unwrap().height, 110.0);
        // item 2 goes round robin to column 0, below the double-height item
        assert_eq!(cache.frame_for_item(0, 2).unwrap().y, 120.0);
    }

    #[test]
    fn test_bad_items_are_skipped() {
        let flow = Flow {
            items: 3,
            columns: 2,
            heights: vec![
                ItemHeight::Fixed(20.0),
                ItemHeight::Fixed(f32::NAN),
                ItemHeight::Fixed(20.0),
            ],
            explicit: vec![None, None, Some(7)],
            ..Flow::default()
        };
        let (cache, stats) = run(&flow, 200.0);

        assert_eq!(stats.items_placed, 1);
        assert_eq!(stats.items_skipped, 2);
        assert!(cache.frame_for_item(0, 1).is_none());
        assert!(cache.frame_for_item(0, 2).is_none());
        assert_eq!(cache.content_size().height, 20.0);
    }

    #[test]
    fn test_fixed_overflow_stops_before_any_frame() {
        let flow = Flow {
            items: 2,
            columns: 2,
            widths: vec![ColumnWidthSpec::Fixed(300.0), ColumnWidthSpec::Fixed(300.0)],
            header: 20.0,
            ..Flow::default()
        };
        let mut cache = LayoutCache::new();
        let err = ColumnFlowEngine::new(400.0)
            .run(&flow, &flow, &mut cache)
            .unwrap_err();

        assert!(matches!(err, LayoutError::FixedWidthOverflow { .. }));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_background_spans_section() {
        let flow = Flow {
            items: 2,
            columns: 2,
            insets: SectionInsets::new(10.0, 10.0, 10.0, 10.0),
            background: true,
            ..Flow::default()
        };
        let (cache, _) = run(&flow, 220.0);
        let background = cache
            .attributes_for_supplementary(SupplementaryKind::Background, 0)
            .unwrap();

        assert_eq!(background.frame, Frame::new(0.0, 0.0, 220.0, 120.0));
        assert_eq!(background.z_index, -1);
    }
}

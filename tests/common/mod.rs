//! Shared fixtures for the integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation
)]

use flexlayout::{
    CollectionConfig, ColumnWidthSpec, GridSpan, ItemConfig, ItemHeight, LayoutKind,
    SectionConfig, SectionInsets, SectionLayoutSpec, Size,
};

/// Deterministic xorshift generator for property-style sweeps.
pub struct XorShift(u64);

impl XorShift {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    /// Uniform-ish value in `0..n`
    pub fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }

    pub fn below_usize(&mut self, n: usize) -> usize {
        self.below(n as u64) as usize
    }

    /// Whole number in `lo..=hi` as f32
    pub fn whole(&mut self, lo: u32, hi: u32) -> f32 {
        (lo + self.below(u64::from(hi - lo + 1)) as u32) as f32
    }

    pub fn chance(&mut self, percent: u64) -> bool {
        self.below(100) < percent
    }

    /// Whole number in `lo..=hi` half of the time, otherwise 0
    pub fn maybe(&mut self, lo: u32, hi: u32) -> f32 {
        if self.chance(50) {
            self.whole(lo, hi)
        } else {
            0.0
        }
    }
}

/// Section spec with the given column count and everything else default.
pub fn spec(columns: usize) -> SectionLayoutSpec {
    SectionLayoutSpec {
        number_of_columns: columns,
        ..SectionLayoutSpec::default()
    }
}

/// Column-flow collection with one section of `items` default items.
pub fn column_collection(width: f32, columns: usize, items: usize) -> CollectionConfig {
    CollectionConfig {
        content_width: width,
        layout: LayoutKind::ColumnFlow,
        sections: vec![SectionConfig {
            spec: spec(columns),
            item_count: items,
            ..SectionConfig::default()
        }],
    }
}

/// Span-grid collection with one section.
pub fn grid_collection(
    width: f32,
    columns: usize,
    row_heights: Vec<ItemHeight>,
    spans: &[(GridSpan, GridSpan)],
) -> CollectionConfig {
    CollectionConfig {
        content_width: width,
        layout: LayoutKind::GridSpan,
        sections: vec![SectionConfig {
            spec: spec(columns),
            row_heights,
            items: spans
                .iter()
                .map(|&(row_span, column_span)| ItemConfig {
                    row_span,
                    column_span,
                    ..ItemConfig::default()
                })
                .collect(),
            ..SectionConfig::default()
        }],
    }
}

/// Random column-flow section: mixed widths, heights, multiples and spacing.
pub fn random_column_section(rng: &mut XorShift) -> SectionConfig {
    let columns = 1 + rng.below_usize(5);
    let widths = (0..columns)
        .map(|_| match rng.below(4) {
            0 => ColumnWidthSpec::Fixed(rng.whole(10, 60)),
            1 => ColumnWidthSpec::Ratio(rng.whole(5, 15) / 100.0),
            _ => ColumnWidthSpec::EqualShare,
        })
        .collect();
    let items = (0..rng.below_usize(30))
        .map(|_| ItemConfig {
            column: if rng.chance(25) {
                Some(rng.below_usize(columns))
            } else {
                None
            },
            height: if rng.chance(50) {
                ItemHeight::Fixed(rng.whole(5, 120))
            } else {
                ItemHeight::EqualToColumnWidth
            },
            height_multiple: if rng.chance(20) { 2.0 } else { 1.0 },
            ..ItemConfig::default()
        })
        .collect();

    SectionConfig {
        spec: SectionLayoutSpec {
            number_of_columns: columns,
            line_spacing: rng.whole(0, 12),
            inter_item_spacing: rng.whole(0, 8),
            insets: SectionInsets::new(
                rng.whole(0, 20),
                rng.whole(0, 20),
                rng.whole(0, 20),
                rng.whole(0, 20),
            ),
            header_size: Size::new(0.0, rng.maybe(10, 40)),
            footer_size: Size::new(0.0, rng.maybe(10, 40)),
            renders_background: rng.chance(50),
        },
        columns: widths,
        items,
        ..SectionConfig::default()
    }
}

/// Random span-grid section with in-range spans.
pub fn random_grid_section(rng: &mut XorShift) -> SectionConfig {
    let columns = 1 + rng.below_usize(5);
    let rows = 1 + rng.below_usize(6);
    let row_heights = (0..rows)
        .map(|_| {
            if rng.chance(30) {
                ItemHeight::EqualToColumnWidth
            } else {
                ItemHeight::Fixed(rng.whole(10, 80))
            }
        })
        .collect();
    let items = (0..rng.below_usize(25))
        .map(|_| {
            let row = rng.below_usize(rows);
            let row_end = row + rng.below_usize(rows - row);
            let column = rng.below_usize(columns);
            let column_end = column + rng.below_usize(columns - column);
            ItemConfig {
                row_span: span(row, row_end),
                column_span: span(column, column_end),
                ..ItemConfig::default()
            }
        })
        .collect();

    SectionConfig {
        spec: SectionLayoutSpec {
            number_of_columns: columns,
            line_spacing: rng.whole(0, 12),
            inter_item_spacing: rng.whole(0, 8),
            insets: SectionInsets::new(rng.whole(0, 10), rng.whole(0, 10), rng.whole(0, 10), 0.0),
            header_size: Size::new(0.0, if rng.chance(50) { 24.0 } else { 0.0 }),
            ..SectionLayoutSpec::default()
        },
        row_heights,
        items,
        ..SectionConfig::default()
    }
}

fn span(start: usize, end: usize) -> GridSpan {
    if start == end {
        GridSpan::Single(start)
    } else {
        GridSpan::Range(start, end)
    }
}

//! Benchmarks for layout pass and query performance.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flexlayout::{
    CollectionConfig, CollectionLayout, ColumnWidthSpec, Frame, GridSpan, ItemConfig, ItemHeight,
    LayoutKind, SectionConfig, SectionInsets, SectionLayoutSpec, Size, Viewport,
};

/// Masonry-style collection: mixed column widths and varying item heights
fn column_config(sections: usize, items: usize) -> CollectionConfig {
    let section = SectionConfig {
        spec: SectionLayoutSpec {
            number_of_columns: 4,
            line_spacing: 8.0,
            inter_item_spacing: 8.0,
            insets: SectionInsets::uniform(12.0),
            header_size: Size::new(0.0, 44.0),
            footer_size: Size::new(0.0, 20.0),
            renders_background: true,
        },
        columns: vec![
            ColumnWidthSpec::Fixed(120.0),
            ColumnWidthSpec::Ratio(0.25),
            ColumnWidthSpec::EqualShare,
            ColumnWidthSpec::EqualShare,
        ],
        items: (0..items)
            .map(|i| ItemConfig {
                height: ItemHeight::Fixed(40.0 + (i % 7) as f32 * 15.0),
                ..ItemConfig::default()
            })
            .collect(),
        ..SectionConfig::default()
    };
    CollectionConfig {
        content_width: 1024.0,
        layout: LayoutKind::ColumnFlow,
        sections: vec![section; sections],
    }
}

/// Span grid where every third item covers two columns
fn grid_config(sections: usize, items: usize) -> CollectionConfig {
    let section = SectionConfig {
        spec: SectionLayoutSpec {
            number_of_columns: 6,
            line_spacing: 4.0,
            inter_item_spacing: 4.0,
            header_size: Size::new(0.0, 32.0),
            ..SectionLayoutSpec::default()
        },
        row_heights: vec![ItemHeight::Fixed(60.0), ItemHeight::EqualToColumnWidth],
        items: (0..items)
            .map(|i| {
                let column = i % 5;
                ItemConfig {
                    row_span: GridSpan::Single(i % 2),
                    column_span: if i % 3 == 0 {
                        GridSpan::Range(column, column + 1)
                    } else {
                        GridSpan::Single(column)
                    },
                    ..ItemConfig::default()
                }
            })
            .collect(),
        ..SectionConfig::default()
    };
    CollectionConfig {
        content_width: 1024.0,
        layout: LayoutKind::GridSpan,
        sections: vec![section; sections],
    }
}

/// Full column-flow pass over 10k items
fn bench_column_pass(c: &mut Criterion) {
    let config = column_config(10, 1_000);
    let mut group = c.benchmark_group("column_flow");
    group.throughput(Throughput::Elements(10_000));

    group.bench_function("prepare_10x1000", |b| {
        let mut layout = CollectionLayout::new();
        b.iter(|| {
            config
                .layout_into(black_box(&mut layout))
                .expect("Failed to lay out")
        })
    });

    group.finish();
}

/// Full span-grid pass over 10k items
fn bench_grid_pass(c: &mut Criterion) {
    let config = grid_config(10, 1_000);
    let mut group = c.benchmark_group("grid_span");
    group.throughput(Throughput::Elements(10_000));

    group.bench_function("prepare_10x1000", |b| {
        let mut layout = CollectionLayout::new();
        b.iter(|| {
            config
                .layout_into(black_box(&mut layout))
                .expect("Failed to lay out")
        })
    });

    group.finish();
}

/// Compare pass cost across collection sizes
fn bench_collection_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_size_comparison");

    for items in [100, 1_000, 10_000] {
        let config = column_config(1, items);
        group.throughput(Throughput::Elements(items as u64));
        group.bench_with_input(BenchmarkId::new("column_flow", items), &config, |b, config| {
            b.iter(|| black_box(config).layout().expect("Failed to lay out"))
        });
    }

    group.finish();
}

/// Region and viewport queries against a populated cache
fn bench_queries(c: &mut Criterion) {
    let (layout, _) = column_config(10, 1_000).layout().expect("Failed to lay out");
    let mut viewport = Viewport::new(1024.0, 768.0);
    viewport.set_scroll(
        0.0,
        layout.content_size().height / 2.0,
        layout.content_size(),
    );

    c.bench_function("elements_intersecting", |b| {
        let region = Frame::new(0.0, 5_000.0, 1024.0, 768.0);
        b.iter(|| layout.elements_intersecting(black_box(&region)))
    });

    c.bench_function("visible_elements", |b| {
        b.iter(|| layout.visible_elements(black_box(&viewport)))
    });
}

criterion_group!(
    benches,
    bench_column_pass,
    bench_grid_pass,
    bench_collection_sizes,
    bench_queries,
);

criterion_main!(benches);

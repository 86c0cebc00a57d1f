//! Layout pass driver.
//!
//! [`CollectionLayout`] owns the published [`LayoutCache`]. A pass runs into
//! a fresh staging cache and only replaces the published one when it
//! completes, so a pass rejected for bad configuration leaves the previous
//! results visible.

use crate::error::{LayoutError, Result};
use crate::source::{ColumnFlowDataSource, ColumnFlowDelegate, GridSpanDataSource, GridSpanDelegate};
use crate::types::{Frame, LayoutAttributes, Point, Size, SupplementaryKind};

use super::{ColumnFlowEngine, GridSpanEngine, LayoutCache, Viewport};

/// Outcome of one pass.
#[derive(Debug, Default)]
pub struct PassStats {
    /// Sections laid out
    pub sections: usize,
    /// Items that received a frame
    pub items_placed: usize,
    /// Items skipped because of missing or malformed data
    pub items_skipped: usize,
    /// Missing-data diagnostics collected during the pass
    pub warnings: Vec<LayoutError>,
}

impl PassStats {
    pub fn record_placed(&mut self) {
        self.items_placed += 1;
    }

    /// Record an item that gets no frame.
    pub fn skip_item(&mut self, reason: String) {
        self.items_skipped += 1;
        self.warn(reason);
    }

    /// Record a missing-data diagnostic without skipping anything.
    pub fn warn(&mut self, reason: String) {
        tracing::warn!("{reason}");
        self.warnings.push(LayoutError::MissingData(reason));
    }

    /// Replace a negative or NaN size with zero, recording a diagnostic.
    pub fn sanitize(&mut self, value: f32, section: usize, what: &str) -> f32 {
        if value.is_nan() || value < 0.0 {
            self.warn(format!("section {section}: {what} {value} treated as 0"));
            0.0
        } else {
            value
        }
    }
}

/// A collection's layout: the last published pass and the queries against it.
#[derive(Debug, Default)]
pub struct CollectionLayout {
    cache: LayoutCache,
}

impl CollectionLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a column-flow pass for a collection `content_width` wide.
    ///
    /// # Errors
    /// Returns a configuration error if any section's column widths are
    /// inconsistent. The previously published frames stay in place.
    pub fn prepare_columns<S, D>(
        &mut self,
        content_width: f32,
        source: &S,
        delegate: &D,
    ) -> Result<PassStats>
    where
        S: ColumnFlowDataSource + ?Sized,
        D: ColumnFlowDelegate + ?Sized,
    {
        let mut staging = LayoutCache::new();
        let result = ColumnFlowEngine::new(content_width).run(source, delegate, &mut staging);
        self.publish(staging, result)
    }

    /// Run a span-grid pass for a collection `content_width` wide.
    ///
    /// # Errors
    /// Kept for symmetry with [`CollectionLayout::prepare_columns`]; the grid
    /// engine itself reports malformed spans as skipped items.
    pub fn prepare_grid<S, D>(
        &mut self,
        content_width: f32,
        source: &S,
        delegate: &D,
    ) -> Result<PassStats>
    where
        S: GridSpanDataSource + ?Sized,
        D: GridSpanDelegate + ?Sized,
    {
        let mut staging = LayoutCache::new();
        let result = GridSpanEngine::new(content_width).run(source, delegate, &mut staging);
        self.publish(staging, result)
    }

    fn publish(&mut self, staging: LayoutCache, result: Result<PassStats>) -> Result<PassStats> {
        match result {
            Ok(stats) => {
                tracing::debug!(
                    sections = stats.sections,
                    placed = stats.items_placed,
                    skipped = stats.items_skipped,
                    height = staging.content_size().height,
                    "layout pass complete"
                );
                self.cache = staging;
                Ok(stats)
            }
            Err(err) => {
                tracing::warn!("layout pass rejected: {err}");
                Err(err)
            }
        }
    }

    /// Drop all published frames.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    pub fn cache(&self) -> &LayoutCache {
        &self.cache
    }

    pub fn content_size(&self) -> Size {
        self.cache.content_size()
    }

    pub fn frame_for_item(&self, section: usize, item: usize) -> Option<Frame> {
        self.cache.frame_for_item(section, item)
    }

    pub fn frame_for_supplementary(
        &self,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<Frame> {
        self.cache.frame_for_supplementary(kind, section)
    }

    pub fn elements_intersecting(&self, region: &Frame) -> Vec<LayoutAttributes> {
        self.cache.elements_intersecting(region)
    }

    pub fn element_at(&self, point: Point) -> Option<LayoutAttributes> {
        self.cache.element_at(point)
    }

    /// Elements visible through `viewport`.
    pub fn visible_elements(&self, viewport: &Viewport) -> Vec<LayoutAttributes> {
        self.cache.elements_intersecting(&viewport.visible_region())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::source::{CollectionDataSource, SectionDelegate};
    use crate::types::ColumnWidthSpec;

    struct Columns {
        fixed: f32,
    }

    impl CollectionDataSource for Columns {
        fn number_of_sections(&self) -> usize {
            1
        }
        fn number_of_items(&self, _section: usize) -> usize {
            4
        }
        fn number_of_columns(&self, _section: usize) -> usize {
            2
        }
    }

    impl ColumnFlowDataSource for Columns {}
    impl SectionDelegate for Columns {}

    impl ColumnFlowDelegate for Columns {
        fn column_width(&self, _section: usize, column: usize) -> ColumnWidthSpec {
            if column == 0 {
                ColumnWidthSpec::Fixed(self.fixed)
            } else {
                ColumnWidthSpec::EqualShare
            }
        }
    }

    #[test]
    fn test_rejected_pass_keeps_previous_frames() {
        let mut layout = CollectionLayout::new();
        let ok = Columns { fixed: 100.0 };
        layout.prepare_columns(300.0, &ok, &ok).unwrap();
        let before = layout.cache().clone();
        assert_eq!(before.item_count(), 4);

        let bad = Columns { fixed: 500.0 };
        let err = layout.prepare_columns(300.0, &bad, &bad).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(layout.cache(), &before);
    }

    #[test]
    fn test_sanitize_records_warning() {
        let mut stats = PassStats::default();
        assert_eq!(stats.sanitize(-3.0, 0, "line spacing"), 0.0);
        assert_eq!(stats.sanitize(3.0, 0, "line spacing"), 3.0);
        assert_eq!(stats.warnings.len(), 1);
        assert!(matches!(stats.warnings[0], LayoutError::MissingData(_)));
    }
}

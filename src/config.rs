//! Declarative collection description.
//!
//! A [`CollectionConfig`] carries everything both engines ask their
//! collaborators for, so a whole collection can be described in JSON and
//! laid out without writing trait impls. Omitted fields take the same
//! defaults as the collaborator traits.
//!
//! ```json
//! {
//!   "content_width": 400,
//!   "layout": "column_flow",
//!   "sections": [
//!     {
//!       "number_of_columns": 3,
//!       "line_spacing": 8,
//!       "header_size": { "width": 0, "height": 40 },
//!       "columns": [{ "fixed": 100 }, { "ratio": 0.5 }, "equal_share"],
//!       "item_count": 12
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{CollectionLayout, PassStats};
use crate::source::{
    CollectionDataSource, ColumnFlowDataSource, ColumnFlowDelegate, GridSpanDataSource,
    GridSpanDelegate, SectionDelegate,
};
use crate::types::{
    ColumnWidthSpec, GridSpan, ItemHeight, ItemIndex, SectionInsets, SectionLayoutSpec, Size,
};

/// Which engine lays the collection out.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    #[default]
    ColumnFlow,
    GridSpan,
}

/// A whole collection: width, engine and sections.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct CollectionConfig {
    pub content_width: f32,
    pub layout: LayoutKind,
    pub sections: Vec<SectionConfig>,
}

/// One section: its spec plus per-column, per-row and per-item values.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SectionConfig {
    #[serde(flatten)]
    pub spec: SectionLayoutSpec,
    /// Column width specs (column engine); missing columns are equal-share
    pub columns: Vec<ColumnWidthSpec>,
    /// Row heights (grid engine); missing rows match the column width
    pub row_heights: Vec<ItemHeight>,
    /// Explicit items
    pub items: Vec<ItemConfig>,
    /// Pads the section with default items up to this count
    pub item_count: usize,
}

/// Per-item values. Column-flow reads `column`, `height` and
/// `height_multiple`; span-grid reads the spans.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ItemConfig {
    pub column: Option<usize>,
    pub height: ItemHeight,
    pub height_multiple: f32,
    pub row_span: GridSpan,
    pub column_span: GridSpan,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            column: None,
            height: ItemHeight::EqualToColumnWidth,
            height_multiple: 1.0,
            row_span: GridSpan::default(),
            column_span: GridSpan::default(),
        }
    }
}

impl SectionConfig {
    pub fn item_total(&self) -> usize {
        self.items.len().max(self.item_count)
    }

    fn item(&self, item: usize) -> ItemConfig {
        self.items.get(item).copied().unwrap_or_default()
    }
}

impl CollectionConfig {
    /// Parse a configuration document.
    ///
    /// # Errors
    /// Returns [`crate::LayoutError::Json`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize back to pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`crate::LayoutError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Run one pass with the configured engine.
    ///
    /// # Errors
    /// Returns a configuration error if a section's column widths are
    /// inconsistent.
    pub fn layout(&self) -> Result<(CollectionLayout, PassStats)> {
        let mut layout = CollectionLayout::new();
        let stats = self.layout_into(&mut layout)?;
        Ok((layout, stats))
    }

    /// Run one pass into an existing layout.
    ///
    /// # Errors
    /// Same as [`CollectionConfig::layout`]; `layout` keeps its previous
    /// frames on error.
    pub fn layout_into(&self, layout: &mut CollectionLayout) -> Result<PassStats> {
        match self.layout {
            LayoutKind::ColumnFlow => layout.prepare_columns(self.content_width, self, self),
            LayoutKind::GridSpan => layout.prepare_grid(self.content_width, self, self),
        }
    }

    fn section(&self, section: usize) -> Option<&SectionConfig> {
        self.sections.get(section)
    }

    fn spec(&self, section: usize) -> SectionLayoutSpec {
        self.section(section).map(|s| s.spec).unwrap_or_default()
    }

    fn item(&self, index: ItemIndex) -> ItemConfig {
        self.section(index.section)
            .map(|s| s.item(index.item))
            .unwrap_or_default()
    }
}

impl CollectionDataSource for CollectionConfig {
    fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.section(section).map_or(0, SectionConfig::item_total)
    }

    fn number_of_columns(&self, section: usize) -> usize {
        self.spec(section).number_of_columns
    }
}

impl ColumnFlowDataSource for CollectionConfig {
    fn column_for_item(&self, index: ItemIndex, _number_of_columns: usize) -> Option<usize> {
        self.item(index).column
    }
}

impl GridSpanDataSource for CollectionConfig {
    fn row_span(&self, index: ItemIndex) -> GridSpan {
        self.item(index).row_span
    }

    fn column_span(&self, index: ItemIndex) -> GridSpan {
        self.item(index).column_span
    }
}

impl SectionDelegate for CollectionConfig {
    fn insets(&self, section: usize) -> SectionInsets {
        self.spec(section).insets
    }

    fn line_spacing(&self, section: usize) -> f32 {
        self.spec(section).line_spacing
    }

    fn inter_item_spacing(&self, section: usize) -> f32 {
        self.spec(section).inter_item_spacing
    }

    fn header_size(&self, section: usize) -> Size {
        self.spec(section).header_size
    }

    fn footer_size(&self, section: usize) -> Size {
        self.spec(section).footer_size
    }

    fn renders_background(&self, section: usize) -> bool {
        self.spec(section).renders_background
    }
}

impl ColumnFlowDelegate for CollectionConfig {
    fn column_width(&self, section: usize, column: usize) -> ColumnWidthSpec {
        self.section(section)
            .and_then(|s| s.columns.get(column).copied())
            .unwrap_or_default()
    }

    fn item_height(&self, index: ItemIndex) -> ItemHeight {
        self.item(index).height
    }

    fn height_multiple(&self, index: ItemIndex) -> f32 {
        self.item(index).height_multiple
    }
}

impl GridSpanDelegate for CollectionConfig {
    fn row_height(&self, section: usize, row: usize) -> ItemHeight {
        self.section(section)
            .and_then(|s| s.row_heights.get(row).copied())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::{Frame, SupplementaryKind};

    #[test]
    fn test_parse_and_layout_columns() {
        let config = CollectionConfig::from_json(
            r#"{
                "content_width": 400,
                "sections": [{
                    "number_of_columns": 3,
                    "header_size": { "width": 0, "height": 40 },
                    "columns": [{ "fixed": 100 }, { "ratio": 0.5 }, "equal_share"],
                    "items": [{ "height": { "fixed": 30 } }],
                    "item_count": 3
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(config.layout, LayoutKind::ColumnFlow);
        assert_eq!(config.number_of_items(0), 3);

        let (layout, stats) = config.layout().unwrap();
        assert_eq!(stats.items_placed, 3);
        assert_eq!(
            layout.frame_for_item(0, 0),
            Some(Frame::new(0.0, 40.0, 100.0, 30.0))
        );
        assert_eq!(
            layout.frame_for_item(0, 1),
            Some(Frame::new(100.0, 40.0, 150.0, 150.0))
        );
        assert_eq!(
            layout.frame_for_item(0, 2),
            Some(Frame::new(250.0, 40.0, 150.0, 150.0))
        );
        assert!(layout
            .frame_for_supplementary(SupplementaryKind::Header, 0)
            .is_some());
    }

    #[test]
    fn test_parse_grid() {
        let config = CollectionConfig::from_json(
            r#"{
                "content_width": 300,
                "layout": "grid_span",
                "sections": [{
                    "number_of_columns": 3,
                    "row_heights": [{ "fixed": 50 }],
                    "items": [{ "row_span": { "single": 0 }, "column_span": { "range": [0, 1] } }]
                }]
            }"#,
        )
        .unwrap();

        let (layout, _) = config.layout().unwrap();
        assert_eq!(
            layout.frame_for_item(0, 0),
            Some(Frame::new(0.0, 0.0, 200.0, 50.0))
        );
        assert_eq!(layout.content_size(), Size::new(300.0, 50.0));
    }

    #[test]
    fn test_malformed_json() {
        let err = CollectionConfig::from_json("{ \"sections\": 3 }").unwrap_err();
        assert!(matches!(err, crate::LayoutError::Json(_)));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_json_round_trip_keeps_layout() {
        let mut config = CollectionConfig {
            content_width: 200.0,
            ..CollectionConfig::default()
        };
        config.sections.push(SectionConfig {
            spec: SectionLayoutSpec {
                number_of_columns: 2,
                ..SectionLayoutSpec::default()
            },
            item_count: 4,
            ..SectionConfig::default()
        });

        let json = config.to_json().unwrap();
        let reparsed = CollectionConfig::from_json(&json).unwrap();
        assert_eq!(reparsed, config);
    }
}

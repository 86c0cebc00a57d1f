//! flexlayout - geometry solver for sectioned, scrollable collections
//!
//! Computes the frames of items, headers, footers and section backgrounds
//! for two arrangements:
//! - Column flow: items flow into columns of fixed, ratio or equal-share
//!   width, each column stacking independently (masonry)
//! - Span grid: items cover explicit row and column ranges of a uniform grid
//!
//! A pass pulls counts and sizes from collaborator traits, rebuilds the
//! attribute cache from scratch and publishes a content size. Between passes
//! the cache answers item, supplementary, point and region queries.
//!
//! # Usage
//!
//! ```
//! use flexlayout::{CollectionDataSource, ColumnFlowDataSource, ColumnFlowDelegate,
//!     CollectionLayout, Frame, SectionDelegate};
//!
//! struct Photos;
//!
//! impl CollectionDataSource for Photos {
//!     fn number_of_sections(&self) -> usize { 1 }
//!     fn number_of_items(&self, _section: usize) -> usize { 8 }
//!     fn number_of_columns(&self, _section: usize) -> usize { 4 }
//! }
//! impl ColumnFlowDataSource for Photos {}
//! impl SectionDelegate for Photos {}
//! impl ColumnFlowDelegate for Photos {}
//!
//! let mut layout = CollectionLayout::new();
//! layout.prepare_columns(400.0, &Photos, &Photos)?;
//! assert_eq!(layout.frame_for_item(0, 5), Some(Frame::new(100.0, 100.0, 100.0, 100.0)));
//! # Ok::<(), flexlayout::LayoutError>(())
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod source;
pub mod types;

pub use config::{CollectionConfig, ItemConfig, LayoutKind, SectionConfig};
pub use error::{LayoutError, Result};
pub use layout::{
    CollectionLayout, ColumnFlowEngine, GridSpanEngine, LayoutCache, PassStats, Viewport,
};
pub use source::{
    CollectionDataSource, ColumnFlowDataSource, ColumnFlowDelegate, GridSpanDataSource,
    GridSpanDelegate, SectionDelegate,
};
pub use types::*;

/// Get the library version
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

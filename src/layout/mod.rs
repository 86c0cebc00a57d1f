//! Layout engines and the attribute cache they fill.
//!
//! This module handles:
//! - Resolving mixed fixed/ratio/equal-share column widths
//! - Column-flow placement with per-column cursors
//! - Span-grid placement with multi-row/multi-column items
//! - Header, footer and background frames shared by both engines
//! - Caching a pass's frames for point, item and region queries

mod cache;
pub mod columns;
mod column_flow;
mod cursor;
mod grid_span;
mod pass;
mod section;
mod viewport;

pub use cache::LayoutCache;
pub use column_flow::ColumnFlowEngine;
pub use columns::resolve_column_widths;
pub use cursor::ColumnCursors;
pub use grid_span::{GridSpanEngine, MAX_ROW_SPAN};
pub use pass::{CollectionLayout, PassStats};
pub use section::SectionAccumulator;
pub use viewport::Viewport;

//! Value types shared by the layout engines, the cache and the configuration layer.

mod element;
mod geometry;
mod spec;

pub use element::*;
pub use geometry::*;
pub use spec::*;

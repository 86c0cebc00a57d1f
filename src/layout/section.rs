//! Header, footer and background bookkeeping shared by both engines.
//!
//! A section runs as: [`SectionAccumulator::begin`] (top inset and header),
//! item placement by the engine against [`SectionAccumulator::items_top`],
//! then [`SectionAccumulator::finish`] (footer, bottom inset, background).

use crate::types::{Frame, SectionLayoutSpec, SupplementaryKind};

use super::LayoutCache;

/// Running content height across a pass plus the current section's anchors.
#[derive(Debug, Clone)]
pub struct SectionAccumulator {
    content_width: f32,
    max_y: f32,
    section_start_y: f32,
    items_top: f32,
}

impl SectionAccumulator {
    pub fn new(content_width: f32) -> Self {
        Self {
            content_width: content_width.max(0.0),
            max_y: 0.0,
            section_start_y: 0.0,
            items_top: 0.0,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    /// Running content height
    pub fn max_y(&self) -> f32 {
        self.max_y
    }

    /// Y where the current section's items start (below its header)
    pub fn items_top(&self) -> f32 {
        self.items_top
    }

    /// Raise the running height to at least `y`.
    pub fn extend_to(&mut self, y: f32) {
        self.max_y = self.max_y.max(y);
    }

    /// Lower the running height by `amount`, never above the items' top.
    pub fn retract(&mut self, amount: f32) {
        self.max_y = (self.max_y - amount).max(self.items_top);
    }

    /// Apply the top inset and emit the header. Returns the items' top Y.
    pub fn begin(
        &mut self,
        section: usize,
        spec: &SectionLayoutSpec,
        cache: &mut LayoutCache,
    ) -> f32 {
        self.section_start_y = self.max_y;
        self.max_y += spec.insets.top;

        let header_height = spec.header_size.height;
        if header_height > 0.0 {
            cache.insert_supplementary(
                SupplementaryKind::Header,
                section,
                self.full_row(spec, header_height),
            );
            self.max_y += header_height;
        }

        self.items_top = self.max_y;
        self.items_top
    }

    /// Emit footer and background, apply the bottom inset.
    pub fn finish(&mut self, section: usize, spec: &SectionLayoutSpec, cache: &mut LayoutCache) {
        let footer_height = spec.footer_size.height;
        if footer_height > 0.0 {
            cache.insert_supplementary(
                SupplementaryKind::Footer,
                section,
                self.full_row(spec, footer_height),
            );
            self.max_y += footer_height;
        }
        self.max_y += spec.insets.bottom;

        if spec.renders_background {
            cache.insert_supplementary(
                SupplementaryKind::Background,
                section,
                Frame::new(
                    0.0,
                    self.section_start_y,
                    self.content_width,
                    self.max_y - self.section_start_y,
                ),
            );
        }
    }

    /// Frame across the section's usable width at the running height.
    fn full_row(&self, spec: &SectionLayoutSpec, height: f32) -> Frame {
        Frame::new(
            spec.insets.left,
            self.max_y,
            spec.usable_width(self.content_width),
            height,
        )
    }
}

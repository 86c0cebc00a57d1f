//! Layout attribute cache.
//!
//! Holds every frame produced by one layout pass. Engines populate it after
//! [`LayoutCache::invalidate`]; between passes it only answers queries.
//! There is no partial invalidation: a pass always rebuilds the whole cache.

use std::collections::HashMap;

use crate::types::{ElementRef, Frame, ItemIndex, LayoutAttributes, Point, Size, SupplementaryKind};

/// Frames of items and supplementary elements for the current pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutCache {
    items: HashMap<ItemIndex, Frame>,
    supplementary: HashMap<(SupplementaryKind, usize), Frame>,
    content_size: Size,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache with room for `items` item frames.
    pub fn with_capacity(items: usize) -> Self {
        Self {
            items: HashMap::with_capacity(items),
            supplementary: HashMap::new(),
            content_size: Size::ZERO,
        }
    }

    /// Drop every frame and reset the content size.
    pub fn invalidate(&mut self) {
        self.items.clear();
        self.supplementary.clear();
        self.content_size = Size::ZERO;
    }

    pub fn insert_item(&mut self, index: ItemIndex, frame: Frame) {
        self.items.insert(index, frame);
    }

    pub fn insert_supplementary(&mut self, kind: SupplementaryKind, section: usize, frame: Frame) {
        self.supplementary.insert((kind, section), frame);
    }

    pub fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
    }

    /// Total scrollable size computed by the last pass.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Frame of an item, `None` if the item was not placed.
    pub fn frame_for_item(&self, section: usize, item: usize) -> Option<Frame> {
        self.items.get(&ItemIndex::new(section, item)).copied()
    }

    /// Frame of a header, footer or background, `None` if not emitted.
    pub fn frame_for_supplementary(
        &self,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<Frame> {
        self.supplementary.get(&(kind, section)).copied()
    }

    pub fn attributes_for_item(&self, section: usize, item: usize) -> Option<LayoutAttributes> {
        let index = ItemIndex::new(section, item);
        self.items
            .get(&index)
            .map(|frame| LayoutAttributes::new(ElementRef::Item(index), *frame))
    }

    pub fn attributes_for_supplementary(
        &self,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<LayoutAttributes> {
        self.frame_for_supplementary(kind, section)
            .map(|frame| LayoutAttributes::new(ElementRef::Supplementary { kind, section }, frame))
    }

    /// Every element whose frame overlaps `region`, items and supplementaries
    /// together. The order is unspecified.
    pub fn elements_intersecting(&self, region: &Frame) -> Vec<LayoutAttributes> {
        self.iter()
            .filter(|attributes| attributes.frame.intersects(region))
            .collect()
    }

    /// Front-most element under `point`. Items win ties against
    /// supplementaries with the same paint order.
    pub fn element_at(&self, point: Point) -> Option<LayoutAttributes> {
        self.iter()
            .filter(|attributes| attributes.frame.contains_point(point))
            .max_by_key(|attributes| {
                (
                    attributes.z_index,
                    matches!(attributes.element, ElementRef::Item(_)),
                )
            })
    }

    /// All cached elements, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = LayoutAttributes> + '_ {
        let items = self
            .items
            .iter()
            .map(|(index, frame)| LayoutAttributes::new(ElementRef::Item(*index), *frame));
        let supplementary = self.supplementary.iter().map(|((kind, section), frame)| {
            LayoutAttributes::new(
                ElementRef::Supplementary {
                    kind: *kind,
                    section: *section,
                },
                *frame,
            )
        });
        items.chain(supplementary)
    }

    /// Number of cached item frames.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of cached frames of any kind.
    pub fn len(&self) -> usize {
        self.items.len() + self.supplementary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.supplementary.is_empty()
    }
}

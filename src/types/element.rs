use serde::{Deserialize, Serialize};

use super::Frame;

/// Position of an item: section first, then item within the section.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemIndex {
    pub section: usize,
    pub item: usize,
}

impl ItemIndex {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// Kinds of per-section elements that are not items
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SupplementaryKind {
    Header,
    Footer,
    /// Painted behind everything else in the section
    Background,
}

impl SupplementaryKind {
    /// Paint order: backgrounds sit behind items and other supplementaries.
    pub fn z_index(self) -> i32 {
        match self {
            SupplementaryKind::Background => -1,
            SupplementaryKind::Header | SupplementaryKind::Footer => 0,
        }
    }
}

/// Identifies one laid-out element.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ElementRef {
    Item(ItemIndex),
    Supplementary {
        kind: SupplementaryKind,
        section: usize,
    },
}

impl ElementRef {
    pub fn section(&self) -> usize {
        match *self {
            ElementRef::Item(index) => index.section,
            ElementRef::Supplementary { section, .. } => section,
        }
    }

    pub fn z_index(&self) -> i32 {
        match *self {
            ElementRef::Item(_) => 0,
            ElementRef::Supplementary { kind, .. } => kind.z_index(),
        }
    }
}

/// A frame tagged with the element it belongs to and its paint order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct LayoutAttributes {
    pub element: ElementRef,
    pub frame: Frame,
    pub z_index: i32,
}

impl LayoutAttributes {
    pub fn new(element: ElementRef, frame: Frame) -> Self {
        Self {
            element,
            frame,
            z_index: element.z_index(),
        }
    }
}

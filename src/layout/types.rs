//! Layout output types.

use std::collections::HashMap;

use crate::types::{NodeId, Rect};

/// Absolute page rectangles for every laid-out element.
///
/// Elements that are detached, or hidden with `display: none` (directly or
/// through an ancestor), have no rectangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedLayout {
    pub(crate) rects: HashMap<NodeId, Rect>,
    pub content_width: f32,
    pub content_height: f32,
}

impl ComputedLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.rects.get(&node).copied()
    }

    /// Distance from the top of the page to the element's border box.
    pub fn offset_top(&self, node: NodeId) -> Option<f32> {
        self.rect(node).map(|r| r.y)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

//! Core types for eagletech-fx.
//!
//! Node handles, event kinds, geometry and box styles. Everything else in the
//! crate builds on these.

// =============================================================================
// Node Handle
// =============================================================================

/// Handle to an element in a [`Document`](crate::engine::Document) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Arena index of this node.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

// =============================================================================
// Event Kinds (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Capability set of an event source.
    ///
    /// Combine with bitwise OR: `EventKinds::SCROLL | EventKinds::RESIZE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventKinds: u16 {
        const SCROLL = 1 << 0;
        const RESIZE = 1 << 1;
        const INTERSECT = 1 << 2;
        const POINTER_ENTER = 1 << 3;
        const POINTER_LEAVE = 1 << 4;
        const CLICK = 1 << 5;
        const LOAD = 1 << 6;
        const CONTENT_LOADED = 1 << 7;
        const TICK = 1 << 8;
    }
}

/// Event types that listeners can subscribe to.
///
/// Intersection is not listed: it is delivered through observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Scroll,
    Resize,
    PointerEnter,
    PointerLeave,
    Click,
    Load,
    ContentLoaded,
}

impl EventKind {
    /// The capability bit for this kind.
    pub const fn flag(self) -> EventKinds {
        match self {
            EventKind::Scroll => EventKinds::SCROLL,
            EventKind::Resize => EventKinds::RESIZE,
            EventKind::PointerEnter => EventKinds::POINTER_ENTER,
            EventKind::PointerLeave => EventKinds::POINTER_LEAVE,
            EventKind::Click => EventKinds::CLICK,
            EventKind::Load => EventKinds::LOAD,
            EventKind::ContentLoaded => EventKinds::CONTENT_LOADED,
        }
    }

    /// Whether this event propagates to ancestors.
    pub const fn bubbles(self) -> bool {
        matches!(self, EventKind::Click)
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Axis-aligned rectangle in page coordinates (px).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Intersection of two rectangles.
    ///
    /// Edge-adjacent rectangles intersect with zero area; disjoint ones
    /// return `None`.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < x || bottom < y {
            return None;
        }
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// Grow (positive) or shrink (negative) each side by the given margin.
    pub fn expand(&self, margin: &Margin) -> Rect {
        Rect::new(
            self.x - margin.left,
            self.y - margin.top,
            self.width + margin.left + margin.right,
            self.height + margin.top + margin.bottom,
        )
    }
}

/// Per-side offsets (px), CSS order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub const ZERO: Self = Self { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }
}

// =============================================================================
// Box Style
// =============================================================================

/// Dimension value for layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    #[default]
    Auto,
    /// Absolute pixels.
    Px(f32),
    /// Percentage of the parent (0-100).
    Percent(f32),
}

impl From<f32> for Dimension {
    fn from(px: f32) -> Self {
        Dimension::Px(px)
    }
}

/// Direction children flow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowDirection {
    #[default]
    Column,
    Row,
}

/// Layout description of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxStyle {
    pub width: Dimension,
    pub height: Dimension,
    pub direction: FlowDirection,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));

        let far = Rect::new(500.0, 500.0, 10.0, 10.0);
        assert_eq!(a.intersection(&far), None);
    }

    #[test]
    fn test_rect_edge_adjacent_intersects() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let below = Rect::new(0.0, 100.0, 100.0, 10.0);
        let hit = a.intersection(&below).unwrap();
        assert_eq!(hit.area(), 0.0);
    }

    #[test]
    fn test_rect_expand_negative_bottom() {
        let viewport = Rect::new(0.0, 200.0, 1024.0, 768.0);
        let shrunk = viewport.expand(&Margin::new(0.0, 0.0, -50.0, 0.0));
        assert_eq!(shrunk.y, 200.0);
        assert_eq!(shrunk.height, 718.0);
    }

    #[test]
    fn test_event_kind_flags() {
        let caps = EventKind::Scroll.flag() | EventKind::Click.flag();
        assert!(caps.contains(EventKinds::SCROLL));
        assert!(caps.contains(EventKinds::CLICK));
        assert!(!caps.contains(EventKinds::RESIZE));
        assert!(EventKind::Click.bubbles());
        assert!(!EventKind::PointerEnter.bubbles());
    }
}

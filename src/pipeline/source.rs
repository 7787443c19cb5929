//! Event Sources - Where page input comes from.
//!
//! A source declares the kinds of input it can produce (its capability set)
//! and yields [`InputEvent`]s one at a time. The page rejects events outside
//! the declared capabilities.
//!
//! [`ScriptedSource`] replays a fixed sequence, which is how tests and demos
//! drive a page without a browser.

use std::collections::VecDeque;

use crate::types::{EventKinds, NodeId};

/// A single piece of input for the page.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Document parsed (`DOMContentLoaded`).
    ContentLoaded,
    /// All sub-resources loaded (`load`).
    Load,
    /// User scrolled the window to this offset.
    Scroll(f32),
    Resize { width: f32, height: f32 },
    Click(NodeId),
    PointerEnter(NodeId),
    PointerLeave(NodeId),
    /// Synthetic intersection change for every observer watching the node.
    Intersect { node: NodeId, intersecting: bool },
    /// Let time pass (ms).
    Advance(u64),
}

impl InputEvent {
    /// Capability bit required to produce this event.
    pub fn kind(&self) -> EventKinds {
        match self {
            InputEvent::ContentLoaded => EventKinds::CONTENT_LOADED,
            InputEvent::Load => EventKinds::LOAD,
            InputEvent::Scroll(_) => EventKinds::SCROLL,
            InputEvent::Resize { .. } => EventKinds::RESIZE,
            InputEvent::Click(_) => EventKinds::CLICK,
            InputEvent::PointerEnter(_) => EventKinds::POINTER_ENTER,
            InputEvent::PointerLeave(_) => EventKinds::POINTER_LEAVE,
            InputEvent::Intersect { .. } => EventKinds::INTERSECT,
            InputEvent::Advance(_) => EventKinds::TICK,
        }
    }
}

/// Abstract producer of page input.
pub trait EventSource {
    /// Kinds of input this source may produce.
    fn capabilities(&self) -> EventKinds;

    /// Next pending input, or `None` when exhausted.
    fn next_event(&mut self) -> Option<InputEvent>;
}

/// Replays a fixed list of events.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    events: VecDeque<InputEvent>,
    capabilities: EventKinds,
}

impl ScriptedSource {
    /// Capabilities are the union of the scripted events' kinds.
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        let events: VecDeque<InputEvent> = events.into_iter().collect();
        let capabilities = events
            .iter()
            .fold(EventKinds::empty(), |caps, event| caps | event.kind());
        Self { events, capabilities }
    }

    /// Restrict the declared capabilities.
    pub fn with_capabilities(mut self, capabilities: EventKinds) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn push(&mut self, event: InputEvent) {
        self.capabilities |= event.kind();
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for ScriptedSource {
    fn capabilities(&self) -> EventKinds {
        self.capabilities
    }

    fn next_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

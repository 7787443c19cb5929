//! Events Module - Event objects and listener registry
//!
//! Listeners subscribe to `(target, kind)` pairs and run in registration
//! order. The registry only stores handlers; propagation is driven by the
//! page (see [`Page::dispatch`](crate::pipeline::Page::dispatch)).
//!
//! # Example
//!
//! ```ignore
//! let id = page.add_listener(EventTarget::Window, EventKind::Scroll, |page, _event| {
//!     println!("scrolled to {}", page.viewport().scroll_y());
//! });
//! page.remove_listener(id);
//! ```

use std::rc::Rc;

use crate::pipeline::Page;
use crate::types::{EventKind, NodeId};

// =============================================================================
// TYPES
// =============================================================================

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Document,
    Node(NodeId),
}

impl EventTarget {
    pub fn node(self) -> Option<NodeId> {
        match self {
            EventTarget::Node(node) => Some(node),
            _ => None,
        }
    }
}

/// An event in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    kind: EventKind,
    target: EventTarget,
    current_target: EventTarget,
    default_prevented: bool,
}

impl Event {
    pub fn new(kind: EventKind, target: EventTarget) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            default_prevented: false,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Where the event originated.
    pub fn target(&self) -> EventTarget {
        self.target
    }

    /// The target whose listener is currently running (`this`).
    pub fn current_target(&self) -> EventTarget {
        self.current_target
    }

    pub(crate) fn set_current_target(&mut self, target: EventTarget) {
        self.current_target = target;
    }

    /// Cancel the default action (navigation for links).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Event handler. Receives the page so it can mutate the document, schedule
/// timers, or register further listeners.
pub type Listener = Rc<dyn Fn(&mut Page, &mut Event)>;

/// Handle for removing a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct ListenerEntry {
    id: ListenerId,
    target: EventTarget,
    kind: EventKind,
    handler: Listener,
}

#[derive(Default)]
pub struct ListenerRegistry {
    entries: Vec<ListenerEntry>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, target: EventTarget, kind: EventKind, handler: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(ListenerEntry { id, target, kind, handler });
        id
    }

    /// Returns `false` if the listener was already removed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Handlers for `(target, kind)` in registration order.
    ///
    /// Returns clones so handlers can mutate the page while running.
    pub fn handlers(&self, target: EventTarget, kind: EventKind) -> Vec<Listener> {
        self.entries
            .iter()
            .filter(|entry| entry.target == target && entry.kind == kind)
            .map(|entry| entry.handler.clone())
            .collect()
    }

    pub fn count(&self, target: EventTarget, kind: EventKind) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.target == target && entry.kind == kind)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Page - The runtime every controller is wired against.
//!
//! Owns the document, viewport, configuration, timers, listeners and
//! intersection observers. Input arrives through the methods below (or an
//! [`EventSource`]); each runs its handlers to completion and then flushes
//! intersection observers, mirroring one turn of a browser event loop.
//!
//! Dispatch order:
//! - listeners on the same target run in registration order
//! - `click` bubbles from the node through its ancestors, then the
//!   document, then the window
//! - pointer enter/leave stay on the node
//! - scroll, resize and load go to the window; content-loaded to the
//!   document
//!
//! Layout is memoized in a derived over the viewport width and the
//! document's layout revision, so cosmetic writes reuse the last layout.

use std::cell::OnceCell;
use std::rc::Rc;

use spark_signals::{derived_with_equals, never_equals, Derived};

use crate::config::FxConfig;
use crate::engine::Document;
use crate::error::FxResult;
use crate::layout::{compute_layout, ComputedLayout};
use crate::state::intersection::{IntersectionEntry, ObserverId, ObserverOptions, ObserverRegistry};
use crate::state::scroll::{self, ScrollBehavior, ScrollToOptions};
use crate::state::{Event, EventTarget, ListenerId, ListenerRegistry, TimerId, TimerQueue, Viewport};
use crate::types::{EventKind, NodeId};

use super::source::{EventSource, InputEvent};

// =============================================================================
// TYPES
// =============================================================================

/// Document loading phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

/// Layout for one (width, layout revision) pair, filled on first read.
type LayoutSlot = Rc<OnceCell<Rc<ComputedLayout>>>;

fn layout_memo(viewport: &Viewport, document: &Document) -> Derived<LayoutSlot> {
    let width = viewport.width_signal();
    let revision = document.layout_revision_signal();
    derived_with_equals(
        move || {
            width.get();
            revision.get();
            LayoutSlot::default()
        },
        never_equals,
    )
}

pub struct Page {
    document: Document,
    viewport: Viewport,
    config: FxConfig,
    timers: TimerQueue,
    listeners: ListenerRegistry,
    observers: ObserverRegistry,
    layout_memo: Derived<LayoutSlot>,
    pub(crate) scroll_animation: Option<TimerId>,
    ready_state: ReadyState,
    navigations: Vec<String>,
}

// =============================================================================
// CONSTRUCTION & ACCESS
// =============================================================================

impl Page {
    /// Create a page with `config` as given.
    ///
    /// The config is not validated; use [`try_new`](Self::try_new) for
    /// configs built outside [`FxConfig::from_json`].
    pub fn new(document: Document, config: FxConfig) -> Self {
        let viewport = Viewport::default();
        let layout_memo = layout_memo(&viewport, &document);
        Self {
            document,
            viewport,
            config,
            timers: TimerQueue::new(),
            listeners: ListenerRegistry::new(),
            observers: ObserverRegistry::new(),
            layout_memo,
            scroll_animation: None,
            ready_state: ReadyState::Loading,
            navigations: Vec::new(),
        }
    }

    /// Create a page after validating `config`.
    pub fn try_new(document: Document, config: FxConfig) -> FxResult<Self> {
        config.validate()?;
        Ok(Self::new(document, config))
    }

    /// Replace the viewport size before any input is processed.
    pub fn with_viewport(self, width: f32, height: f32) -> Self {
        self.viewport.set_size(width, height);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &FxConfig {
        &self.config
    }

    /// Current virtual time (ms).
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut TimerQueue {
        &mut self.timers
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn observers(&self) -> &ObserverRegistry {
        &self.observers
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// Hrefs of link clicks whose default action was not prevented.
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Layout for the current document and viewport width.
    ///
    /// Recomputed only after a resize or a layout-affecting document write.
    pub fn layout(&self) -> FxResult<Rc<ComputedLayout>> {
        let slot = self.layout_memo.get();
        if let Some(layout) = slot.get() {
            return Ok(layout.clone());
        }
        let layout = Rc::new(compute_layout(&self.document, self.viewport.width())?);
        tracing::trace!(revision = self.document.layout_revision(), "layout computed");
        let _ = slot.set(layout.clone());
        Ok(layout)
    }
}

// =============================================================================
// LISTENERS & OBSERVERS
// =============================================================================

impl Page {
    pub fn add_listener<F>(&mut self, target: EventTarget, kind: EventKind, handler: F) -> ListenerId
    where
        F: Fn(&mut Page, &mut Event) + 'static,
    {
        self.listeners.add(target, kind, Rc::new(handler))
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn create_observer<F>(&mut self, options: ObserverOptions, callback: F) -> ObserverId
    where
        F: Fn(&mut Page, &[IntersectionEntry], ObserverId) + 'static,
    {
        self.observers.create(options, Rc::new(callback))
    }

    pub fn observe(&mut self, observer: ObserverId, node: NodeId) -> bool {
        self.observers.observe(observer, node)
    }

    pub fn unobserve(&mut self, observer: ObserverId, node: NodeId) -> bool {
        self.observers.unobserve(observer, node)
    }

    pub fn disconnect(&mut self, observer: ObserverId) -> bool {
        self.observers.disconnect(observer)
    }

    pub fn is_observing(&self, observer: ObserverId, node: NodeId) -> bool {
        self.observers.is_observing(observer, node)
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

impl Page {
    fn propagation_path(&self, kind: EventKind, target: EventTarget) -> Vec<EventTarget> {
        let EventTarget::Node(node) = target else {
            return vec![target];
        };
        if !kind.bubbles() {
            return vec![target];
        }
        let mut path = vec![target];
        let mut current = self.document.parent(node);
        while let Some(ancestor) = current {
            path.push(EventTarget::Node(ancestor));
            current = self.document.parent(ancestor);
        }
        if self.document.is_connected(node) {
            path.push(EventTarget::Document);
            path.push(EventTarget::Window);
        }
        path
    }

    /// Run every listener for `kind` along the propagation path of `target`.
    ///
    /// Returns the finished event so callers can inspect `default_prevented`.
    pub fn dispatch(&mut self, kind: EventKind, target: EventTarget) -> Event {
        let mut event = Event::new(kind, target);
        for current in self.propagation_path(kind, target) {
            let handlers = self.listeners.handlers(current, kind);
            if handlers.is_empty() {
                continue;
            }
            tracing::trace!(?kind, ?current, count = handlers.len(), "dispatch");
            event.set_current_target(current);
            for handler in handlers {
                handler(self, &mut event);
            }
        }
        event
    }

    /// Deliver fresh intersection entries to every observer.
    pub fn flush(&mut self) -> FxResult<()> {
        if self.observers.is_empty() {
            return Ok(());
        }
        let layout = self.layout()?;
        let viewport = self.viewport.rect();
        for id in self.observers.ids() {
            if let Some((callback, entries)) = self.observers.evaluate(id, &layout, viewport) {
                tracing::trace!(?id, count = entries.len(), "intersection entries");
                callback(self, &entries, id);
            }
        }
        Ok(())
    }

    /// Set the scroll offset and notify scroll listeners if it moved.
    pub(crate) fn apply_scroll(&mut self, y: f32) {
        if self.viewport.set_scroll_y(y) {
            self.dispatch(EventKind::Scroll, EventTarget::Window);
        }
    }

    fn cancel_scroll_animation(&mut self) {
        if let Some(id) = self.scroll_animation.take() {
            self.timers.cancel(id);
        }
    }

    /// Largest reachable scroll offset for the current layout.
    pub fn max_scroll(&self) -> FxResult<f32> {
        let layout = self.layout()?;
        Ok(scroll::max_scroll(layout.content_height, self.viewport.height()))
    }
}

// =============================================================================
// INPUT
// =============================================================================

impl Page {
    /// The document became interactive (`DOMContentLoaded`).
    ///
    /// Fires at most once.
    pub fn content_loaded(&mut self) -> FxResult<()> {
        if self.ready_state != ReadyState::Loading {
            return Ok(());
        }
        self.ready_state = ReadyState::Interactive;
        self.dispatch(EventKind::ContentLoaded, EventTarget::Document);
        self.flush()
    }

    /// All sub-resources finished loading (`load`).
    ///
    /// Implies `content_loaded` if it has not happened yet. Fires at most once.
    pub fn load(&mut self) -> FxResult<()> {
        if self.ready_state == ReadyState::Complete {
            return Ok(());
        }
        self.content_loaded()?;
        self.ready_state = ReadyState::Complete;
        self.dispatch(EventKind::Load, EventTarget::Window);
        self.flush()
    }

    /// User scroll. Cancels any running smooth scroll.
    pub fn scroll_window(&mut self, y: f32) -> FxResult<()> {
        self.cancel_scroll_animation();
        let max = self.max_scroll()?;
        self.apply_scroll(scroll::clamp_scroll(y, max));
        self.flush()
    }

    /// Programmatic scroll (`window.scrollTo`).
    pub fn scroll_to(&mut self, options: ScrollToOptions) -> FxResult<()> {
        self.cancel_scroll_animation();
        let max = self.max_scroll()?;
        let top = scroll::clamp_scroll(options.top, max);
        let duration = self.config.smooth_scroll_ms;

        match options.behavior {
            ScrollBehavior::Smooth if duration > 0 && top != self.viewport.scroll_y() => {
                scroll::start_smooth_scroll(self, top, duration);
            }
            _ => self.apply_scroll(top),
        }
        self.flush()
    }

    /// Resize the window. The scroll offset is clamped to the new extent.
    pub fn resize_window(&mut self, width: f32, height: f32) -> FxResult<()> {
        if self.viewport.set_size(width, height) {
            self.dispatch(EventKind::Resize, EventTarget::Window);
            let max = self.max_scroll()?;
            if self.viewport.scroll_y() > max {
                self.cancel_scroll_animation();
                self.apply_scroll(max);
            }
        }
        self.flush()
    }

    /// Click `node`. Returns `true` if the default action ran.
    ///
    /// The default action of a click inside an element carrying `href` is a
    /// navigation, recorded in [`navigations`](Self::navigations).
    pub fn click(&mut self, node: NodeId) -> FxResult<bool> {
        let event = self.dispatch(EventKind::Click, EventTarget::Node(node));
        let allowed = !event.default_prevented();
        if allowed {
            if let Some(href) = self.closest_href(node) {
                tracing::debug!(%href, "navigation");
                self.navigations.push(href);
            }
        }
        self.flush()?;
        Ok(allowed)
    }

    fn closest_href(&self, node: NodeId) -> Option<String> {
        let mut current = Some(node);
        while let Some(n) = current {
            if let Some(href) = self.document.attribute(n, "href") {
                return Some(href.to_string());
            }
            current = self.document.parent(n);
        }
        None
    }

    pub fn pointer_enter(&mut self, node: NodeId) -> FxResult<()> {
        self.dispatch(EventKind::PointerEnter, EventTarget::Node(node));
        self.flush()
    }

    pub fn pointer_leave(&mut self, node: NodeId) -> FxResult<()> {
        self.dispatch(EventKind::PointerLeave, EventTarget::Node(node));
        self.flush()
    }

    /// Let `ms` milliseconds pass, firing due timers in order.
    pub fn advance(&mut self, ms: u64) -> FxResult<()> {
        let until = self.timers.now().saturating_add(ms);
        while let Some((id, callback)) = self.timers.pop_due(until) {
            tracing::trace!(?id, now = self.timers.now(), "timer fired");
            callback(self);
            self.flush()?;
        }
        self.timers.set_now(until);
        self.flush()
    }

    /// Report `node` as (not) intersecting to every observer watching it.
    ///
    /// Synthetic entries bypass geometry, and no flush follows.
    pub fn emit_intersection(&mut self, node: NodeId, intersecting: bool) {
        for (id, callback, entry) in self.observers.synthesize(node, intersecting) {
            callback(self, std::slice::from_ref(&entry), id);
        }
    }

    /// Apply one input event.
    pub fn feed(&mut self, input: InputEvent) -> FxResult<()> {
        match input {
            InputEvent::ContentLoaded => self.content_loaded(),
            InputEvent::Load => self.load(),
            InputEvent::Scroll(y) => self.scroll_window(y),
            InputEvent::Resize { width, height } => self.resize_window(width, height),
            InputEvent::Click(node) => self.click(node).map(|_| ()),
            InputEvent::PointerEnter(node) => self.pointer_enter(node),
            InputEvent::PointerLeave(node) => self.pointer_leave(node),
            InputEvent::Intersect { node, intersecting } => {
                self.emit_intersection(node, intersecting);
                Ok(())
            }
            InputEvent::Advance(ms) => self.advance(ms),
        }
    }

    /// Drain `source`, applying every event it is allowed to produce.
    ///
    /// Returns the number of events applied.
    pub fn pump(&mut self, source: &mut dyn EventSource) -> FxResult<usize> {
        let capabilities = source.capabilities();
        let mut applied = 0;
        while let Some(input) = source.next_event() {
            if !capabilities.contains(input.kind()) {
                tracing::warn!(?input, "event outside source capabilities ignored");
                continue;
            }
            self.feed(input)?;
            applied += 1;
        }
        Ok(applied)
    }
}

// =============================================================================
// TESTS
// =============================================================================

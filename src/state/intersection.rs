//! Intersection Observers - Viewport visibility notifications.
//!
//! An observer watches a set of targets and reports an entry whenever a
//! target's intersecting state changes. The first evaluation after
//! `observe` always reports, whatever the state.
//!
//! The root is the viewport rectangle grown (positive) or shrunk (negative)
//! by the observer's root margin. A target is intersecting when it touches
//! the root and its visible fraction reaches the threshold; with a zero
//! threshold, edge contact is enough.
//!
//! Observers never release targets on their own: callers `unobserve`
//! explicitly.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::layout::ComputedLayout;
use crate::pipeline::Page;
use crate::types::{Margin, NodeId, Rect};

// =============================================================================
// TYPES
// =============================================================================

/// Handle to an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Visible fraction (0..=1) at which a target counts as intersecting.
    pub threshold: f32,
    pub root_margin: Margin,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self { threshold: 0.0, root_margin: Margin::ZERO }
    }
}

/// One reported state change.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    /// Visible fraction of the target's area.
    pub ratio: f32,
}

/// Observer callback. Receives the observer id so it can `unobserve`.
pub type ObserverCallback = Rc<dyn Fn(&mut Page, &[IntersectionEntry], ObserverId)>;

struct Observer {
    options: ObserverOptions,
    callback: ObserverCallback,
    /// Target → last reported state (`None` until first evaluation).
    targets: Vec<(NodeId, Option<bool>)>,
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Intersecting state and visible ratio of `target` against `root`.
///
/// A target without a rectangle (hidden or detached) never intersects.
pub fn measure(target: Option<Rect>, root: Rect, threshold: f32) -> (bool, f32) {
    let Some(target) = target else {
        return (false, 0.0);
    };
    let Some(hit) = target.intersection(&root) else {
        return (false, 0.0);
    };
    let area = target.area();
    let ratio = if area > 0.0 { (hit.area() / area).min(1.0) } else { 1.0 };
    let intersecting = threshold <= 0.0 || ratio >= threshold;
    (intersecting, ratio)
}

// =============================================================================
// REGISTRY
// =============================================================================

#[derive(Default)]
pub struct ObserverRegistry {
    observers: BTreeMap<ObserverId, Observer>,
    next_id: u64,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, options: ObserverOptions, callback: ObserverCallback) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.insert(id, Observer { options, callback, targets: Vec::new() });
        id
    }

    /// Start watching `node`. Returns `false` if the observer is gone or
    /// already watches it.
    pub fn observe(&mut self, id: ObserverId, node: NodeId) -> bool {
        let Some(observer) = self.observers.get_mut(&id) else {
            return false;
        };
        if observer.targets.iter().any(|(n, _)| *n == node) {
            return false;
        }
        observer.targets.push((node, None));
        true
    }

    /// Stop watching `node`. Returns `false` if it was not watched.
    pub fn unobserve(&mut self, id: ObserverId, node: NodeId) -> bool {
        let Some(observer) = self.observers.get_mut(&id) else {
            return false;
        };
        let before = observer.targets.len();
        observer.targets.retain(|(n, _)| *n != node);
        observer.targets.len() != before
    }

    /// Drop the observer and all its targets.
    pub fn disconnect(&mut self, id: ObserverId) -> bool {
        self.observers.remove(&id).is_some()
    }

    pub fn is_observing(&self, id: ObserverId, node: NodeId) -> bool {
        self.observers
            .get(&id)
            .is_some_and(|o| o.targets.iter().any(|(n, _)| *n == node))
    }

    pub fn observed(&self, id: ObserverId) -> Vec<NodeId> {
        self.observers
            .get(&id)
            .map(|o| o.targets.iter().map(|(n, _)| *n).collect())
            .unwrap_or_default()
    }

    pub fn options(&self, id: ObserverId) -> Option<ObserverOptions> {
        self.observers.get(&id).map(|o| o.options)
    }

    pub fn ids(&self) -> Vec<ObserverId> {
        self.observers.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Recompute one observer's targets and collect the changed ones.
    pub(crate) fn evaluate(
        &mut self,
        id: ObserverId,
        layout: &ComputedLayout,
        viewport: Rect,
    ) -> Option<(ObserverCallback, Vec<IntersectionEntry>)> {
        let observer = self.observers.get_mut(&id)?;
        let root = viewport.expand(&observer.options.root_margin);
        let threshold = observer.options.threshold;

        let mut entries = Vec::new();
        for (node, last) in observer.targets.iter_mut() {
            let (is_intersecting, ratio) = measure(layout.rect(*node), root, threshold);
            if *last != Some(is_intersecting) {
                *last = Some(is_intersecting);
                entries.push(IntersectionEntry { target: *node, is_intersecting, ratio });
            }
        }

        if entries.is_empty() {
            None
        } else {
            Some((observer.callback.clone(), entries))
        }
    }

    /// Force a state report for `node` on every observer watching it.
    pub(crate) fn synthesize(
        &mut self,
        node: NodeId,
        is_intersecting: bool,
    ) -> Vec<(ObserverId, ObserverCallback, IntersectionEntry)> {
        let mut out = Vec::new();
        for (id, observer) in self.observers.iter_mut() {
            if let Some((_, last)) = observer.targets.iter_mut().find(|(n, _)| *n == node) {
                *last = Some(is_intersecting);
                let ratio = if is_intersecting { 1.0 } else { 0.0 };
                out.push((
                    *id,
                    observer.callback.clone(),
                    IntersectionEntry { target: node, is_intersecting, ratio },
                ));
            }
        }
        out
    }
}

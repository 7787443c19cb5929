//! Timer Queue - Cancellable timers on a virtual clock.
//!
//! Replaces ambient `setTimeout` ids with explicit `schedule`/`cancel`.
//! Time only moves when the page advances it, which keeps every delay in
//! the controllers deterministic under test.
//!
//! Timers fire in order of due time; ties fire in schedule order.

use std::collections::{BTreeMap, HashMap};

use crate::pipeline::Page;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Work to run when a timer fires.
pub type TimerCallback = Box<dyn FnOnce(&mut Page)>;

#[derive(Default)]
pub struct TimerQueue {
    now: u64,
    next_id: u64,
    /// (due, id) → callback; BTreeMap order is firing order.
    pending: BTreeMap<(u64, TimerId), TimerCallback>,
    due_by_id: HashMap<TimerId, u64>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule `callback` to run `delay_ms` from now.
    pub fn schedule<F>(&mut self, delay_ms: u64, callback: F) -> TimerId
    where
        F: FnOnce(&mut Page) + 'static,
    {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now.saturating_add(delay_ms);
        self.pending.insert((due, id), Box::new(callback));
        self.due_by_id.insert(id, due);
        tracing::trace!(?id, due, "timer scheduled");
        id
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let Some(due) = self.due_by_id.remove(&id) else {
            return false;
        };
        self.pending.remove(&(due, id));
        tracing::trace!(?id, "timer cancelled");
        true
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.due_by_id.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<u64> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Remove the earliest timer due at or before `until`, moving the clock
    /// to its due time.
    pub(crate) fn pop_due(&mut self, until: u64) -> Option<(TimerId, TimerCallback)> {
        let (&(due, id), _) = self.pending.iter().next()?;
        if due > until {
            return None;
        }
        let callback = self.pending.remove(&(due, id))?;
        self.due_by_id.remove(&id);
        self.now = self.now.max(due);
        Some((id, callback))
    }

    /// Move the clock forward without firing anything.
    pub(crate) fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }
}

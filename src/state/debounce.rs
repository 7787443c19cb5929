//! Debounce - Collapse bursts of calls into one.
//!
//! The wrapped function forwards at most one call per quiet period:
//!
//! - trailing (default): the call fires `wait_ms` after the last invocation,
//!   with that invocation's arguments
//! - immediate: the first call of a burst fires at once and the burst's
//!   trailing edge is swallowed
//!
//! Each new invocation cancels the pending timer before scheduling a new one.
//!
//! # Example
//!
//! ```ignore
//! use eagletech_fx::state::debounce;
//!
//! let on_resize = debounce(|page: &mut Page, width: f32| { /* ... */ }, 250, false);
//! on_resize(page, 1024.0);
//! ```

use std::cell::Cell;
use std::rc::Rc;

use crate::pipeline::Page;

use super::timers::TimerId;

/// Wrap `func` so bursts of calls within `wait_ms` collapse into one.
pub fn debounce<A, F>(func: F, wait_ms: u64, immediate: bool) -> impl Fn(&mut Page, A) + Clone + 'static
where
    A: 'static,
    F: Fn(&mut Page, A) + 'static,
{
    let func = Rc::new(func);
    let pending: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));

    move |page: &mut Page, args: A| {
        let call_now = immediate && pending.get().is_none();
        if let Some(id) = pending.take() {
            page.timers_mut().cancel(id);
        }

        let later_pending = pending.clone();
        if immediate {
            let id = page.timers_mut().schedule(wait_ms, move |_| later_pending.set(None));
            pending.set(Some(id));
            if call_now {
                func(page, args);
            }
        } else {
            let later_func = func.clone();
            let id = page.timers_mut().schedule(wait_ms, move |page| {
                later_pending.set(None);
                later_func(page, args);
            });
            pending.set(Some(id));
        }
    }
}

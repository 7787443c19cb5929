//! Window Scroll - Programmatic scrolling with optional smooth animation.
//!
//! - Targets are clamped to `[0, max_scroll]`
//! - Smooth scrolls animate on the timer queue, one frame every
//!   [`FRAME_MS`], easing in and out
//! - Starting a new scroll (programmatic or user) cancels a running animation
//!
//! Every frame that moves the offset dispatches a window `scroll` event, so
//! scroll-driven controllers track the animation as it runs.

use crate::pipeline::Page;

// =============================================================================
// SCROLL CONSTANTS
// =============================================================================

/// Animation frame interval (~60 FPS).
pub const FRAME_MS: u64 = 16;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Instant,
    Smooth,
}

/// Arguments for [`Page::scroll_to`](crate::pipeline::Page::scroll_to).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollToOptions {
    pub top: f32,
    pub behavior: ScrollBehavior,
}

impl ScrollToOptions {
    pub fn instant(top: f32) -> Self {
        Self { top, behavior: ScrollBehavior::Instant }
    }

    pub fn smooth(top: f32) -> Self {
        Self { top, behavior: ScrollBehavior::Smooth }
    }
}

// =============================================================================
// MATH
// =============================================================================

/// Cubic ease-in-out over `t` in `0..=1`.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Largest reachable scroll offset.
pub fn max_scroll(content_height: f32, viewport_height: f32) -> f32 {
    (content_height - viewport_height).max(0.0)
}

/// Clamp a requested offset into the scrollable range.
pub fn clamp_scroll(top: f32, max: f32) -> f32 {
    if !top.is_finite() {
        return 0.0;
    }
    top.clamp(0.0, max.max(0.0))
}

// =============================================================================
// SMOOTH SCROLL ANIMATION
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct SmoothScroll {
    from: f32,
    to: f32,
    start: u64,
    duration: u64,
}

impl SmoothScroll {
    fn position_at(&self, now: u64) -> (f32, bool) {
        let elapsed = now.saturating_sub(self.start);
        if self.duration == 0 || elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed as f32 / self.duration as f32;
        (self.from + (self.to - self.from) * ease_in_out_cubic(t), false)
    }
}

/// Begin animating the window from its current offset to `to`.
///
/// The caller is responsible for cancelling any previous animation.
pub(crate) fn start_smooth_scroll(page: &mut Page, to: f32, duration_ms: u64) {
    let animation = SmoothScroll {
        from: page.viewport().scroll_y(),
        to,
        start: page.now(),
        duration: duration_ms,
    };
    tracing::debug!(from = animation.from, to, duration_ms, "smooth scroll started");
    schedule_frame(page, animation);
}

fn schedule_frame(page: &mut Page, animation: SmoothScroll) {
    let id = page.timers_mut().schedule(FRAME_MS, move |page| {
        page.scroll_animation = None;
        let (y, done) = animation.position_at(page.now());
        page.apply_scroll(y);
        if !done {
            schedule_frame(page, animation);
        }
    });
    page.scroll_animation = Some(id);
}

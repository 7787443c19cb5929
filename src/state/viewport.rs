//! Viewport - Window metrics as reactive signals.
//!
//! Scroll offset and viewport size live in signals so effects and deriveds
//! can track them. The page layout memo depends on the width signal;
//! handlers read the current values through plain getters.

use spark_signals::{signal, Signal};

use crate::types::Rect;

/// Default desktop viewport.
pub const DEFAULT_WIDTH: f32 = 1280.0;
pub const DEFAULT_HEIGHT: f32 = 800.0;

pub struct Viewport {
    scroll_y: Signal<f32>,
    width: Signal<f32>,
    height: Signal<f32>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_y: signal(0.0),
            width: signal(width),
            height: signal(height),
        }
    }

    /// Vertical scroll offset (`window.scrollY`).
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y.get()
    }

    /// Inner width (`window.innerWidth`).
    pub fn width(&self) -> f32 {
        self.width.get()
    }

    pub fn height(&self) -> f32 {
        self.height.get()
    }

    /// Returns `false` if the offset was unchanged.
    pub(crate) fn set_scroll_y(&self, y: f32) -> bool {
        if self.scroll_y.get() == y {
            return false;
        }
        self.scroll_y.set(y);
        true
    }

    /// Returns `false` if the size was unchanged.
    pub(crate) fn set_size(&self, width: f32, height: f32) -> bool {
        let changed = self.width.get() != width || self.height.get() != height;
        if changed {
            self.width.set(width);
            self.height.set(height);
        }
        changed
    }

    /// The visible region in page coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y(), self.width(), self.height())
    }

    pub fn scroll_y_signal(&self) -> Signal<f32> {
        self.scroll_y.clone()
    }

    pub fn width_signal(&self) -> Signal<f32> {
        self.width.clone()
    }
}

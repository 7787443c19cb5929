//! Effects - The page controllers.
//!
//! Each controller is an initializer that looks up its markup, and if the
//! markup is present, registers listeners, timers or observers on the page.
//! Missing markup is never an error: the controller logs at debug level and
//! does nothing.
//!
//! Controllers share no state. They coordinate only through the classes and
//! inline styles they write to the document.

pub mod hover;
pub mod lazy_images;
pub mod loading;
pub mod marquee;
pub mod navigation;
pub mod responsive;
pub mod reveal;
pub mod scroll_effects;

use crate::error::FxResult;
use crate::pipeline::Page;

pub use hover::init_interactive_features;
pub use lazy_images::init_lazy_images;
pub use loading::{init_loading_screen, LoadingPhase};
pub use marquee::init_tech_slider;
pub use navigation::init_navigation;
pub use responsive::handle_resize;
pub use reveal::init_animations;
pub use scroll_effects::init_scroll_effects;

/// Controller entry point.
pub type Initializer = fn(&mut Page) -> FxResult<()>;

// =============================================================================
// PUBLIC NAMESPACE
// =============================================================================

/// The initializers exposed for external invocation.
///
/// The loading screen and lazy images are lifecycle-only and not listed.
pub struct EagleTech;

impl EagleTech {
    pub const INITIALIZERS: [(&'static str, Initializer); 5] = [
        ("init_navigation", init_navigation),
        ("init_scroll_effects", init_scroll_effects),
        ("init_animations", init_animations),
        ("init_tech_slider", init_tech_slider),
        ("init_interactive_features", init_interactive_features),
    ];

    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::INITIALIZERS.iter().map(|(name, _)| *name)
    }

    pub fn get(name: &str) -> Option<Initializer> {
        Self::INITIALIZERS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, init)| *init)
    }

    /// Run the initializer called `name`. Returns `false` if there is none.
    pub fn run(page: &mut Page, name: &str) -> FxResult<bool> {
        let Some(init) = Self::get(name) else {
            tracing::warn!(name, "unknown initializer");
            return Ok(false);
        };
        init(page)?;
        Ok(true)
    }
}

/// Run every startup initializer in page order.
pub fn init_all(page: &mut Page) -> FxResult<()> {
    init_loading_screen(page)?;
    for (name, init) in EagleTech::INITIALIZERS {
        tracing::debug!(name, "initializing");
        init(page)?;
    }
    Ok(())
}

/// Log a failure from inside a listener, where it cannot propagate.
pub(crate) fn log_failure(context: &str, result: FxResult<()>) {
    if let Err(err) = result {
        tracing::warn!(context, %err, "handler failed");
    }
}

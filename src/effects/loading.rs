//! Loading Screen - Timed removal of the splash overlay.
//!
//! `visible → fading → removed`, one way. The overlay gets `fade-out` after
//! the fade delay and leaves the document after the removal delay.

use crate::error::FxResult;
use crate::pipeline::Page;
use crate::types::NodeId;

pub const LOADING_SCREEN: &str = ".loading-screen";
pub const FADE_OUT_CLASS: &str = "fade-out";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    Visible,
    Fading,
    Removed,
}

/// Phase of a loading-screen element, read from the document.
pub fn phase(page: &Page, screen: NodeId) -> LoadingPhase {
    let doc = page.document();
    if !doc.is_connected(screen) {
        LoadingPhase::Removed
    } else if doc.has_class(screen, FADE_OUT_CLASS) {
        LoadingPhase::Fading
    } else {
        LoadingPhase::Visible
    }
}

pub fn init_loading_screen(page: &mut Page) -> FxResult<()> {
    let Some(screen) = page.document().query(LOADING_SCREEN)? else {
        tracing::debug!("no loading screen");
        return Ok(());
    };

    let fade_delay = page.config().loading_fade_delay_ms;
    let remove_delay = page.config().loading_remove_delay_ms;

    page.timers_mut().schedule(fade_delay, move |page| {
        page.document_mut().add_class(screen, FADE_OUT_CLASS);
        page.timers_mut().schedule(remove_delay, move |page| {
            page.document_mut().remove(screen);
        });
    });
    Ok(())
}

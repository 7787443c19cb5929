//! Scroll Effects - Hero parallax and scroll-indicator fade.
//!
//! Both run on every window scroll and look their element up each time, so
//! markup added after initialization is picked up.

use crate::engine::Selector;
use crate::error::FxResult;
use crate::pipeline::Page;
use crate::state::EventTarget;
use crate::types::EventKind;

pub const HERO_BACKGROUND: &str = ".hero-background";
pub const SCROLL_INDICATOR: &str = ".scroll-indicator";

/// Inline transform for the hero background at `scroll_y`.
pub fn parallax_transform(scroll_y: f32, factor: f32) -> String {
    format!("translateY({}px)", scroll_y * factor)
}

/// Scroll-indicator opacity at `scroll_y`.
pub fn indicator_opacity(scroll_y: f32, threshold: f32) -> &'static str {
    if scroll_y > threshold { "0" } else { "1" }
}

pub fn init_scroll_effects(page: &mut Page) -> FxResult<()> {
    let hero = Selector::parse(HERO_BACKGROUND)?;
    page.add_listener(EventTarget::Window, EventKind::Scroll, move |page, _| {
        let Some(node) = page.document().select_all(&hero).first().copied() else {
            return;
        };
        let transform = parallax_transform(page.viewport().scroll_y(), page.config().parallax_factor);
        page.document_mut().set_style(node, "transform", &transform);
    });

    let indicator = Selector::parse(SCROLL_INDICATOR)?;
    page.add_listener(EventTarget::Window, EventKind::Scroll, move |page, _| {
        let Some(node) = page.document().select_all(&indicator).first().copied() else {
            return;
        };
        let opacity = indicator_opacity(page.viewport().scroll_y(), page.config().scroll_threshold);
        page.document_mut().set_style(node, "opacity", opacity);
    });
    Ok(())
}

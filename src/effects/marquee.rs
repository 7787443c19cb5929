//! Tech Slider - Marquee content duplication and hover pause.
//!
//! The track's children are copied once, in order, so an external looping
//! animation can scroll seamlessly. Hovering the track pauses it.
//!
//! Initialization is not guarded: running it twice doubles the content
//! twice.

use crate::error::FxResult;
use crate::pipeline::Page;
use crate::state::EventTarget;
use crate::types::EventKind;

pub const TECH_TRACK: &str = ".tech-track";

pub fn init_tech_slider(page: &mut Page) -> FxResult<()> {
    let Some(track) = page.document().query(TECH_TRACK)? else {
        tracing::debug!("no tech track");
        return Ok(());
    };

    let copies = page.document_mut().duplicate_children(track)?;
    tracing::debug!(copies, "tech track duplicated");

    page.add_listener(EventTarget::Node(track), EventKind::PointerEnter, move |page, _| {
        page.document_mut().set_style(track, "animation-play-state", "paused");
    });
    page.add_listener(EventTarget::Node(track), EventKind::PointerLeave, move |page, _| {
        page.document_mut().set_style(track, "animation-play-state", "running");
    });
    Ok(())
}

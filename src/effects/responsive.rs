//! Responsive - Switch the navigation between desktop and mobile layouts.
//!
//! Above the breakpoint the nav list is forced to `display: flex` and the
//! menu button loses `active`. At or below it, the nav list is hidden unless
//! the user has it toggled open.

use crate::error::FxResult;
use crate::pipeline::Page;

use super::navigation::{ACTIVE_CLASS, MOBILE_MENU, NAV_LIST};

/// Whether `width` gets the desktop navigation.
pub fn is_desktop(width: f32, breakpoint: f32) -> bool {
    width > breakpoint
}

pub fn handle_resize(page: &mut Page) -> FxResult<()> {
    let nav = page.document().query(NAV_LIST)?;
    let menu = page.document().query(MOBILE_MENU)?;
    let desktop = is_desktop(page.viewport().width(), page.config().mobile_breakpoint);
    tracing::trace!(width = page.viewport().width(), desktop, "resize");

    let doc = page.document_mut();
    if desktop {
        if let Some(nav) = nav {
            doc.set_style(nav, "display", "flex");
        }
        if let Some(menu) = menu {
            doc.remove_class(menu, ACTIVE_CLASS);
        }
    } else if let Some(nav) = nav {
        if !doc.has_class(nav, ACTIVE_CLASS) {
            doc.set_style(nav, "display", "none");
        }
    }
    Ok(())
}

//! Mount API - Page lifecycle wiring.
//!
//! `mount` is the startup entry point. It hooks every controller to the page
//! lifecycle:
//!
//! 1. Debounced resize handler, also run once immediately
//! 2. `DOMContentLoaded` → every initializer, once
//! 3. `load` → lazy images
//!
//! If the page is already past a lifecycle stage, the work for that stage
//! runs during `mount` instead of waiting for an event that will never come.
//!
//! # Example
//!
//! ```ignore
//! use eagletech_fx::{mount, site, FxConfig, Page};
//!
//! let mut page = Page::new(site::eagletech_site()?, FxConfig::default());
//! let handle = mount(&mut page)?;
//!
//! page.content_loaded()?;
//! page.load()?;
//! page.scroll_window(250.0)?;
//!
//! handle.unmount(&mut page);
//! ```

use crate::effects::{self, lazy_images, responsive};
use crate::error::FxResult;
use crate::state::{debounce, EventTarget, ListenerId};
use crate::types::EventKind;

use super::page::{Page, ReadyState};

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`] that allows unmounting.
///
/// Holds the lifecycle listeners registered by `mount`. Listeners the
/// controllers installed themselves stay in place.
#[derive(Debug)]
pub struct MountHandle {
    listeners: Vec<ListenerId>,
}

impl MountHandle {
    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    /// Remove the lifecycle listeners from `page`.
    pub fn unmount(self, page: &mut Page) {
        for id in self.listeners {
            page.remove_listener(id);
        }
        tracing::debug!("unmounted");
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Wire every controller to the page lifecycle.
pub fn mount(page: &mut Page) -> FxResult<MountHandle> {
    let mut listeners = Vec::with_capacity(3);

    // Resize
    let on_resize = debounce(
        |page: &mut Page, ()| {
            if let Err(err) = responsive::handle_resize(page) {
                tracing::warn!(%err, "resize handler failed");
            }
        },
        page.config().resize_debounce_ms,
        false,
    );
    listeners.push(page.add_listener(EventTarget::Window, EventKind::Resize, move |page, _| {
        on_resize(page, ())
    }));
    responsive::handle_resize(page)?;

    // DOMContentLoaded
    if page.ready_state() == ReadyState::Loading {
        listeners.push(page.add_listener(
            EventTarget::Document,
            EventKind::ContentLoaded,
            |page, _| {
                if let Err(err) = effects::init_all(page) {
                    tracing::error!(%err, "initialization failed");
                }
            },
        ));
    } else {
        effects::init_all(page)?;
    }

    // load
    if page.ready_state() != ReadyState::Complete {
        listeners.push(page.add_listener(EventTarget::Window, EventKind::Load, |page, _| {
            if let Err(err) = lazy_images::init_lazy_images(page) {
                tracing::error!(%err, "lazy image setup failed");
            }
        }));
    } else {
        lazy_images::init_lazy_images(page)?;
    }

    tracing::debug!(ready_state = ?page.ready_state(), "mounted");
    page.flush()?;
    Ok(MountHandle { listeners })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FxConfig;
    use crate::engine::{el, Document};

    fn setup() -> Page {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append_tree(root, el("div").class("loading-screen").height(800.0)).unwrap();
        doc.append_tree(
            root,
            el("nav").child(el("ul").child(el("li").child(el("a").class("nav-link").attr("href", "#home")))),
        ).unwrap();
        doc.append_tree(root, el("button").class("mobile-menu")).unwrap();
        Page::new(doc, FxConfig::default()).with_viewport(1024.0, 768.0)
    }

    #[test]
    fn test_initializers_wait_for_content_loaded() {
        let mut page = setup();
        mount(&mut page).unwrap();
        page.advance(5000).unwrap();

        let screen = page.document().query(".loading-screen").unwrap();
        assert!(screen.is_some());

        page.content_loaded().unwrap();
        page.advance(2500).unwrap();
        assert_eq!(page.document().query(".loading-screen").unwrap(), None);
    }

    #[test]
    fn test_resize_runs_at_mount() {
        let mut page = setup();
        mount(&mut page).unwrap();
        let nav = page.document().query("nav ul").unwrap().unwrap();
        assert_eq!(page.document().style(nav, "display"), Some("flex"));
    }

    #[test]
    fn test_mount_after_content_loaded_runs_immediately() {
        let mut page = setup();
        page.content_loaded().unwrap();
        let handle = mount(&mut page).unwrap();
        assert_eq!(handle.listeners().len(), 2);

        page.advance(2000).unwrap();
        let screen = page.document().query(".loading-screen").unwrap().unwrap();
        assert!(page.document().has_class(screen, "fade-out"));
    }

    #[test]
    fn test_resize_is_debounced() {
        let mut page = setup();
        mount(&mut page).unwrap();
        let nav = page.document().query("nav ul").unwrap().unwrap();

        page.resize_window(500.0, 800.0).unwrap();
        page.advance(100).unwrap();
        page.resize_window(600.0, 800.0).unwrap();
        page.advance(249).unwrap();
        assert_eq!(page.document().style(nav, "display"), Some("flex"));

        page.advance(1).unwrap();
        assert_eq!(page.document().style(nav, "display"), Some("none"));
    }

    #[test]
    fn test_unmount_removes_lifecycle_listeners() {
        let mut page = setup();
        let before = page.listeners().len();
        let handle = mount(&mut page).unwrap();
        assert_eq!(page.listeners().len(), before + 3);

        handle.unmount(&mut page);
        assert_eq!(page.listeners().len(), before);

        page.content_loaded().unwrap();
        page.advance(3000).unwrap();
        assert!(page.document().query(".loading-screen").unwrap().is_some());
    }
}

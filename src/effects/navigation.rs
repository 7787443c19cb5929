//! Navigation - Mobile menu, header styling and in-page link scrolling.
//!
//! - Menu button click toggles `active` on the button and the nav list
//! - Any nav link click closes the menu
//! - Header is `scrolled` while the offset is past the scroll threshold
//! - Nav link clicks never navigate; the link's `href` is resolved as a
//!   selector and the window scrolls smoothly to the target, leaving room
//!   for the fixed header
//!
//! Menu state is reset on resize as well, see [`responsive`](super::responsive).

use crate::error::FxResult;
use crate::pipeline::Page;
use crate::state::{EventTarget, ScrollToOptions};
use crate::types::{EventKind, NodeId};

use super::log_failure;

pub const HEADER: &str = "header";
pub const MOBILE_MENU: &str = ".mobile-menu";
pub const NAV_LIST: &str = "nav ul";
pub const NAV_LINK: &str = ".nav-link";

pub const ACTIVE_CLASS: &str = "active";
pub const SCROLLED_CLASS: &str = "scrolled";

pub fn init_navigation(page: &mut Page) -> FxResult<()> {
    let doc = page.document();
    let header = doc.query(HEADER)?;
    let menu = doc.query(MOBILE_MENU)?;
    let nav = doc.query(NAV_LIST)?;
    let links = doc.query_all(NAV_LINK)?;

    if let (Some(menu), Some(nav)) = (menu, nav) {
        page.add_listener(EventTarget::Node(menu), EventKind::Click, move |page, _| {
            let doc = page.document_mut();
            doc.toggle_class(nav, ACTIVE_CLASS);
            doc.toggle_class(menu, ACTIVE_CLASS);
        });
    } else {
        tracing::debug!("mobile menu toggle skipped");
    }

    for &link in &links {
        page.add_listener(EventTarget::Node(link), EventKind::Click, move |page, _| {
            close_menu(page, nav, menu);
        });
    }

    if let Some(header) = header {
        page.add_listener(EventTarget::Window, EventKind::Scroll, move |page, _| {
            let scrolled = page.viewport().scroll_y() > page.config().scroll_threshold;
            let doc = page.document_mut();
            if scrolled {
                doc.add_class(header, SCROLLED_CLASS);
            } else {
                doc.remove_class(header, SCROLLED_CLASS);
            }
        });
    }

    for &link in &links {
        page.add_listener(EventTarget::Node(link), EventKind::Click, move |page, event| {
            event.prevent_default();
            log_failure("smooth scroll", scroll_to_link_target(page, link));
        });
    }

    tracing::debug!(links = links.len(), header = header.is_some(), "navigation ready");
    Ok(())
}

fn close_menu(page: &mut Page, nav: Option<NodeId>, menu: Option<NodeId>) {
    let doc = page.document_mut();
    if let Some(nav) = nav {
        doc.remove_class(nav, ACTIVE_CLASS);
    }
    if let Some(menu) = menu {
        doc.remove_class(menu, ACTIVE_CLASS);
    }
}

/// Smoothly scroll to the element named by the link's `href`.
///
/// A missing `href`, an `href` that is not a selector, or a target that
/// does not exist (or is not laid out) leaves the scroll position alone.
fn scroll_to_link_target(page: &mut Page, link: NodeId) -> FxResult<()> {
    let Some(href) = page.document().attribute(link, "href").map(str::to_owned) else {
        return Ok(());
    };
    let target = match page.document().query(&href) {
        Ok(target) => target,
        Err(err) => {
            tracing::debug!(%href, %err, "link target is not a selector");
            return Ok(());
        }
    };
    let Some(target) = target else {
        tracing::debug!(%href, "link target missing");
        return Ok(());
    };

    let Some(offset_top) = page.layout()?.offset_top(target) else {
        return Ok(());
    };
    let top = offset_top - page.config().header_offset;
    page.scroll_to(ScrollToOptions::smooth(top))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FxConfig;
    use crate::engine::{el, Document};

    struct Fixture {
        page: Page,
        header: NodeId,
        menu: NodeId,
        nav: NodeId,
        links: Vec<NodeId>,
    }

    fn setup() -> Fixture {
        let mut doc = Document::new();
        let root = doc.root();
        let header = doc.append_tree(root, el("header").height(80.0)).unwrap();
        let menu = doc.append_tree(header, el("button").class("mobile-menu")).unwrap();
        let nav = doc.append_tree(
            header,
            el("nav").child(el("ul").children([
                el("li").child(el("a").class("nav-link").attr("href", "#services")),
                el("li").child(el("a").class("nav-link").attr("href", "#missing")),
                el("li").child(el("a").class("nav-link").attr("href", "https://example.com")),
            ])),
        ).unwrap();
        let nav = doc.children(nav)[0];
        doc.append_tree(root, el("section").id("home").height(1000.0)).unwrap();
        doc.append_tree(root, el("section").id("services").height(2000.0)).unwrap();

        let mut page = Page::new(doc, FxConfig::default()).with_viewport(1280.0, 800.0);
        let links = page.document().query_all(".nav-link").unwrap();
        init_navigation(&mut page).unwrap();
        Fixture { page, header, menu, nav, links }
    }

    #[test]
    fn test_menu_toggle_flips_both() {
        let Fixture { mut page, menu, nav, .. } = setup();
        page.click(menu).unwrap();
        assert!(page.document().has_class(menu, "active"));
        assert!(page.document().has_class(nav, "active"));

        page.click(menu).unwrap();
        assert!(!page.document().has_class(menu, "active"));
        assert!(!page.document().has_class(nav, "active"));
    }

    #[test]
    fn test_link_click_forces_menu_closed() {
        let Fixture { mut page, menu, nav, links, .. } = setup();
        page.click(links[1]).unwrap();
        assert!(!page.document().has_class(nav, "active"));

        page.click(menu).unwrap();
        page.click(links[1]).unwrap();
        assert!(!page.document().has_class(menu, "active"));
        assert!(!page.document().has_class(nav, "active"));
    }

    #[test]
    fn test_header_scrolled_threshold() {
        let Fixture { mut page, header, .. } = setup();
        page.scroll_window(100.0).unwrap();
        assert!(!page.document().has_class(header, "scrolled"));
        page.scroll_window(101.0).unwrap();
        assert!(page.document().has_class(header, "scrolled"));
        page.scroll_window(0.0).unwrap();
        assert!(!page.document().has_class(header, "scrolled"));
    }

    #[test]
    fn test_link_scrolls_below_fixed_header() {
        let Fixture { mut page, links, .. } = setup();
        let navigated = page.click(links[0]).unwrap();
        assert!(!navigated);
        page.advance(1000).unwrap();
        // services starts at 80 + 1000
        assert_eq!(page.viewport().scroll_y(), 1000.0);
        assert!(page.navigations().is_empty());
    }

    #[test]
    fn test_unresolvable_targets_are_noops() {
        let Fixture { mut page, links, .. } = setup();
        assert!(!page.click(links[1]).unwrap());
        assert!(!page.click(links[2]).unwrap());
        page.advance(1000).unwrap();
        assert_eq!(page.viewport().scroll_y(), 0.0);
        assert!(page.navigations().is_empty());
    }
}

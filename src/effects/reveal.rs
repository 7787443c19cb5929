//! Reveal Animations - Fade elements in the first time they scroll into view.
//!
//! Each service card, team member and feature starts transparent and pushed
//! down. When it first intersects the viewport (10% visible, bottom edge
//! pulled in by 50px) it receives `animate-in`, whose stylesheet rule
//! restores it. The rule is injected into `head` at initialization.
//!
//! Revealed elements stay observed unless `release_revealed` is set; adding
//! the class again is a no-op either way.

use crate::error::FxResult;
use crate::pipeline::Page;
use crate::state::{IntersectionEntry, ObserverId, ObserverOptions};
use crate::types::Margin;

pub const REVEAL_TARGETS: &str = ".service-card, .team-member, .feature";
pub const REVEAL_CLASS: &str = "animate-in";

/// Stylesheet rule backing [`REVEAL_CLASS`].
pub const REVEAL_RULE: &str =
    ".animate-in { opacity: 1 !important; transform: translateY(0) !important; }";

pub fn init_animations(page: &mut Page) -> FxResult<()> {
    let config = page.config().clone();
    let options = ObserverOptions {
        threshold: config.reveal_threshold,
        root_margin: Margin::new(0.0, 0.0, config.reveal_root_margin_bottom, 0.0),
    };
    let release = config.release_revealed;

    let observer = page.create_observer(
        options,
        move |page: &mut Page, entries: &[IntersectionEntry], observer: ObserverId| {
            for entry in entries.iter().filter(|e| e.is_intersecting) {
                page.document_mut().add_class(entry.target, REVEAL_CLASS);
                if release {
                    page.unobserve(observer, entry.target);
                }
            }
        },
    );

    let targets = page.document().query_all(REVEAL_TARGETS)?;
    let offset = format!("translateY({}px)", config.reveal_offset_px);
    for &node in &targets {
        let doc = page.document_mut();
        doc.set_style(node, "opacity", "0");
        doc.set_style(node, "transform", &offset);
        doc.set_style(node, "transition", &config.reveal_transition);
        page.observe(observer, node);
    }

    inject_reveal_rule(page)?;
    tracing::debug!(targets = targets.len(), "reveal observer ready");
    Ok(())
}

fn inject_reveal_rule(page: &mut Page) -> FxResult<()> {
    let doc = page.document_mut();
    let head = match doc.query("head")? {
        Some(head) => head,
        None => doc.root(),
    };
    let style = doc.create_element("style");
    doc.set_text(style, REVEAL_RULE);
    doc.append_child(head, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FxConfig;
    use crate::engine::{el, Document, Mutation};
    use crate::types::NodeId;

    fn setup(config: FxConfig) -> (Page, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let root = doc.root();
        let head = doc.append_tree(root, el("head")).unwrap();
        let body = doc.append_tree(root, el("body")).unwrap();
        doc.append_tree(body, el("section").height(2000.0)).unwrap();
        let cards = vec![
            doc.append_tree(body, el("div").class("service-card").height(200.0)).unwrap(),
            doc.append_tree(body, el("div").class("team-member").height(200.0)).unwrap(),
            doc.append_tree(body, el("div").class("feature").height(200.0)).unwrap(),
        ];
        doc.append_tree(body, el("footer").height(2000.0)).unwrap();
        let page = Page::new(doc, config).with_viewport(1280.0, 800.0);
        (page, head, cards)
    }

    #[test]
    fn test_targets_start_hidden() {
        let (mut page, head, cards) = setup(FxConfig::default());
        init_animations(&mut page).unwrap();
        for card in &cards {
            assert_eq!(page.document().style(*card, "opacity"), Some("0"));
            assert_eq!(page.document().style(*card, "transform"), Some("translateY(30px)"));
            assert_eq!(
                page.document().style(*card, "transition"),
                Some("opacity 0.6s ease, transform 0.6s ease")
            );
        }
        let style = page.document().children(head)[0];
        assert_eq!(page.document().text(style), Some(REVEAL_RULE));
    }

    #[test]
    fn test_reveal_once_on_scroll() {
        let (mut page, _, cards) = setup(FxConfig::default());
        init_animations(&mut page).unwrap();
        page.flush().unwrap();
        assert!(!page.document().has_class(cards[0], "animate-in"));

        // first card spans 2000..2200; bottom 50px of the viewport is excluded
        page.scroll_window(1230.0).unwrap();
        assert!(!page.document().has_class(cards[0], "animate-in"));

        page.scroll_window(1500.0).unwrap();
        assert!(page.document().has_class(cards[0], "animate-in"));
        assert!(!page.document().has_class(cards[2], "animate-in"));

        page.scroll_window(0.0).unwrap();
        page.scroll_window(1500.0).unwrap();
        let adds = page
            .document()
            .mutations()
            .iter()
            .filter(|m| matches!(m, Mutation::AddClass { node, .. } if *node == cards[0]))
            .count();
        assert_eq!(adds, 1);
    }

    #[test]
    fn test_revealed_elements_stay_observed_by_default() {
        let (mut page, _, cards) = setup(FxConfig::default());
        init_animations(&mut page).unwrap();
        page.emit_intersection(cards[1], true);
        assert!(page.document().has_class(cards[1], "animate-in"));

        let observer = page.observers().ids()[0];
        assert!(page.is_observing(observer, cards[1]));
    }

    #[test]
    fn test_release_revealed_unobserves() {
        let config = FxConfig { release_revealed: true, ..FxConfig::default() };
        let (mut page, _, cards) = setup(config);
        init_animations(&mut page).unwrap();
        page.emit_intersection(cards[1], true);

        let observer = page.observers().ids()[0];
        assert!(!page.is_observing(observer, cards[1]));
        assert!(page.is_observing(observer, cards[0]));
    }

    #[test]
    fn test_rule_goes_to_root_without_head() {
        let mut page = Page::new(Document::new(), FxConfig::default());
        init_animations(&mut page).unwrap();
        let root = page.document().root();
        let style = page.document().children(root)[0];
        assert_eq!(page.document().element(style).map(|e| e.tag()), Some("style"));
    }
}

//! Interactive Features - Hover transforms for cards.
//!
//! Three independent categories, each an enter/leave pair:
//!
//! | Category         | Enter                                   | Leave                     |
//! |------------------|-----------------------------------------|---------------------------|
//! | `.service-card`  | `translateY(-10px) scale(1.02)`         | `translateY(0) scale(1)`  |
//! | `.team-member`   | overlay opacity `1`, image `scale(1.1)` | opacity `0`, `scale(1)`   |
//! | `.feature`       | `translateY(-5px)`                      | `translateY(0)`           |
//!
//! Team members only react when they contain both an overlay and an image.

use crate::error::FxResult;
use crate::pipeline::Page;
use crate::state::EventTarget;
use crate::types::{EventKind, NodeId};

use super::log_failure;

pub const SERVICE_CARD: &str = ".service-card";
pub const TEAM_MEMBER: &str = ".team-member";
pub const FEATURE: &str = ".feature";

const MEMBER_OVERLAY: &str = ".member-overlay";
const MEMBER_IMAGE: &str = ".member-image img";

/// Register an enter/leave pair that sets `transform` on the element itself.
fn bind_transform(page: &mut Page, node: NodeId, enter: &'static str, leave: &'static str) {
    page.add_listener(EventTarget::Node(node), EventKind::PointerEnter, move |page, _| {
        page.document_mut().set_style(node, "transform", enter);
    });
    page.add_listener(EventTarget::Node(node), EventKind::PointerLeave, move |page, _| {
        page.document_mut().set_style(node, "transform", leave);
    });
}

fn set_member_highlight(page: &mut Page, member: NodeId, on: bool) -> FxResult<()> {
    let doc = page.document();
    let (Some(overlay), Some(image)) =
        (doc.query_within(member, MEMBER_OVERLAY)?, doc.query_within(member, MEMBER_IMAGE)?)
    else {
        return Ok(());
    };
    let doc = page.document_mut();
    doc.set_style(overlay, "opacity", if on { "1" } else { "0" });
    doc.set_style(image, "transform", if on { "scale(1.1)" } else { "scale(1)" });
    Ok(())
}

pub fn init_interactive_features(page: &mut Page) -> FxResult<()> {
    let doc = page.document();
    let cards = doc.query_all(SERVICE_CARD)?;
    let members = doc.query_all(TEAM_MEMBER)?;
    let features = doc.query_all(FEATURE)?;

    for card in cards {
        bind_transform(page, card, "translateY(-10px) scale(1.02)", "translateY(0) scale(1)");
    }

    for member in members {
        page.add_listener(EventTarget::Node(member), EventKind::PointerEnter, move |page, _| {
            log_failure("member hover", set_member_highlight(page, member, true));
        });
        page.add_listener(EventTarget::Node(member), EventKind::PointerLeave, move |page, _| {
            log_failure("member hover", set_member_highlight(page, member, false));
        });
    }

    for feature in features {
        bind_transform(page, feature, "translateY(-5px)", "translateY(0)");
    }
    Ok(())
}

//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts element box styles to Taffy styles, runs layout computation,
//! and extracts absolute page rectangles into a [`ComputedLayout`].
//!
//! Every element is a flex container; column flow stands in for normal block
//! flow. Items never shrink, so explicit heights are honored even inside a
//! fixed-height parent.

use std::collections::HashMap;

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    LengthPercentageAuto, NodeId as TaffyNode, Rect as TaffyRect, Size, Style, TaffyTree,
};

use crate::engine::Document;
use crate::error::FxResult;
use crate::types::{BoxStyle, Dimension, FlowDirection, NodeId, Rect};

use super::types::ComputedLayout;

// =============================================================================
// STYLE CONVERSION
// =============================================================================

fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Px(px) => TaffyDimension::Length(px),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn to_taffy_flex_direction(dir: FlowDirection) -> TaffyFlexDirection {
    match dir {
        FlowDirection::Column => TaffyFlexDirection::Column,
        FlowDirection::Row => TaffyFlexDirection::Row,
    }
}

fn build_style(box_style: BoxStyle) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: to_taffy_flex_direction(box_style.direction),
        flex_shrink: 0.0,
        size: Size {
            width: to_taffy_dimension(box_style.width),
            height: to_taffy_dimension(box_style.height),
        },
        margin: TaffyRect {
            top: LengthPercentageAuto::Length(box_style.margin_top),
            right: LengthPercentageAuto::Length(0.0),
            bottom: LengthPercentageAuto::Length(box_style.margin_bottom),
            left: LengthPercentageAuto::Length(0.0),
        },
        ..Default::default()
    }
}

// =============================================================================
// TREE BUILDING
// =============================================================================

fn is_hidden(doc: &Document, node: NodeId) -> bool {
    doc.element(node)
        .and_then(|e| e.style("display"))
        .is_some_and(|d| d.trim() == "none")
}

fn build_node(
    doc: &Document,
    node: NodeId,
    tree: &mut TaffyTree<()>,
    nodes: &mut HashMap<NodeId, TaffyNode>,
) -> FxResult<Option<TaffyNode>> {
    let Some(element) = doc.element(node) else {
        return Ok(None);
    };
    if is_hidden(doc, node) {
        return Ok(None);
    }

    let mut children = Vec::with_capacity(element.children().len());
    for &child in element.children() {
        if let Some(child_node) = build_node(doc, child, tree, nodes)? {
            children.push(child_node);
        }
    }

    let taffy_node = tree.new_with_children(build_style(element.box_style()), &children)?;
    nodes.insert(node, taffy_node);
    Ok(Some(taffy_node))
}

fn extract(
    doc: &Document,
    node: NodeId,
    origin: (f32, f32),
    tree: &TaffyTree<()>,
    nodes: &HashMap<NodeId, TaffyNode>,
    out: &mut ComputedLayout,
) -> FxResult<()> {
    let Some(&taffy_node) = nodes.get(&node) else {
        return Ok(());
    };
    let layout = tree.layout(taffy_node)?;
    let x = origin.0 + layout.location.x;
    let y = origin.1 + layout.location.y;
    out.rects
        .insert(node, Rect::new(x, y, layout.size.width, layout.size.height));

    for &child in doc.children(node) {
        extract(doc, child, (x, y), tree, nodes, out)?;
    }
    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute absolute rectangles for every connected, visible element.
///
/// The root is forced to the viewport width; height grows with content.
pub fn compute_layout_taffy(doc: &Document, viewport_width: f32) -> FxResult<ComputedLayout> {
    let mut tree: TaffyTree<()> = TaffyTree::new();
    let mut nodes: HashMap<NodeId, TaffyNode> = HashMap::new();

    let root = doc.root();
    let Some(root_node) = build_node(doc, root, &mut tree, &mut nodes)? else {
        return Ok(ComputedLayout::new());
    };

    let mut root_style = tree.style(root_node)?.clone();
    root_style.size.width = TaffyDimension::Length(viewport_width);
    tree.set_style(root_node, root_style)?;

    let available = Size {
        width: AvailableSpace::Definite(viewport_width),
        height: AvailableSpace::MaxContent,
    };
    tree.compute_layout(root_node, available)?;

    let mut result = ComputedLayout::new();
    extract(doc, root, (0.0, 0.0), &tree, &nodes, &mut result)?;

    let root_layout = tree.layout(root_node)?;
    result.content_width = root_layout.size.width;
    result.content_height = root_layout.size.height;

    tracing::trace!(
        nodes = result.len(),
        content_height = result.content_height,
        "layout computed"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::el;

    fn setup() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let header = doc.append_tree(root, el("header").height(80.0)).unwrap();
        let hero = doc.append_tree(root, el("section").id("home").height(600.0)).unwrap();
        let services = doc.append_tree(
            root,
            el("section").id("services").height(400.0).margin(20.0, 0.0),
        ).unwrap();
        (doc, header, hero, services)
    }

    #[test]
    fn test_compute_layout_stacks_sections() {
        let (doc, header, hero, services) = setup();
        let layout = compute_layout_taffy(&doc, 1024.0).unwrap();

        assert_eq!(layout.offset_top(header), Some(0.0));
        assert_eq!(layout.offset_top(hero), Some(80.0));
        assert_eq!(layout.offset_top(services), Some(700.0));
        assert_eq!(layout.rect(hero).unwrap().width, 1024.0);
        assert_eq!(layout.content_height, 1100.0);
    }

    #[test]
    fn test_nested_offsets_are_absolute() {
        let (mut doc, _, _, services) = setup();
        let card = doc.append_tree(services, el("div").class("service-card").height(100.0).margin(50.0, 0.0)).unwrap();
        let layout = compute_layout_taffy(&doc, 800.0).unwrap();
        assert_eq!(layout.offset_top(card), Some(750.0));
    }

    #[test]
    fn test_display_none_excluded() {
        let (mut doc, _, hero, services) = setup();
        doc.set_style(hero, "display", "none");
        let layout = compute_layout_taffy(&doc, 1024.0).unwrap();

        assert_eq!(layout.rect(hero), None);
        assert_eq!(layout.offset_top(services), Some(100.0));
    }

    #[test]
    fn test_detached_elements_have_no_rect() {
        let (mut doc, header, _, _) = setup();
        doc.remove(header);
        let layout = compute_layout_taffy(&doc, 1024.0).unwrap();
        assert_eq!(layout.rect(header), None);
    }

    #[test]
    fn test_row_flow() {
        let mut doc = Document::new();
        let root = doc.root();
        let row = doc.append_tree(
            root,
            el("ul")
                .row()
                .height(40.0)
                .child(el("li").width(100.0))
                .child(el("li").width(100.0)),
        ).unwrap();
        let items = doc.children(row).to_vec();
        let layout = compute_layout_taffy(&doc, 1024.0).unwrap();
        assert_eq!(layout.rect(items[1]).unwrap().x, 100.0);
        assert_eq!(layout.rect(items[1]).unwrap().y, 0.0);
    }
}

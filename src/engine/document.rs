//! Document - Owned view tree with a mutation journal.
//!
//! The tree is an arena of elements addressed by [`NodeId`]. Removing an
//! element detaches it; the slot stays allocated so stale handles remain
//! valid and further writes to them are harmless.
//!
//! Every effective write is recorded as a [`Mutation`]. Writes that change
//! nothing (adding a class already present, removing a detached node) are
//! not recorded, which makes idempotence observable.
//!
//! Writes that can move boxes (tree changes and `display`) also bump the
//! layout revision, a signal layout memos depend on. Classes, attributes,
//! text and every other inline style leave it alone.

use std::collections::BTreeMap;

use spark_signals::{signal, Signal};

use crate::error::{FxError, FxResult};
use crate::types::{BoxStyle, NodeId};

use super::builder::ElementBuilder;
use super::selector::Selector;

// =============================================================================
// TYPES
// =============================================================================

/// A single element in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    box_style: BoxStyle,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            styles: Vec::new(),
            text: None,
            children: Vec::new(),
            parent: None,
            box_style: BoxStyle::default(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Inline style property value.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn box_style(&self) -> BoxStyle {
        self.box_style
    }
}

/// An effective change to the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddClass { node: NodeId, class: String },
    RemoveClass { node: NodeId, class: String },
    SetAttribute { node: NodeId, name: String, value: String },
    SetStyle { node: NodeId, property: String, value: String },
    SetText { node: NodeId, text: String },
    AppendChild { parent: NodeId, child: NodeId },
    Remove { node: NodeId },
}

impl Mutation {
    /// The node this mutation was applied to.
    pub fn node(&self) -> NodeId {
        match self {
            Mutation::AddClass { node, .. }
            | Mutation::RemoveClass { node, .. }
            | Mutation::SetAttribute { node, .. }
            | Mutation::SetStyle { node, .. }
            | Mutation::SetText { node, .. }
            | Mutation::Remove { node } => *node,
            Mutation::AppendChild { parent, .. } => *parent,
        }
    }
}

/// Inline style properties that feed layout.
const LAYOUT_STYLES: &[&str] = &["display"];

/// The view tree.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
    journal: Vec<Mutation>,
    layout_revision: Signal<u64>,
}

impl Clone for Document {
    /// The copy gets its own layout revision signal.
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            journal: self.journal.clone(),
            layout_revision: signal(self.layout_revision.get()),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl Document {
    /// Create a document holding only the root `html` element.
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("html")],
            root: NodeId(0),
            journal: Vec::new(),
            layout_revision: signal(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Allocate a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Element::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    /// Build markup under `parent` without journaling.
    ///
    /// Used to set up the page before any controller runs.
    pub fn append_tree(&mut self, parent: NodeId, tree: ElementBuilder) -> FxResult<NodeId> {
        if self.element(parent).is_none() {
            return Err(FxError::UnknownNode(parent.0));
        }
        let node = self.build(parent, tree);
        self.bump_layout();
        Ok(node)
    }

    fn build(&mut self, parent: NodeId, tree: ElementBuilder) -> NodeId {
        let node = self.create_element(&tree.tag);
        {
            let element = &mut self.nodes[node.0];
            element.classes = tree.classes;
            element.attributes = tree.attributes.into_iter().collect();
            element.styles = tree.styles;
            element.text = tree.text;
            element.box_style = tree.box_style;
        }
        self.nodes[node.0].parent = Some(parent);
        self.nodes[parent.0].children.push(node);
        for child in tree.children {
            self.build(node, child);
        }
        node
    }

    fn record(&mut self, mutation: Mutation) {
        let moves_boxes = match &mutation {
            Mutation::AppendChild { .. } | Mutation::Remove { .. } => true,
            Mutation::SetStyle { property, .. } => LAYOUT_STYLES.contains(&property.as_str()),
            _ => false,
        };
        tracing::trace!(?mutation, moves_boxes, "document mutation");
        self.journal.push(mutation);
        if moves_boxes {
            self.bump_layout();
        }
    }

    fn bump_layout(&self) {
        self.layout_revision.set(self.layout_revision.get() + 1);
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0)
    }
}

// =============================================================================
// TREE ACCESS
// =============================================================================

impl Document {
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node).and_then(Element::parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.element(node).map(Element::children).unwrap_or(&[])
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.element(node).and_then(Element::text)
    }

    /// Is `node` attached to the root?
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == self.root {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Is `ancestor` a strict ancestor of `node`?
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Strict descendants of `scope` in document (pre-)order.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Count of layout-affecting changes so far.
    pub fn layout_revision(&self) -> u64 {
        self.layout_revision.get()
    }

    pub fn layout_revision_signal(&self) -> Signal<u64> {
        self.layout_revision.clone()
    }
}

// =============================================================================
// QUERIES
// =============================================================================

impl Document {
    /// First connected element matching `selector`, in document order.
    pub fn query(&self, selector: &str) -> FxResult<Option<NodeId>> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    /// All connected elements matching `selector`, in document order.
    pub fn query_all(&self, selector: &str) -> FxResult<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.select_all(&selector))
    }

    /// Descendants of `scope` matching `selector`.
    pub fn query_within(&self, scope: NodeId, selector: &str) -> FxResult<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .find(|n| selector.matches(self, *n)))
    }

    /// Select with a pre-parsed selector.
    pub fn select_all(&self, selector: &Selector) -> Vec<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(|n| selector.matches(self, *n))
            .collect()
    }

    /// Element whose `id` attribute equals `id`.
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|n| self.element(*n).and_then(|e| e.attribute("id")) == Some(id))
    }
}

// =============================================================================
// WRITES
// =============================================================================

impl Document {
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.has_class(class))
    }

    /// Add a class. Returns `false` if it was already present.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        if element.has_class(class) {
            return false;
        }
        element.classes.push(class.to_string());
        self.record(Mutation::AddClass { node, class: class.to_string() });
        true
    }

    /// Remove a class. Returns `false` if it was not present.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        let before = element.classes.len();
        element.classes.retain(|c| c != class);
        if element.classes.len() == before {
            return false;
        }
        self.record(Mutation::RemoveClass { node, class: class.to_string() });
        true
    }

    /// Flip a class. Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class)
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|e| e.attribute(name))
    }

    /// Set an attribute. Returns `false` if the value was unchanged.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        if element.attribute(name) == Some(value) {
            return false;
        }
        element.attributes.insert(name.to_string(), value.to_string());
        self.record(Mutation::SetAttribute {
            node,
            name: name.to_string(),
            value: value.to_string(),
        });
        true
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.element(node).and_then(|e| e.style(property))
    }

    /// Set an inline style property. Returns `false` if unchanged.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        match element.styles.iter_mut().find(|(p, _)| p == property) {
            Some((_, v)) if v == value => return false,
            Some((_, v)) => *v = value.to_string(),
            None => element.styles.push((property.to_string(), value.to_string())),
        }
        self.record(Mutation::SetStyle {
            node,
            property: property.to_string(),
            value: value.to_string(),
        });
        true
    }

    /// Replace the text content of `node`. Returns `false` if unchanged.
    pub fn set_text(&mut self, node: NodeId, text: &str) -> bool {
        let Some(element) = self.element_mut(node) else {
            return false;
        };
        if element.text.as_deref() == Some(text) {
            return false;
        }
        element.text = Some(text.to_string());
        self.record(Mutation::SetText { node, text: text.to_string() });
        true
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> FxResult<()> {
        if self.element(parent).is_none() {
            return Err(FxError::UnknownNode(parent.0));
        }
        if self.element(child).is_none() {
            return Err(FxError::UnknownNode(child.0));
        }
        if parent == child || self.contains(child, parent) {
            return Err(FxError::Hierarchy(format!(
                "node {} cannot be appended inside itself",
                child.0
            )));
        }
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        self.record(Mutation::AppendChild { parent, child });
        Ok(())
    }

    /// Detach `node` from its parent. Returns `false` if already detached.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if !self.detach(node) {
            return false;
        }
        self.record(Mutation::Remove { node });
        true
    }

    fn detach(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.parent(node) else {
            return false;
        };
        self.nodes[parent.0].children.retain(|c| *c != node);
        self.nodes[node.0].parent = None;
        true
    }

    /// Deep-copy `node` and its subtree into a new detached element.
    pub fn clone_subtree(&mut self, node: NodeId) -> FxResult<NodeId> {
        let Some(source) = self.element(node).cloned() else {
            return Err(FxError::UnknownNode(node.0));
        };
        let copy = self.create_element(&source.tag);
        {
            let element = &mut self.nodes[copy.0];
            element.classes = source.classes;
            element.attributes = source.attributes;
            element.styles = source.styles;
            element.text = source.text;
            element.box_style = source.box_style;
        }
        for child in source.children {
            let child_copy = self.clone_subtree(child)?;
            self.nodes[child_copy.0].parent = Some(copy);
            self.nodes[copy.0].children.push(child_copy);
        }
        Ok(copy)
    }

    /// Append a deep copy of every child of `node`, doubling its content.
    ///
    /// Returns the number of appended copies.
    pub fn duplicate_children(&mut self, node: NodeId) -> FxResult<usize> {
        let originals = self.children(node).to_vec();
        for child in &originals {
            let copy = self.clone_subtree(*child)?;
            self.append_child(node, copy)?;
        }
        Ok(originals.len())
    }
}

// =============================================================================
// JOURNAL
// =============================================================================

impl Document {
    /// Mutations recorded since the last drain.
    pub fn mutations(&self) -> &[Mutation] {
        &self.journal
    }

    pub fn drain_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.journal)
    }
}

// =============================================================================
// SERIALIZATION
// =============================================================================

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Document {
    /// Markup of the children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.text(node) {
            out.push_str(&escape(text));
        }
        for child in self.children(node) {
            self.write_outer(*child, &mut out);
        }
        out
    }

    /// Markup of `node` including itself.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_outer(node, &mut out);
        out
    }

    fn write_outer(&self, node: NodeId, out: &mut String) {
        let Some(element) = self.element(node) else {
            return;
        };
        out.push('<');
        out.push_str(&element.tag);
        if !element.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape(&element.classes.join(" "))));
        }
        for (name, value) in &element.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        if !element.styles.is_empty() {
            let style: Vec<String> = element
                .styles
                .iter()
                .map(|(p, v)| format!("{p}: {v};"))
                .collect();
            out.push_str(&format!(" style=\"{}\"", escape(&style.join(" "))));
        }
        out.push('>');
        out.push_str(&self.inner_html(node));
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! Element Builder - Declarative markup construction.
//!
//! # Example
//!
//! ```ignore
//! use eagletech_fx::engine::{el, Document};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! doc.append_tree(root, el("header").height(80.0).child(
//!     el("button").class("mobile-menu"),
//! ))?;
//! ```

use crate::types::{BoxStyle, Dimension, FlowDirection};

/// Pending element description, consumed by [`Document::append_tree`](super::Document::append_tree).
#[derive(Debug, Clone, Default)]
pub struct ElementBuilder {
    pub(crate) tag: String,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) styles: Vec<(String, String)>,
    pub(crate) text: Option<String>,
    pub(crate) box_style: BoxStyle,
    pub(crate) children: Vec<ElementBuilder>,
}

/// Start building an element with the given tag.
pub fn el(tag: &str) -> ElementBuilder {
    ElementBuilder {
        tag: tag.to_string(),
        ..Default::default()
    }
}

impl ElementBuilder {
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: &str) -> Self {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.retain(|(n, _)| n != name);
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.styles.retain(|(p, _)| p != property);
        self.styles.push((property.to_string(), value.to_string()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn width(mut self, width: impl Into<Dimension>) -> Self {
        self.box_style.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<Dimension>) -> Self {
        self.box_style.height = height.into();
        self
    }

    /// Lay children out horizontally.
    pub fn row(mut self) -> Self {
        self.box_style.direction = FlowDirection::Row;
        self
    }

    pub fn margin(mut self, top: f32, bottom: f32) -> Self {
        self.box_style.margin_top = top;
        self.box_style.margin_bottom = bottom;
        self
    }

    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementBuilder>) -> Self {
        self.children.extend(children);
        self
    }
}

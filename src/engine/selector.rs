//! Selector Engine - Parse and match the selector subset the page uses.
//!
//! Supported:
//! - Compound parts: `tag`, `*`, `#id`, `.class`, `[attr]`, `[attr=value]`
//! - Descendant combinator (whitespace): `nav ul`, `.member-image img`
//! - Groups: `.service-card, .team-member, .feature`
//!
//! Matching runs right to left: the last compound must match the subject,
//! earlier compounds are matched against ancestors.

use crate::error::{FxError, FxResult};
use crate::types::NodeId;

use super::document::Document;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

/// Descendant chain, subject last.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    parts: Vec<Compound>,
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    groups: Vec<Complex>,
}

// =============================================================================
// PARSING
// =============================================================================

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn parse_compound(src: &str) -> FxResult<Compound> {
    let chars: Vec<char> = src.chars().collect();
    let mut pos = 0;
    let mut compound = Compound::default();

    if chars.first() == Some(&'*') {
        pos += 1;
    } else if chars.first().is_some_and(|c| is_ident_char(*c)) {
        compound.tag = Some(read_ident(&chars, &mut pos).to_ascii_lowercase());
    }

    while pos < chars.len() {
        match chars[pos] {
            '#' => {
                pos += 1;
                let id = read_ident(&chars, &mut pos);
                if id.is_empty() {
                    return Err(FxError::selector(format!("empty id in `{src}`")));
                }
                compound.id = Some(id);
            }
            '.' => {
                pos += 1;
                let class = read_ident(&chars, &mut pos);
                if class.is_empty() {
                    return Err(FxError::selector(format!("empty class in `{src}`")));
                }
                compound.classes.push(class);
            }
            '[' => {
                pos += 1;
                let name = read_ident(&chars, &mut pos);
                if name.is_empty() {
                    return Err(FxError::selector(format!("empty attribute in `{src}`")));
                }
                let value = if chars.get(pos) == Some(&'=') {
                    pos += 1;
                    let quote = chars.get(pos).copied().filter(|c| *c == '"' || *c == '\'');
                    let value = if let Some(q) = quote {
                        pos += 1;
                        let start = pos;
                        while pos < chars.len() && chars[pos] != q {
                            pos += 1;
                        }
                        if pos == chars.len() {
                            return Err(FxError::selector(format!("unterminated string in `{src}`")));
                        }
                        let v: String = chars[start..pos].iter().collect();
                        pos += 1;
                        v
                    } else {
                        read_ident(&chars, &mut pos)
                    };
                    Some(value)
                } else {
                    None
                };
                if chars.get(pos) != Some(&']') {
                    return Err(FxError::selector(format!("expected `]` in `{src}`")));
                }
                pos += 1;
                compound.attrs.push(AttrMatch { name, value });
            }
            c => {
                return Err(FxError::selector(format!("unexpected `{c}` in `{src}`")));
            }
        }
    }

    Ok(compound)
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(src: &str) -> FxResult<Self> {
        let mut groups = Vec::new();
        for group in src.split(',') {
            let group = group.trim();
            if group.is_empty() {
                return Err(FxError::selector(format!("empty selector in `{src}`")));
            }
            let parts = group
                .split_whitespace()
                .map(parse_compound)
                .collect::<FxResult<Vec<_>>>()?;
            groups.push(Complex { parts });
        }
        Ok(Self { groups })
    }

    /// Does the element match any group of this selector?
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.groups.iter().any(|complex| complex.matches(doc, node))
    }
}

// =============================================================================
// MATCHING
// =============================================================================

impl Compound {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(element) = doc.element(node) else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if element.tag() != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|attr| match (&attr.value, element.attribute(&attr.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        })
    }
}

impl Complex {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some((subject, ancestors)) = self.parts.split_last() else {
            return false;
        };
        if !subject.matches(doc, node) {
            return false;
        }

        // Greedy ancestor walk is exact for descendant-only chains
        let mut remaining = ancestors.iter().rev().peekable();
        let mut current = doc.parent(node);
        while let Some(part) = remaining.peek() {
            let Some(ancestor) = current else {
                return false;
            };
            if part.matches(doc, ancestor) {
                remaining.next();
            }
            current = doc.parent(ancestor);
        }
        true
    }
}

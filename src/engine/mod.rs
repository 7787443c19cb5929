//! Engine - The owned view tree.
//!
//! - [`Document`] arena of elements with a mutation journal
//! - [`Selector`] parsing and matching
//! - [`el`] builder for markup

pub mod builder;
pub mod document;
pub mod selector;

pub use builder::{el, ElementBuilder};
pub use document::{Document, Element, Mutation};
pub use selector::Selector;

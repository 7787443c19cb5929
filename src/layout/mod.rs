//! Layout Module
//!
//! Page geometry computed with [Taffy](https://github.com/DioxusLabs/taffy).
//! The bridge:
//!
//! 1. Converts element box styles → Taffy styles
//! 2. Builds the Taffy tree from the document, skipping `display: none`
//! 3. Extracts absolute page rectangles
//!
//! Smooth scrolling reads `offset_top`, scroll clamping reads
//! `content_height`, and intersection observers read element rectangles.

mod taffy_bridge;
mod types;

pub use taffy_bridge::compute_layout_taffy as compute_layout;
pub use types::ComputedLayout;

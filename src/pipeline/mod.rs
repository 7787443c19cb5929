//! Page Pipeline
//!
//! Connects input to the controllers that react to it.
//!
//! ```text
//! EventSource → Page::feed → dispatch → listeners → Document mutations
//!                                 ↘ timers / observers ↗
//! ```
//!
//! - **page** - The runtime: document, viewport, timers, listeners, observers
//! - **source** - Input events and the `EventSource` capability trait
//! - **mount** - Startup wiring of every controller

pub mod mount;
pub mod page;
pub mod source;

pub use mount::{mount, MountHandle};
pub use page::{Page, ReadyState};
pub use source::{EventSource, InputEvent, ScriptedSource};

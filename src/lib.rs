//! # eagletech-fx
//!
//! Headless view-effects controller for the EagleTech landing page.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! viewport state and [taffy](https://github.com/DioxusLabs/taffy) for page
//! geometry.
//!
//! ## Architecture
//!
//! The page is an owned [`Document`] arena driven by a [`Page`] runtime.
//! Controllers never touch a global: they receive `&mut Page`, look up their
//! markup, and register listeners, timers and intersection observers. Every
//! effective document write is journaled as a [`Mutation`], so behavior can
//! be asserted without a browser.
//!
//! ```text
//! EventSource → Page ─ dispatch → listeners ─┐
//!                │                           ├→ Document (+ journal)
//!                ├─ advance → timers ────────┤
//!                └─ flush → observers ───────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Node handles, event kinds, geometry
//! - [`engine`] - Document arena, selectors, markup builder
//! - [`layout`] - Taffy layout bridge
//! - [`state`] - Viewport, timers, debounce, events, observers, scrolling
//! - [`pipeline`] - Page runtime, event sources, mount
//! - [`effects`] - The page controllers
//! - [`site`] - Reference landing-page markup
//!
//! ## Example
//!
//! ```ignore
//! use eagletech_fx::{mount, site, FxConfig, Page};
//!
//! let mut page = Page::new(site::eagletech_site()?, FxConfig::default());
//! mount(&mut page)?;
//! page.content_loaded()?;
//! page.scroll_window(240.0)?;
//!
//! for mutation in page.document_mut().drain_mutations() {
//!     println!("{mutation:?}");
//! }
//! ```

pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod site;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::FxConfig;
pub use error::{FxError, FxResult};

pub use engine::{el, Document, Element, ElementBuilder, Mutation, Selector};

pub use layout::{compute_layout, ComputedLayout};

pub use state::{
    debounce, Event, EventTarget, IntersectionEntry, ListenerId, ObserverId, ObserverOptions,
    ScrollBehavior, ScrollToOptions, TimerId, TimerQueue, Viewport,
};

pub use pipeline::{mount, EventSource, InputEvent, MountHandle, Page, ReadyState, ScriptedSource};

pub use effects::{
    handle_resize, init_all, init_animations, init_interactive_features, init_lazy_images,
    init_loading_screen, init_navigation, init_scroll_effects, init_tech_slider, EagleTech,
    Initializer, LoadingPhase,
};

//! State Module - Runtime primitives the page is built from
//!
//! - **Viewport** - Scroll offset and size as signals
//! - **Timers** - Virtual clock with cancellable timers
//! - **Debounce** - Burst collapsing on top of timers
//! - **Events** - Event objects and listener registry
//! - **Intersection** - Viewport intersection observers
//! - **Scroll** - Instant and smooth window scrolling

pub mod debounce;
pub mod events;
pub mod intersection;
pub mod scroll;
pub mod timers;
pub mod viewport;

pub use debounce::debounce;
pub use events::{Event, EventTarget, Listener, ListenerId, ListenerRegistry};
pub use intersection::{
    IntersectionEntry, ObserverCallback, ObserverId, ObserverOptions, ObserverRegistry,
};
pub use scroll::{ScrollBehavior, ScrollToOptions};
pub use timers::{TimerCallback, TimerId, TimerQueue};
pub use viewport::Viewport;

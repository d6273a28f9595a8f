//! Multi-touch viewport controller.
//!
//! [`ViewportController`] turns touch-pointer events into a bounded
//! [`Transform`] (uniform scale + translation): two-finger pinch zooms about
//! the finger midpoint, one finger pans while zoomed in, and a double tap
//! toggles between the rest scale and 1:1.

pub mod clock;
pub mod config;
pub mod controller;
pub mod loader;
pub mod shared;
pub mod trace;
pub mod tracker;
pub mod views;

pub use clock::{Clock, ManualClock};
#[cfg(not(target_arch = "wasm32"))]
pub use clock::SystemClock;
pub use config::{ConfigError, ConfigParseError, ViewportConfig};
pub use controller::{Gesture, ViewportController};
pub use shared::SharedViewport;
pub use tracker::TouchTracker;
pub use touchview_protocol::{Point, TouchEvent, TouchPhase, Transform};

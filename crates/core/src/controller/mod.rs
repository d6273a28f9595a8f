//! The viewport controller: turns touch-pointer streams into a bounded
//! scale + translation.
//!
//! Every event is handled synchronously. A start event runs the double-tap
//! detector first, then (re)opens the gesture session; move events are
//! classified against the session and solved into a candidate transform
//! that is clamped before it is published.
//!
//! Session and tap state never leave the controller; only the published
//! [`Transform`] and the last [`Gesture`] are observable:
//!
//! ```compile_fail
//! use touchview_core::controller::GestureSession;
//! ```
//!
//! ```compile_fail
//! let c = touchview_core::ViewportController::new(Default::default()).unwrap();
//! let _ = c.session();
//! ```

mod clamp;
mod geometry;
mod session;
mod solver;
mod tap;

pub use clamp::{clamp, is_legal};
pub use geometry::{distance, midpoint, scale_ratio};
pub use session::Gesture;

use session::{GestureSession, classify};
use solver::{solve_pan, solve_pinch};
use tap::{TapDetector, toggle_target};

use log::{debug, trace};
use touchview_protocol::{Point, TouchEvent, TouchPhase, Transform};

use crate::clock::Clock;
use crate::config::{ConfigError, ViewportConfig};

#[derive(Debug)]
pub struct ViewportController<C> {
    config: ViewportConfig,
    clock: C,
    transform: Transform,
    session: Option<GestureSession>,
    tap: TapDetector,
    gesture: Option<Gesture>,
}

#[cfg(not(target_arch = "wasm32"))]
impl ViewportController<crate::clock::SystemClock> {
    /// Controller on the system clock.
    pub fn new(config: ViewportConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, crate::clock::SystemClock::new())
    }
}

impl<C: Clock> ViewportController<C> {
    /// Fails fast on a configuration that could publish an illegal transform.
    pub fn with_clock(config: ViewportConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            transform: Transform::at_scale(config.initial_scale),
            config,
            clock,
            session: None,
            tap: TapDetector::new(),
            gesture: None,
        })
    }

    /// The published transform.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Classification of the most recent move in the open session.
    pub fn gesture(&self) -> Option<Gesture> {
        self.gesture
    }

    /// Whether the surface is zoomed in far enough for one-finger panning.
    pub fn is_zoomed(&self) -> bool {
        self.transform.scale > self.config.initial_scale + self.config.pan_threshold
    }

    /// Process one event and return the transform to paint.
    pub fn handle(&mut self, phase: TouchPhase, touches: &[Point]) -> Transform {
        match phase {
            TouchPhase::Start => self.on_start(touches),
            TouchPhase::Move => self.on_move(touches),
            TouchPhase::End => self.on_end(touches),
            TouchPhase::Cancel => self.close_session("cancel"),
        }
        self.transform
    }

    pub fn apply(&mut self, event: &TouchEvent) -> Transform {
        self.handle(event.phase, &event.touches)
    }

    /// Back to rest scale, dropping any gesture and pending tap.
    pub fn reset(&mut self) {
        self.transform = Transform::at_scale(self.config.initial_scale);
        self.session = None;
        self.gesture = None;
        self.tap.reset();
    }

    fn on_start(&mut self, touches: &[Point]) {
        if touches.is_empty() {
            debug!("start event without touches ignored");
            return;
        }

        if touches.len() == 1 {
            let now = self.clock.now_ms();
            if self.tap.on_single_start(now, self.config.double_tap_window_ms) {
                let target = toggle_target(self.transform.scale, &self.config);
                debug!(
                    "double tap: scale {} -> {}",
                    self.transform.scale, target.scale
                );
                self.publish(target);
            }
        }

        self.rebaseline(touches);
    }

    fn on_move(&mut self, touches: &[Point]) {
        let Some(session) = self.session else {
            debug!("move without an open gesture ignored");
            return;
        };

        let gesture = classify(&session, touches.len(), self.transform.scale, &self.config);
        self.gesture = Some(gesture);
        let candidate = match (gesture, touches) {
            (Gesture::Pinch, [p0, p1, ..]) => solve_pinch(&session, *p0, *p1),
            (Gesture::Pan, [p]) => solve_pan(&session, *p),
            _ => return,
        };
        trace!("{gesture:?} -> {candidate:?}");
        self.publish(clamp(candidate, &self.config));
    }

    fn on_end(&mut self, remaining: &[Point]) {
        if remaining.is_empty() {
            self.close_session("last touch lifted");
        } else {
            // A finger lifted mid-gesture: restart from where things are now
            // so the remaining finger does not jump.
            self.rebaseline(remaining);
        }
    }

    fn rebaseline(&mut self, touches: &[Point]) {
        self.session = GestureSession::open(touches, self.transform);
        self.gesture = None;
        debug!(
            "gesture session opened with {} touch(es) at scale {}",
            touches.len(),
            self.transform.scale
        );
    }

    fn close_session(&mut self, reason: &str) {
        if self.session.take().is_some() {
            debug!("gesture session closed ({reason})");
        }
        self.gesture = None;
    }

    fn publish(&mut self, t: Transform) {
        debug_assert!(is_legal(&t, &self.config), "illegal transform {t:?}");
        self.transform = t;
    }
}

use touchview_protocol::Transform;

use crate::config::{TOGGLE_SCALE, ViewportConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
enum TapState {
    Idle,
    /// A single-finger start was seen at `at` (ms) and may be the first half
    /// of a double tap.
    Primed { at: f64 },
}

/// Double-tap recognizer over single-finger start events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TapDetector {
    state: TapState,
}

impl TapDetector {
    pub(crate) fn new() -> Self {
        Self {
            state: TapState::Idle,
        }
    }

    /// Feed a single-finger start at `now_ms`. Returns `true` when it
    /// completes a double tap; the detector is then consumed back to idle so
    /// a third rapid tap primes instead of re-triggering.
    pub(crate) fn on_single_start(&mut self, now_ms: f64, window_ms: f64) -> bool {
        match self.state {
            TapState::Primed { at } if now_ms - at < window_ms => {
                self.state = TapState::Idle;
                true
            }
            _ => {
                self.state = TapState::Primed { at: now_ms };
                false
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn last_tap_at(&self) -> Option<f64> {
        match self.state {
            TapState::Idle => None,
            TapState::Primed { at } => Some(at),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.state = TapState::Idle;
    }
}

impl Default for TapDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a double tap sends the surface from `current_scale`.
pub(crate) fn toggle_target(current_scale: f64, config: &ViewportConfig) -> Transform {
    if current_scale > config.initial_scale + config.toggle_threshold {
        Transform::at_scale(config.initial_scale)
    } else {
        Transform::at_scale(TOGGLE_SCALE)
    }
}

//! Recorded gesture traces and their deterministic replay.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use touchview_protocol::{TouchEvent, Transform};

use crate::clock::ManualClock;
use crate::config::{ConfigError, ViewportConfig};
use crate::controller::ViewportController;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("invalid trace JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid trace config: {0}")]
    Config(#[from] ConfigError),
    #[error("event {index} goes back in time ({time_ms}ms after {previous_ms}ms)")]
    NonMonotonic {
        index: usize,
        time_ms: f64,
        previous_ms: f64,
    },
}

/// A recorded touch sequence, optionally with the config it was captured under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureTrace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub config: Option<ViewportConfig>,
    pub events: Vec<TouchEvent>,
}

impl GestureTrace {
    /// Parse and sanity-check a trace.
    pub fn from_json(data: &[u8]) -> Result<Self, TraceError> {
        let trace: Self = serde_json::from_slice(data)?;
        if let Some(config) = &trace.config {
            config.validate()?;
        }
        let mut previous_ms = f64::NEG_INFINITY;
        for (index, event) in trace.events.iter().enumerate() {
            if event.time_ms < previous_ms {
                return Err(TraceError::NonMonotonic {
                    index,
                    time_ms: event.time_ms,
                    previous_ms,
                });
            }
            previous_ms = event.time_ms;
        }
        Ok(trace)
    }

    pub fn config_or_default(&self) -> ViewportConfig {
        self.config.unwrap_or_default()
    }

    /// A controller ready to replay this trace, with its clock at zero.
    pub fn controller(&self) -> Result<ViewportController<ManualClock>, ConfigError> {
        ViewportController::with_clock(self.config_or_default(), ManualClock::new(0.0))
    }
}

/// Drive `controller` through one recorded event, moving its clock to the
/// event's timestamp first.
pub fn step(controller: &mut ViewportController<ManualClock>, event: &TouchEvent) -> Transform {
    controller.clock().set(event.time_ms);
    controller.apply(event)
}

/// Replay a whole trace; one published transform per event.
pub fn replay(trace: &GestureTrace) -> Result<Vec<Transform>, ConfigError> {
    let mut controller = trace.controller()?;
    Ok(trace
        .events
        .iter()
        .map(|event| step(&mut controller, event))
        .collect())
}

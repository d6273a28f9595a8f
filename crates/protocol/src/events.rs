use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Kind of a touch-pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    /// A finger went down. `touches` includes it.
    Start,
    /// One or more active fingers moved.
    Move,
    /// A finger lifted. `touches` holds the fingers still down.
    End,
    /// The platform interrupted the gesture (incoming call, system UI).
    Cancel,
}

/// One touch-pointer event as delivered by the embedding surface.
///
/// `touches` is the full ordered set of currently active points, ordered by
/// stable touch identity (first finger down first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Event timestamp in milliseconds. Only relative differences matter.
    #[serde(default)]
    pub time_ms: f64,
    pub phase: TouchPhase,
    #[serde(default)]
    pub touches: Vec<Point>,
}

impl TouchEvent {
    pub fn new(time_ms: f64, phase: TouchPhase, touches: Vec<Point>) -> Self {
        Self {
            time_ms,
            phase,
            touches,
        }
    }
}

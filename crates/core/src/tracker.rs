//! Per-pointer platform events to ordered active-touch sets.
//!
//! Platforms like egui or winit report one event per finger, keyed by a
//! touch id. The controller wants the whole ordered set of active points
//! with each event; [`TouchTracker`] keeps that set, ordered by first-down.

use log::warn;
use touchview_protocol::{Point, TouchEvent, TouchPhase};

#[derive(Debug, Clone)]
pub struct TouchTracker<Id> {
    ids: Vec<Id>,
    points: Vec<Point>,
}

impl<Id: PartialEq + Copy + std::fmt::Debug> TouchTracker<Id> {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            points: Vec::new(),
        }
    }

    /// Record one pointer event. Returns the phase to forward to the
    /// controller together with [`points`](Self::points), or `None` when
    /// the event refers to a pointer the tracker never saw go down.
    pub fn update(&mut self, id: Id, phase: TouchPhase, pos: Point) -> Option<TouchPhase> {
        let idx = self.ids.iter().position(|t| *t == id);
        match (phase, idx) {
            (TouchPhase::Start, Some(i)) => {
                warn!("touch start for already active pointer {id:?}");
                self.points[i] = pos;
                Some(TouchPhase::Start)
            }
            (TouchPhase::Start, None) => {
                self.ids.push(id);
                self.points.push(pos);
                Some(TouchPhase::Start)
            }
            (TouchPhase::Move, Some(i)) => {
                self.points[i] = pos;
                Some(TouchPhase::Move)
            }
            (TouchPhase::End, Some(i)) => {
                // `remove`, not `swap_remove`: order is touch identity.
                self.ids.remove(i);
                self.points.remove(i);
                Some(TouchPhase::End)
            }
            (TouchPhase::Cancel, _) => {
                // A cancel aborts the whole sequence, not just one finger.
                self.clear();
                Some(TouchPhase::Cancel)
            }
            (TouchPhase::Move | TouchPhase::End, None) => {
                warn!("got a {phase:?} event for non-active touch point {id:?}");
                None
            }
        }
    }

    /// Currently active points, first finger down first.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.points.clear();
    }

    /// Snapshot as a self-contained event, e.g. for recording a trace.
    pub fn to_event(&self, time_ms: f64, phase: TouchPhase) -> TouchEvent {
        TouchEvent::new(time_ms, phase, self.points.clone())
    }
}

impl<Id: PartialEq + Copy + std::fmt::Debug> Default for TouchTracker<Id> {
    fn default() -> Self {
        Self::new()
    }
}

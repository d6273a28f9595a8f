use touchview_core::trace::{GestureTrace, step};
use touchview_core::{ConfigError, ManualClock, Point, TouchEvent, Transform, ViewportController};

/// A trace with a cursor: the controller state after the first `applied`
/// events.
pub struct Replay {
    trace: GestureTrace,
    controller: ViewportController<ManualClock>,
    applied: usize,
}

impl Replay {
    pub fn new(trace: GestureTrace) -> Result<Self, ConfigError> {
        let controller = trace.controller()?;
        Ok(Self {
            trace,
            controller,
            applied: 0,
        })
    }

    pub fn trace(&self) -> &GestureTrace {
        &self.trace
    }

    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn len(&self) -> usize {
        self.trace.events.len()
    }

    pub fn controller(&self) -> &ViewportController<ManualClock> {
        &self.controller
    }

    pub fn transform(&self) -> Transform {
        self.controller.transform()
    }

    /// Most recently applied event.
    pub fn current_event(&self) -> Option<&TouchEvent> {
        self.applied
            .checked_sub(1)
            .and_then(|i| self.trace.events.get(i))
    }

    /// Touches active after the most recent event.
    pub fn touches(&self) -> &[Point] {
        self.current_event()
            .map(|e| e.touches.as_slice())
            .unwrap_or_default()
    }

    /// Move the cursor to `target` events applied. Going backwards replays
    /// from the start, since the controller cannot be rewound.
    pub fn seek(&mut self, target: usize) -> Result<(), ConfigError> {
        let target = target.min(self.len());
        if target < self.applied {
            self.controller = self.trace.controller()?;
            self.applied = 0;
        }
        while self.applied < target {
            step(&mut self.controller, &self.trace.events[self.applied]);
            self.applied += 1;
        }
        Ok(())
    }

    pub fn forward(&mut self) -> Result<(), ConfigError> {
        self.seek(self.applied + 1)
    }

    pub fn back(&mut self) -> Result<(), ConfigError> {
        self.seek(self.applied.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use touchview_core::TouchPhase;

    fn trace() -> GestureTrace {
        GestureTrace {
            name: None,
            config: None,
            events: vec![
                TouchEvent::new(
                    0.0,
                    TouchPhase::Start,
                    vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
                ),
                TouchEvent::new(
                    16.0,
                    TouchPhase::Move,
                    vec![Point::new(0.0, 0.0), Point::new(200.0, 0.0)],
                ),
                TouchEvent::new(32.0, TouchPhase::End, vec![]),
            ],
        }
    }

    #[test]
    fn seeking_back_replays_from_start() {
        let mut replay = Replay::new(trace()).unwrap();
        replay.seek(2).unwrap();
        let zoomed = replay.transform();
        assert!((zoomed.scale - 1.2).abs() < 1e-9);
        assert_eq!(replay.touches().len(), 2);

        replay.back().unwrap();
        assert_eq!(replay.applied(), 1);
        assert_eq!(replay.transform(), Transform::at_scale(0.6));

        replay.seek(10).unwrap();
        assert_eq!(replay.applied(), 3);
        assert_eq!(replay.transform(), zoomed);
        assert!(replay.touches().is_empty());
    }

    #[test]
    fn nothing_applied_initially() {
        let replay = Replay::new(trace()).unwrap();
        assert!(replay.current_event().is_none());
        assert!(replay.touches().is_empty());
        assert_eq!(replay.len(), 3);
    }
}

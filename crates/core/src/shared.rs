use std::sync::{Arc, Mutex, MutexGuard};

use touchview_protocol::{Point, TouchPhase, Transform};

use crate::clock::Clock;
use crate::controller::ViewportController;

/// A controller shared between an input thread (the single writer) and
/// render threads that only read the published transform.
#[derive(Debug)]
pub struct SharedViewport<C> {
    inner: Arc<Mutex<ViewportController<C>>>,
}

impl<C> Clone for SharedViewport<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> SharedViewport<C> {
    pub fn new(controller: ViewportController<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    pub fn handle(&self, phase: TouchPhase, touches: &[Point]) -> Transform {
        self.lock().handle(phase, touches)
    }

    /// Copy of the published transform.
    pub fn transform(&self) -> Transform {
        self.lock().transform()
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    // Every mutation completes inside the lock, so a poisoned controller
    // still holds a published (clamped) transform.
    fn lock(&self) -> MutexGuard<'_, ViewportController<C>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

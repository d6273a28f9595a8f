//! Keyed registry of one-shot external resources (scripts, fonts, ...).
//!
//! Each resource moves `Unloaded -> Loading -> Ready | Failed` exactly once.
//! The first requester is told to start the load; everyone arriving while it
//! is in flight gets a receiver that resolves when [`ResourceRegistry::finish`]
//! is called.

use std::collections::HashMap;
use std::hash::Hash;

use futures_channel::oneshot;
use log::{debug, warn};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("resource failed to load: {reason}")]
pub struct LoadError {
    pub reason: String,
}

impl LoadError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Ready,
    Failed(LoadError),
}

pub type Waiter = oneshot::Receiver<Result<(), LoadError>>;

/// What the caller of [`ResourceRegistry::request`] should do next.
#[derive(Debug)]
pub enum Request {
    /// Nobody is loading this yet: the caller must load it and call `finish`.
    Start,
    /// A load is in flight; await the receiver.
    Wait(Waiter),
    Ready,
    Failed(LoadError),
}

#[derive(Debug)]
struct Entry {
    state: LoadState,
    waiters: Vec<oneshot::Sender<Result<(), LoadError>>>,
}

#[derive(Debug)]
pub struct ResourceRegistry<K> {
    entries: HashMap<K, Entry>,
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> ResourceRegistry<K> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn state(&self, key: &K) -> LoadState {
        self.entries
            .get(key)
            .map_or(LoadState::Unloaded, |e| e.state.clone())
    }

    pub fn request(&mut self, key: K) -> Request {
        let entry = self.entries.entry(key.clone()).or_insert_with(|| Entry {
            state: LoadState::Unloaded,
            waiters: Vec::new(),
        });
        match &entry.state {
            LoadState::Unloaded => {
                debug!("loading resource {key:?}");
                entry.state = LoadState::Loading;
                Request::Start
            }
            LoadState::Loading => {
                let (tx, rx) = oneshot::channel();
                entry.waiters.push(tx);
                Request::Wait(rx)
            }
            LoadState::Ready => Request::Ready,
            LoadState::Failed(err) => Request::Failed(err.clone()),
        }
    }

    /// Record the outcome of the load started by a `Request::Start` and
    /// wake every waiter. Returns `false` if `key` was not loading.
    pub fn finish(&mut self, key: &K, result: Result<(), LoadError>) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            warn!("finish for unknown resource {key:?}");
            return false;
        };
        if entry.state != LoadState::Loading {
            warn!("finish for resource {key:?} in state {:?}", entry.state);
            return false;
        }

        entry.state = match &result {
            Ok(()) => LoadState::Ready,
            Err(err) => LoadState::Failed(err.clone()),
        };
        debug!("resource {key:?} -> {:?}", entry.state);
        for waiter in entry.waiters.drain(..) {
            // A dropped receiver just means that caller stopped waiting.
            let _ = waiter.send(result.clone());
        }
        true
    }

    /// Forget a failed resource so the next request retries it. Loading
    /// and ready entries are kept.
    pub fn retry(&mut self, key: &K) -> bool {
        if matches!(self.state(key), LoadState::Failed(_)) {
            self.entries.remove(key);
            true
        } else {
            false
        }
    }
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> Default for ResourceRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_request_starts_later_ones_wait() {
        let mut registry = ResourceRegistry::new();
        assert!(matches!(registry.request("maps.js"), Request::Start));
        assert_eq!(registry.state(&"maps.js"), LoadState::Loading);

        let Request::Wait(mut a) = registry.request("maps.js") else {
            panic!("expected wait");
        };
        let Request::Wait(mut b) = registry.request("maps.js") else {
            panic!("expected wait");
        };
        assert_eq!(a.try_recv().unwrap(), None);

        assert!(registry.finish(&"maps.js", Ok(())));
        assert_eq!(a.try_recv().unwrap(), Some(Ok(())));
        assert_eq!(b.try_recv().unwrap(), Some(Ok(())));
        assert!(matches!(registry.request("maps.js"), Request::Ready));
    }

    #[test]
    fn failure_is_broadcast_and_sticky() {
        let mut registry = ResourceRegistry::new();
        registry.request("a");
        let Request::Wait(mut waiter) = registry.request("a") else {
            panic!("expected wait");
        };
        registry.finish(&"a", Err(LoadError::new("404")));
        assert_eq!(
            waiter.try_recv().unwrap(),
            Some(Err(LoadError::new("404")))
        );
        assert!(matches!(registry.request("a"), Request::Failed(_)));

        assert!(registry.retry(&"a"));
        assert!(matches!(registry.request("a"), Request::Start));
    }

    #[test]
    fn finish_without_start_is_rejected() {
        let mut registry: ResourceRegistry<&str> = ResourceRegistry::new();
        assert!(!registry.finish(&"x", Ok(())));
        registry.request("x");
        registry.finish(&"x", Ok(()));
        assert!(!registry.finish(&"x", Err(LoadError::new("late"))));
        assert_eq!(registry.state(&"x"), LoadState::Ready);
    }

    #[test]
    fn keys_are_independent() {
        let mut registry = ResourceRegistry::new();
        assert!(matches!(registry.request(1), Request::Start));
        assert!(matches!(registry.request(2), Request::Start));
        assert_eq!(registry.state(&3), LoadState::Unloaded);
        assert!(!registry.retry(&1));
    }
}

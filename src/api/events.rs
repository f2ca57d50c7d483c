//! Session notifications and listener registry

use std::collections::BTreeMap;

use crate::api::types::SessionState;
use crate::core::LatLng;
use crate::hardware::{SensorError, SensorKind};

/// Listener function type
pub type EventListener = Box<dyn Fn(&TrackingEvent) + Send>;

/// Notifications emitted by a tracking session
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    /// POIs are placed in the scene and safe to use
    PoisReady,
    /// Accepted heading in degrees
    HeadingChanged(f64),
    /// New smoothed device position
    PositionChanged(LatLng),
    StateChanged {
        old_state: SessionState,
        new_state: SessionState,
    },
    /// A sensor source reported an error
    SensorFault {
        sensor: SensorKind,
        error: SensorError,
    },
    StartupTimedOut {
        waited_ms: u64,
    },
}

/// Listener registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(u32);

impl ListenerHandle {
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Registered listeners, called in registration order
#[derive(Default)]
pub struct ListenerRegistry {
    counter: u32,
    listeners: BTreeMap<ListenerHandle, EventListener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: EventListener) -> ListenerHandle {
        self.counter += 1;
        let handle = ListenerHandle(self.counter);
        self.listeners.insert(handle, listener);
        handle
    }

    /// Returns false if the handle was not registered
    pub fn unregister(&mut self, handle: ListenerHandle) -> bool {
        self.listeners.remove(&handle).is_some()
    }

    pub fn emit(&self, event: &TrackingEvent) {
        for listener in self.listeners.values() {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

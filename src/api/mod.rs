//! Session API
//!
//! [`TrackingSession`] is the entry point: initialize it with POI
//! descriptors and a configuration, start it, and call `process` regularly.

pub mod events;
pub mod session;
pub mod types;

pub use events::{EventListener, ListenerHandle, ListenerRegistry, TrackingEvent};
pub use session::TrackingSession;
pub use types::{ReadinessGap, SessionState, TrackingError, TrackingResult};

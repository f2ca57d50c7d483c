//! Sensor abstraction layer
//!
//! Heading and position providers are platform plugins implemented
//! outside this crate. This module defines the traits they implement,
//! the subscription plumbing that carries their samples into a session,
//! their error types, and mock sources for tests and replay.

pub mod source;
pub mod mock;
pub mod error;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use source::{
    HeadingSource, HeadingWatchOptions, PositionSource, PositionWatchOptions, SampleSink,
    SensorMessage, SensorPayload, SubscriptionHandle,
};
pub use mock::{MockFeed, MockHeadingSource, MockPositionSource, MockSensor};
pub use error::{RecoveryStrategy, SensorError, SensorErrorClass, SensorResult};

/// Which sensor a sample or error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Heading,
    Position,
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::Heading => write!(f, "heading"),
            SensorKind::Position => write!(f, "position"),
        }
    }
}

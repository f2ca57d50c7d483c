//! Common API types and error definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::hardware::{SensorError, SensorErrorClass, SensorKind};
use crate::scene::SceneError;
use crate::utils::config::ConfigError;
use crate::validation::DescriptorError;

/// Result type for session operations
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Stopped,
    /// Subscriptions open, waiting for heading and geolocation
    Starting,
    Running,
    /// Reserved; `stop()` goes straight to `Stopped`
    Stopping,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Stopped => "stopped",
            SessionState::Starting => "starting",
            SessionState::Running => "running",
            SessionState::Stopping => "stopping",
        };
        f.write_str(name)
    }
}

/// A startup precondition that was not met
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessGap {
    /// A sensor source reported it is not ready
    SensorsNotReady,
    NoHeading,
    NoGeolocation,
}

impl fmt::Display for ReadinessGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessGap::SensorsNotReady => write!(f, "sensor layer not ready"),
            ReadinessGap::NoHeading => write!(f, "no accepted heading"),
            ReadinessGap::NoGeolocation => write!(f, "no geolocation"),
        }
    }
}

fn list_gaps(gaps: &[ReadinessGap]) -> String {
    gaps.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Session-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackingError {
    #[error("invalid POI descriptor '{poi_id}': {reason}")]
    InvalidDescriptor { poi_id: String, reason: String },

    #[error("POI id '{poi_id}' is used more than once")]
    DuplicatePoiId { poi_id: String },

    #[error("invalid configuration '{parameter}' = '{value}': {reason}")]
    InvalidConfiguration { parameter: String, value: String, reason: String },

    #[error("startup timed out after {waited_ms}ms: {}", list_gaps(.missing))]
    StartupTimeout { waited_ms: u64, missing: Vec<ReadinessGap> },

    #[error("{sensor} sensor unavailable: {details}")]
    SensorUnavailable { sensor: SensorKind, details: String },

    #[error("{sensor} read error: {details}")]
    TransientReadError { sensor: SensorKind, details: String },

    #[error("session not initialized")]
    NotInitialized,

    #[error("cannot {operation} while {state}")]
    InvalidState { operation: &'static str, state: SessionState },

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<DescriptorError> for TrackingError {
    fn from(error: DescriptorError) -> Self {
        match error {
            DescriptorError::DuplicateId { poi_id } => TrackingError::DuplicatePoiId { poi_id },
            other => TrackingError::InvalidDescriptor {
                poi_id: other.poi_id().to_string(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<SensorError> for TrackingError {
    fn from(error: SensorError) -> Self {
        let sensor = error.sensor();
        let details = error.to_string();
        match error.class() {
            SensorErrorClass::Unavailable => TrackingError::SensorUnavailable { sensor, details },
            SensorErrorClass::TransientRead => TrackingError::TransientReadError { sensor, details },
        }
    }
}

impl TrackingError {
    /// Configuration errors found during validation are reported as
    /// `InvalidConfiguration`; file and parse errors keep their own variant.
    pub(crate) fn from_validation(error: ConfigError) -> Self {
        match error {
            ConfigError::InvalidParameter { parameter, value, reason } => {
                TrackingError::InvalidConfiguration { parameter, value, reason }
            }
            other => TrackingError::Config(other),
        }
    }
}

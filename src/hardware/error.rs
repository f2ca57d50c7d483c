//! Sensor error types and handling

use thiserror::Error;

use crate::hardware::SensorKind;

/// Errors reported by heading and position sources
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SensorError {
    /// User or OS refused access to the sensor
    #[error("{sensor} sensor permission denied")]
    PermissionDenied { sensor: SensorKind },
    /// Device has no such sensor or the platform does not support it
    #[error("{sensor} sensor not supported: {details}")]
    NotSupported { sensor: SensorKind, details: String },
    /// No reading within the requested time
    #[error("{sensor} sensor timed out after {timeout_ms}ms")]
    Timeout { sensor: SensorKind, timeout_ms: u32 },
    /// A reading could not be obtained this time
    #[error("{sensor} read failed: {details}")]
    ReadFailed { sensor: SensorKind, details: String },
    /// A reading arrived but its values are unusable
    #[error("malformed {sensor} sample: {details}")]
    MalformedSample { sensor: SensorKind, details: String },
}

/// Broad classification surfaced to session callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorErrorClass {
    /// The sensor cannot be used this session
    Unavailable,
    /// A single read went wrong; later reads may succeed
    TransientRead,
}

/// Recovery strategy for sensor failures
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecoveryStrategy {
    /// Keep the subscription, wait for the next sample
    Retry,
    /// Keep the subscription, expect a gap of roughly `delay_ms`
    RetryWithDelay { delay_ms: u32 },
    /// Cancel and watch again
    Resubscribe,
    /// Give up on this sensor
    Fail,
}

/// Result type for sensor operations
pub type SensorResult<T> = Result<T, SensorError>;

impl SensorError {
    pub fn sensor(&self) -> SensorKind {
        match self {
            SensorError::PermissionDenied { sensor }
            | SensorError::NotSupported { sensor, .. }
            | SensorError::Timeout { sensor, .. }
            | SensorError::ReadFailed { sensor, .. }
            | SensorError::MalformedSample { sensor, .. } => *sensor,
        }
    }

    pub fn class(&self) -> SensorErrorClass {
        match self {
            SensorError::PermissionDenied { .. } | SensorError::NotSupported { .. } => {
                SensorErrorClass::Unavailable
            }
            SensorError::Timeout { .. }
            | SensorError::ReadFailed { .. }
            | SensorError::MalformedSample { .. } => SensorErrorClass::TransientRead,
        }
    }

    /// Get the recommended recovery strategy for this error
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            SensorError::PermissionDenied { .. } => RecoveryStrategy::Fail,
            SensorError::NotSupported { .. } => RecoveryStrategy::Fail,
            SensorError::Timeout { timeout_ms, .. } => RecoveryStrategy::RetryWithDelay { delay_ms: *timeout_ms },
            SensorError::ReadFailed { .. } => RecoveryStrategy::Resubscribe,
            SensorError::MalformedSample { .. } => RecoveryStrategy::Retry,
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.recovery_strategy(), RecoveryStrategy::Fail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let denied = SensorError::PermissionDenied { sensor: SensorKind::Position };
        assert_eq!(denied.class(), SensorErrorClass::Unavailable);
        assert!(!denied.is_recoverable());
        assert_eq!(denied.sensor(), SensorKind::Position);

        let timeout = SensorError::Timeout { sensor: SensorKind::Heading, timeout_ms: 500 };
        assert_eq!(timeout.class(), SensorErrorClass::TransientRead);
        assert_eq!(timeout.recovery_strategy(), RecoveryStrategy::RetryWithDelay { delay_ms: 500 });
        assert!(timeout.is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = SensorError::ReadFailed {
            sensor: SensorKind::Heading,
            details: "magnetometer busy".to_string(),
        };
        assert_eq!(err.to_string(), "heading read failed: magnetometer busy");
    }
}

//! Geodetic constants and tracking parameters

/// WGS84 semi-major axis (meters)
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6378137.0;

/// WGS84 flattening
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257223563;

/// WGS84 first eccentricity squared
pub const WGS84_ECCENTRICITY_SQUARED: f64 = 2.0 * WGS84_FLATTENING - WGS84_FLATTENING * WGS84_FLATTENING;

/// Number of raw position samples averaged into the anchor
pub const GEOLOCATION_WINDOW: usize = 5;

/// Heading samples discarded after a watch starts
pub const HEADING_WARMUP_SAMPLES: u32 = 10;

/// Default accuracy gate for heading samples (degrees)
pub const DEFAULT_MIN_HEADING_ACCURACY: f64 = 15.0;

/// Requested compass sample period (milliseconds)
pub const HEADING_SAMPLE_INTERVAL_MS: u32 = 100;

/// Interval between startup readiness checks (milliseconds)
pub const STARTUP_POLL_INTERVAL_MS: u32 = 200;

/// Startup deadline before the session gives up on its sensors (milliseconds)
pub const DEFAULT_STARTUP_TIMEOUT_MS: u32 = 30_000;

/// Smallest anchor movement forwarded to the camera (meters)
pub const MIN_CAMERA_DELTA_M: f64 = 1.0;

//! Sensor sample processing: smoothing and gating

pub mod moving_average;
pub mod heading;
pub mod geolocation;

pub use moving_average::MovingAverageFilter;
pub use heading::{HeadingDecision, HeadingTracker};
pub use geolocation::{GeolocationTracker, GeolocationUpdate};

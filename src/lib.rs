//! POI tracking engine
//!
//! Places points of interest (given as GPS coordinates or as polar offsets
//! from the device) in a local 3D scene frame centered on the device, using
//! smoothed GPS fixes and compass heading, and keeps the scene camera in
//! step with the device as it moves.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod hardware;
pub mod scene;
pub mod api;

// Re-export commonly used types
pub use core::{EcefCoordinate, GeodeticCoordinate, HeadingSample, LatLng, LocalCoordinate, PoiDescriptor, PoiKind};
pub use algorithms::{geodetic_to_ecef, AxisCorrectionTable, CameraDriver, Platform, PoiResolver, ResolvedPois};
pub use processing::{GeolocationTracker, HeadingTracker, MovingAverageFilter};
pub use hardware::{
    HeadingSource, MockHeadingSource, MockPositionSource, PositionSource, SensorError, SensorKind,
    SubscriptionHandle,
};
pub use scene::{InMemoryScene, Scene, SceneError};
pub use utils::{ConfigError, ConfigurationManager, TrackingConfig, VisualizationConfig};
pub use validation::{DescriptorError, DescriptorValidator};
pub use api::{
    ListenerHandle, SessionState, TrackingError, TrackingEvent, TrackingResult, TrackingSession,
};

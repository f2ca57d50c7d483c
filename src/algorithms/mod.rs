//! Positioning algorithms: projection, axis correction, POI placement, camera driving

pub mod projection;
pub mod axis_correction;
pub mod poi_resolver;
pub mod camera_driver;

pub use projection::{geodetic_to_ecef, polar_to_local, rotate_ground, CoordinateValidator};
pub use axis_correction::{AxisCorrection, AxisCorrectionTable, Platform};
pub use poi_resolver::{PoiResolver, ResolvedPoi, ResolvedPois};
pub use camera_driver::CameraDriver;

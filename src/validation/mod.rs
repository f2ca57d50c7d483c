//! Input validation for POI descriptors

pub mod data;

pub use data::{DescriptorError, DescriptorValidator, GpsRecord, PoiLocationRecord, PolarRecord};

//! POI descriptor parsing and validation
//!
//! Descriptors arrive as loosely shaped records (an id plus either a `gps`
//! or a `polar` block). Records are converted into [`PoiDescriptor`] only
//! when exactly one block is present, and whole descriptor sets are checked
//! for finite, in-range values and unique ids before a session accepts them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::algorithms::projection::CoordinateValidator;
use crate::core::{GeodeticCoordinate, PoiDescriptor};

/// Descriptor validation failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DescriptorError {
    /// Neither or both of `gps` / `polar` present
    #[error("POI '{poi_id}' is malformed: {reason}")]
    Malformed { poi_id: String, reason: String },

    #[error("POI '{poi_id}' has an invalid value: {reason}")]
    InvalidValue { poi_id: String, reason: String },

    #[error("POI id must not be empty")]
    EmptyId,

    #[error("POI id '{poi_id}' is used more than once")]
    DuplicateId { poi_id: String },
}

impl DescriptorError {
    /// Id of the offending POI, empty for [`DescriptorError::EmptyId`]
    pub fn poi_id(&self) -> &str {
        match self {
            DescriptorError::Malformed { poi_id, .. }
            | DescriptorError::InvalidValue { poi_id, .. }
            | DescriptorError::DuplicateId { poi_id } => poi_id,
            DescriptorError::EmptyId => "",
        }
    }
}

/// `gps` block of a POI record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsRecord {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub height: f64,
}

/// `polar` block of a POI record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarRecord {
    /// Bearing from north in degrees
    pub angle: f64,
    pub radius: f64,
    #[serde(default)]
    pub height: f64,
}

/// Wire shape of a POI descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiLocationRecord {
    pub poi_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polar: Option<PolarRecord>,
}

impl TryFrom<PoiLocationRecord> for PoiDescriptor {
    type Error = DescriptorError;

    fn try_from(record: PoiLocationRecord) -> Result<Self, Self::Error> {
        match (record.gps, record.polar) {
            (Some(gps), None) => Ok(PoiDescriptor::Geodetic {
                poi_id: record.poi_id,
                coordinate: GeodeticCoordinate::new(gps.lat, gps.lng, gps.height),
            }),
            (None, Some(polar)) => Ok(PoiDescriptor::Polar {
                poi_id: record.poi_id,
                angle_deg: polar.angle,
                radius: polar.radius,
                height: polar.height,
            }),
            (None, None) => Err(DescriptorError::Malformed {
                poi_id: record.poi_id,
                reason: "neither gps nor polar location given".to_string(),
            }),
            (Some(_), Some(_)) => Err(DescriptorError::Malformed {
                poi_id: record.poi_id,
                reason: "both gps and polar locations given".to_string(),
            }),
        }
    }
}

impl From<PoiDescriptor> for PoiLocationRecord {
    fn from(descriptor: PoiDescriptor) -> Self {
        match descriptor {
            PoiDescriptor::Geodetic { poi_id, coordinate } => PoiLocationRecord {
                poi_id,
                gps: Some(GpsRecord {
                    lat: coordinate.latitude,
                    lng: coordinate.longitude,
                    height: coordinate.height,
                }),
                polar: None,
            },
            PoiDescriptor::Polar { poi_id, angle_deg, radius, height } => PoiLocationRecord {
                poi_id,
                gps: None,
                polar: Some(PolarRecord { angle: angle_deg, radius, height }),
            },
        }
    }
}

/// Descriptor set validator
pub struct DescriptorValidator;

impl DescriptorValidator {
    /// Validate a single descriptor's values
    pub fn validate(descriptor: &PoiDescriptor) -> Result<(), DescriptorError> {
        if descriptor.poi_id().trim().is_empty() {
            return Err(DescriptorError::EmptyId);
        }

        let check = match descriptor {
            PoiDescriptor::Geodetic { coordinate, .. } => CoordinateValidator::validate_geodetic(coordinate),
            PoiDescriptor::Polar { angle_deg, radius, height, .. } => {
                CoordinateValidator::validate_polar(*angle_deg, *radius, *height)
            }
        };

        check.map_err(|reason| DescriptorError::InvalidValue {
            poi_id: descriptor.poi_id().to_string(),
            reason: reason.to_string(),
        })
    }

    /// Validate every descriptor and id uniqueness; stops at the first failure
    pub fn validate_all(descriptors: &[PoiDescriptor]) -> Result<(), DescriptorError> {
        let mut seen = HashSet::with_capacity(descriptors.len());

        for descriptor in descriptors {
            Self::validate(descriptor)?;
            if !seen.insert(descriptor.poi_id()) {
                return Err(DescriptorError::DuplicateId {
                    poi_id: descriptor.poi_id().to_string(),
                });
            }
        }

        Ok(())
    }

    /// Parse and validate a JSON array of POI records
    pub fn parse_json(json: &str) -> Result<Vec<PoiDescriptor>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

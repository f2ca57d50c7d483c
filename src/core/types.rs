//! Core data types for the tracking engine

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

use crate::validation::data::PoiLocationRecord;

/// Geodetic position (degrees, degrees, meters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub height: f64,
}

impl GeodeticCoordinate {
    pub fn new(latitude: f64, longitude: f64, height: f64) -> Self {
        Self { latitude, longitude, height }
    }

    /// Position on the ellipsoid surface
    pub fn surface(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude, longitude, 0.0)
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng { lat: self.latitude, lng: self.longitude }
    }
}

/// Horizontal position payload carried by position notifications
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn to_vector2(&self) -> Vector2<f64> {
        Vector2::new(self.lat, self.lng)
    }

    pub fn from_vector2(v: Vector2<f64>) -> Self {
        Self { lat: v.x, lng: v.y }
    }
}

/// Earth-centered, earth-fixed cartesian position (meters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EcefCoordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EcefCoordinate {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_vector3(v: Vector3<f64>) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl Sub for EcefCoordinate {
    type Output = Vector3<f64>;

    fn sub(self, rhs: Self) -> Vector3<f64> {
        self.to_vector3() - rhs.to_vector3()
    }
}

/// Position in the scene's local frame. North is -z, up is +y.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalCoordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl LocalCoordinate {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Ground-plane (x, z) components
    pub fn ground(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.z)
    }

    pub fn with_ground(self, ground: Vector2<f64>) -> Self {
        Self { x: ground.x, y: self.y, z: ground.y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// One compass reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingSample {
    /// True heading in degrees. Negative means unavailable.
    #[serde(default)]
    pub true_heading: Option<f64>,
    pub magnetic_heading: f64,
    /// Reported error bound in degrees
    #[serde(default)]
    pub heading_accuracy: f64,
}

impl HeadingSample {
    pub fn new(true_heading: f64, magnetic_heading: f64, heading_accuracy: f64) -> Self {
        Self {
            true_heading: Some(true_heading),
            magnetic_heading,
            heading_accuracy,
        }
    }

    pub fn magnetic_only(magnetic_heading: f64, heading_accuracy: f64) -> Self {
        Self {
            true_heading: None,
            magnetic_heading,
            heading_accuracy,
        }
    }
}

/// POI category, used to key axis corrections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiKind {
    Geodetic,
    Polar,
}

impl fmt::Display for PoiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoiKind::Geodetic => write!(f, "geodetic"),
            PoiKind::Polar => write!(f, "polar"),
        }
    }
}

/// Where a point of interest lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PoiLocationRecord", into = "PoiLocationRecord")]
pub enum PoiDescriptor {
    /// Absolute position on the earth
    Geodetic {
        poi_id: String,
        coordinate: GeodeticCoordinate,
    },
    /// Position relative to the device: bearing from north, ground distance, height
    Polar {
        poi_id: String,
        angle_deg: f64,
        radius: f64,
        height: f64,
    },
}

impl PoiDescriptor {
    pub fn geodetic(poi_id: impl Into<String>, latitude: f64, longitude: f64, height: f64) -> Self {
        PoiDescriptor::Geodetic {
            poi_id: poi_id.into(),
            coordinate: GeodeticCoordinate::new(latitude, longitude, height),
        }
    }

    pub fn polar(poi_id: impl Into<String>, angle_deg: f64, radius: f64, height: f64) -> Self {
        PoiDescriptor::Polar {
            poi_id: poi_id.into(),
            angle_deg,
            radius,
            height,
        }
    }

    pub fn poi_id(&self) -> &str {
        match self {
            PoiDescriptor::Geodetic { poi_id, .. } | PoiDescriptor::Polar { poi_id, .. } => poi_id,
        }
    }

    pub fn kind(&self) -> PoiKind {
        match self {
            PoiDescriptor::Geodetic { .. } => PoiKind::Geodetic,
            PoiDescriptor::Polar { .. } => PoiKind::Polar,
        }
    }
}

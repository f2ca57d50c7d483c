//! Coordinate projection between geodetic, ECEF and the local scene frame
//!
//! The local frame is the one the scene renders in:
//! - x points right (east once aligned to north)
//! - y points up
//! - z points toward the viewer, so north is -z
//!
//! All functions are pure. Geodetic input is expected to be within
//! latitude [-90, 90] and longitude [-180, 180]; use [`CoordinateValidator`]
//! before projecting untrusted values.

use nalgebra::{Rotation2, Vector2};

use crate::core::{
    EcefCoordinate, GeodeticCoordinate, LocalCoordinate, WGS84_ECCENTRICITY_SQUARED,
    WGS84_SEMI_MAJOR_AXIS,
};

/// Project a geodetic position onto the WGS84 ellipsoid in ECEF.
pub fn geodetic_to_ecef(latitude: f64, longitude: f64, height: f64) -> EcefCoordinate {
    let lat_rad = latitude.to_radians();
    let lon_rad = longitude.to_radians();
    let sin_lat = lat_rad.sin();

    // Prime vertical radius of curvature
    let n = WGS84_SEMI_MAJOR_AXIS / (1.0 - WGS84_ECCENTRICITY_SQUARED * sin_lat * sin_lat).sqrt();

    EcefCoordinate {
        x: (n + height) * lat_rad.cos() * lon_rad.cos(),
        y: (n + height) * lat_rad.cos() * lon_rad.sin(),
        z: (n * (1.0 - WGS84_ECCENTRICITY_SQUARED) + height) * sin_lat,
    }
}

/// Convenience wrapper over [`geodetic_to_ecef`].
pub fn project(coordinate: &GeodeticCoordinate) -> EcefCoordinate {
    geodetic_to_ecef(coordinate.latitude, coordinate.longitude, coordinate.height)
}

/// Rotate a ground-plane (x, z) vector around the vertical axis.
pub fn rotate_ground(ground: Vector2<f64>, angle_deg: f64) -> Vector2<f64> {
    if angle_deg == 0.0 {
        return ground;
    }
    Rotation2::new(angle_deg.to_radians()) * ground
}

/// Place a point `radius` meters from the origin at bearing `angle_deg`,
/// where 0 degrees is north (-z) and 90 degrees is +x.
pub fn polar_to_local(angle_deg: f64, radius: f64, height: f64) -> LocalCoordinate {
    let ground = rotate_ground(Vector2::new(0.0, -radius), angle_deg);
    LocalCoordinate::new(ground.x, height, ground.y)
}

/// Coordinate validation utilities
pub struct CoordinateValidator;

impl CoordinateValidator {
    /// Validate WGS84 geodetic coordinates
    pub fn validate_geodetic(coordinate: &GeodeticCoordinate) -> Result<(), &'static str> {
        if !coordinate.latitude.is_finite() || !coordinate.longitude.is_finite() {
            return Err("Latitude and longitude must be finite");
        }

        if coordinate.latitude < -90.0 || coordinate.latitude > 90.0 {
            return Err("Invalid latitude: must be between -90 and 90 degrees");
        }

        if coordinate.longitude < -180.0 || coordinate.longitude > 180.0 {
            return Err("Invalid longitude: must be between -180 and 180 degrees");
        }

        if !coordinate.height.is_finite() {
            return Err("Height must be finite");
        }

        Ok(())
    }

    /// Validate a device-relative polar placement
    pub fn validate_polar(angle_deg: f64, radius: f64, height: f64) -> Result<(), &'static str> {
        if !angle_deg.is_finite() {
            return Err("Polar angle must be finite");
        }

        if !radius.is_finite() || radius < 0.0 {
            return Err("Polar radius must be finite and non-negative");
        }

        if !height.is_finite() {
            return Err("Height must be finite");
        }

        Ok(())
    }
}

//! Scene collaborators
//!
//! The engine never renders. It positions POIs, toggles projection
//! visibility and nudges the camera through these traits; a rendering
//! layer implements them.

pub mod memory;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::LocalCoordinate;

pub use memory::InMemoryScene;

/// Scene-side failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("unknown POI '{0}'")]
    UnknownPoi(String),

    #[error("unknown projection '{0}'")]
    UnknownProjection(String),
}

/// Partial position write; `None` components are left unchanged
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl PositionUpdate {
    pub fn full(position: LocalCoordinate) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            z: Some(position.z),
        }
    }

    pub fn ground(x: f64, z: f64) -> Self {
        Self { x: Some(x), y: None, z: Some(z) }
    }

    pub fn apply_to(&self, position: LocalCoordinate) -> LocalCoordinate {
        LocalCoordinate {
            x: self.x.unwrap_or(position.x),
            y: self.y.unwrap_or(position.y),
            z: self.z.unwrap_or(position.z),
        }
    }
}

/// Relative camera move in the local frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraTranslation {
    pub dx: Option<f64>,
    pub dz: Option<f64>,
}

/// A visual attached to a POI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInfo {
    pub id: String,
    pub parent_poi_id: Option<String>,
}

pub trait PoiRegistry {
    fn contains_poi(&self, poi_id: &str) -> bool;

    /// Create the POI. Adding an id that already exists leaves it untouched.
    fn add_poi(&mut self, poi_id: &str, initial: LocalCoordinate);

    fn set_poi_position(&mut self, poi_id: &str, update: PositionUpdate) -> Result<(), SceneError>;

    fn poi_position(&self, poi_id: &str) -> Option<LocalCoordinate>;
}

pub trait ProjectionRegistry {
    fn projections(&self) -> Vec<ProjectionInfo>;

    fn set_projection_visible(&mut self, projection_id: &str, visible: bool) -> Result<(), SceneError>;
}

pub trait Camera {
    fn translate_camera(&mut self, translation: CameraTranslation);

    fn set_camera_height(&mut self, height: f64);
}

/// Everything a tracking session needs from the renderer
pub trait Scene: PoiRegistry + ProjectionRegistry + Camera {
    /// Show axis lines of the given length
    fn show_axis(&mut self, _length: f64) {}

    /// Show a ground-plane grid
    fn show_grid(&mut self, _size: f64, _divisions: u32, _color: u32) {}
}

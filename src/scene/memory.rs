//! In-memory scene for testing and headless replay

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::LocalCoordinate;
use crate::scene::{
    Camera, CameraTranslation, PoiRegistry, PositionUpdate, ProjectionInfo, ProjectionRegistry,
    Scene, SceneError,
};

#[derive(Debug, Clone, Serialize)]
struct ProjectionEntry {
    info: ProjectionInfo,
    visible: bool,
}

/// Grid helper parameters as requested by the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridHelper {
    pub size: f64,
    pub divisions: u32,
    pub color: u32,
}

/// Scene that records every call it receives
#[derive(Debug, Clone, Default, Serialize)]
pub struct InMemoryScene {
    pois: BTreeMap<String, LocalCoordinate>,
    projections: Vec<ProjectionEntry>,
    camera: LocalCoordinate,
    translations: Vec<CameraTranslation>,
    axis_length: Option<f64>,
    grid: Option<GridHelper>,
    poi_add_calls: usize,
}

impl InMemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hidden projection, optionally attached to a POI
    pub fn add_projection(&mut self, id: impl Into<String>, parent_poi_id: Option<&str>) {
        self.projections.push(ProjectionEntry {
            info: ProjectionInfo {
                id: id.into(),
                parent_poi_id: parent_poi_id.map(str::to_string),
            },
            visible: false,
        });
    }

    pub fn is_projection_visible(&self, id: &str) -> Option<bool> {
        self.projections
            .iter()
            .find(|p| p.info.id == id)
            .map(|p| p.visible)
    }

    pub fn pois(&self) -> &BTreeMap<String, LocalCoordinate> {
        &self.pois
    }

    pub fn camera_position(&self) -> LocalCoordinate {
        self.camera
    }

    pub fn translations(&self) -> &[CameraTranslation] {
        &self.translations
    }

    pub fn axis_length(&self) -> Option<f64> {
        self.axis_length
    }

    pub fn grid(&self) -> Option<GridHelper> {
        self.grid
    }

    /// Number of `add_poi` calls, including ones for existing ids
    pub fn poi_add_calls(&self) -> usize {
        self.poi_add_calls
    }
}

impl PoiRegistry for InMemoryScene {
    fn contains_poi(&self, poi_id: &str) -> bool {
        self.pois.contains_key(poi_id)
    }

    fn add_poi(&mut self, poi_id: &str, initial: LocalCoordinate) {
        self.poi_add_calls += 1;
        self.pois.entry(poi_id.to_string()).or_insert(initial);
    }

    fn set_poi_position(&mut self, poi_id: &str, update: PositionUpdate) -> Result<(), SceneError> {
        let position = self
            .pois
            .get_mut(poi_id)
            .ok_or_else(|| SceneError::UnknownPoi(poi_id.to_string()))?;
        *position = update.apply_to(*position);
        Ok(())
    }

    fn poi_position(&self, poi_id: &str) -> Option<LocalCoordinate> {
        self.pois.get(poi_id).copied()
    }
}

impl ProjectionRegistry for InMemoryScene {
    fn projections(&self) -> Vec<ProjectionInfo> {
        self.projections.iter().map(|p| p.info.clone()).collect()
    }

    fn set_projection_visible(&mut self, projection_id: &str, visible: bool) -> Result<(), SceneError> {
        let entry = self
            .projections
            .iter_mut()
            .find(|p| p.info.id == projection_id)
            .ok_or_else(|| SceneError::UnknownProjection(projection_id.to_string()))?;
        entry.visible = visible;
        Ok(())
    }
}

impl Camera for InMemoryScene {
    fn translate_camera(&mut self, translation: CameraTranslation) {
        self.camera.x += translation.dx.unwrap_or(0.0);
        self.camera.z += translation.dz.unwrap_or(0.0);
        self.translations.push(translation);
    }

    fn set_camera_height(&mut self, height: f64) {
        self.camera.y = height;
    }
}

impl Scene for InMemoryScene {
    fn show_axis(&mut self, length: f64) {
        self.axis_length = Some(length);
    }

    fn show_grid(&mut self, size: f64, divisions: u32, color: u32) {
        self.grid = Some(GridHelper { size, divisions, color });
    }
}

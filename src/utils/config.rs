use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::algorithms::axis_correction::{AxisCorrectionTable, Platform};
use crate::core::{
    PoiDescriptor, DEFAULT_MIN_HEADING_ACCURACY, DEFAULT_STARTUP_TIMEOUT_MS, GEOLOCATION_WINDOW,
    HEADING_SAMPLE_INTERVAL_MS, HEADING_WARMUP_SAMPLES, MIN_CAMERA_DELTA_M, STARTUP_POLL_INTERVAL_MS,
};
use crate::validation::DescriptorValidator;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Rotate resolved POIs by the heading once on activation
    pub align_frame_to_heading: bool,
    /// Move the camera with the smoothed device position
    pub link_camera_to_device_position: bool,
    /// Initial camera height (meters)
    pub pov_height: f64,
    /// Heading samples with a worse accuracy than this are ignored (degrees)
    pub min_heading_accuracy: f64,
    /// Platform the session runs on, used for axis corrections
    pub platform: Platform,
    pub axis_corrections: AxisCorrectionTable,
    /// Requested compass sample interval (milliseconds)
    pub heading_sample_interval_ms: u32,
    /// Request high-accuracy position fixes
    pub high_accuracy_position: bool,
    /// Readiness poll interval while starting (milliseconds)
    pub startup_poll_interval_ms: u32,
    /// Startup gives up after this long (milliseconds)
    pub startup_timeout_ms: u32,
    /// Heading samples discarded before the first one is considered
    pub heading_warmup_samples: u32,
    /// Position moving-average window length
    pub geolocation_window: usize,
    /// Camera jitter threshold (meters)
    pub min_camera_delta_m: f64,
    /// Carry dropped sub-threshold camera moves into later updates
    pub accumulate_sub_threshold_deltas: bool,
    pub visualization: VisualizationConfig,
}

/// Debug helpers handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationConfig {
    pub show_axis: bool,
    pub axis_length: f64,
    pub show_grid: bool,
    pub grid_size: f64,
    pub grid_divisions: u32,
    /// 0xRRGGBB
    pub grid_color: u32,
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter { parameter: String, value: String, reason: String },

    #[error("I/O error: {message}")]
    IoError { message: String },

    #[error("Serialization error: {message}")]
    SerializationError { message: String },
}

/// Configuration validation result
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// First error, if any
    pub fn into_result(self) -> Result<Vec<String>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.warnings),
        }
    }
}

/// On-disk document: configuration plus the POIs it applies to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingDocument {
    #[serde(default)]
    pub config: TrackingConfig,
    #[serde(default)]
    pub pois: Vec<PoiDescriptor>,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            align_frame_to_heading: true,
            link_camera_to_device_position: true,
            pov_height: 0.0,
            min_heading_accuracy: DEFAULT_MIN_HEADING_ACCURACY,
            platform: Platform::default(),
            axis_corrections: AxisCorrectionTable::new(),
            heading_sample_interval_ms: HEADING_SAMPLE_INTERVAL_MS,
            high_accuracy_position: true,
            startup_poll_interval_ms: STARTUP_POLL_INTERVAL_MS,
            startup_timeout_ms: DEFAULT_STARTUP_TIMEOUT_MS,
            heading_warmup_samples: HEADING_WARMUP_SAMPLES,
            geolocation_window: GEOLOCATION_WINDOW,
            min_camera_delta_m: MIN_CAMERA_DELTA_M,
            accumulate_sub_threshold_deltas: false,
            visualization: VisualizationConfig::default(),
        }
    }
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            show_axis: false,
            axis_length: 500.0,
            show_grid: false,
            grid_size: 500.0,
            grid_divisions: 10,
            grid_color: 0xff8010,
        }
    }
}

fn io_error(action: &str, path: &Path, error: std::io::Error) -> ConfigError {
    ConfigError::IoError {
        message: format!("cannot {} '{}': {}", action, path.display(), error),
    }
}

fn json_error(action: &str, error: serde_json::Error) -> ConfigError {
    ConfigError::SerializationError {
        message: format!("cannot {} tracking document: {}", action, error),
    }
}

fn invalid(parameter: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl TrackingConfig {
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_axis_corrections(mut self, corrections: AxisCorrectionTable) -> Self {
        self.axis_corrections = corrections;
        self
    }

    pub fn with_startup_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.startup_timeout_ms = timeout_ms;
        self
    }

    pub fn with_heading_alignment(mut self, enabled: bool) -> Self {
        self.align_frame_to_heading = enabled;
        self
    }

    pub fn with_camera_link(mut self, enabled: bool) -> Self {
        self.link_camera_to_device_position = enabled;
        self
    }

    /// Check every field
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if !self.pov_height.is_finite() {
            errors.push(invalid("pov_height", self.pov_height, "Camera height must be finite"));
        }

        if !self.min_heading_accuracy.is_finite() || self.min_heading_accuracy < 0.0 {
            errors.push(invalid(
                "min_heading_accuracy",
                self.min_heading_accuracy,
                "Heading accuracy threshold must be a non-negative number of degrees",
            ));
        } else if self.min_heading_accuracy > 90.0 {
            warnings.push("Heading accuracy threshold above 90 degrees accepts unusable compass readings".to_string());
        }

        for correction in self.axis_corrections.entries() {
            if !correction.rotation_deg.is_finite() {
                errors.push(invalid(
                    "axis_corrections",
                    correction.rotation_deg,
                    "Axis correction rotations must be finite",
                ));
            }
        }

        if self.heading_sample_interval_ms == 0 {
            errors.push(invalid(
                "heading_sample_interval_ms",
                self.heading_sample_interval_ms,
                "Heading sample interval must be positive",
            ));
        }

        if self.startup_poll_interval_ms == 0 {
            errors.push(invalid(
                "startup_poll_interval_ms",
                self.startup_poll_interval_ms,
                "Startup poll interval must be positive",
            ));
        }

        if self.startup_timeout_ms < self.startup_poll_interval_ms {
            errors.push(invalid(
                "startup_timeout_ms",
                self.startup_timeout_ms,
                "Startup timeout must cover at least one poll interval",
            ));
        }

        if self.heading_warmup_samples == 0 {
            warnings.push("Heading warm-up disabled; the first compass readings are often unsettled".to_string());
        }

        if self.geolocation_window == 0 {
            errors.push(invalid(
                "geolocation_window",
                self.geolocation_window,
                "Moving-average window must hold at least one sample",
            ));
        }

        if !self.min_camera_delta_m.is_finite() || self.min_camera_delta_m <= 0.0 {
            errors.push(invalid(
                "min_camera_delta_m",
                self.min_camera_delta_m,
                "Camera jitter threshold must be positive",
            ));
        }

        let vis = &self.visualization;
        if vis.show_axis && (!vis.axis_length.is_finite() || vis.axis_length <= 0.0) {
            errors.push(invalid("visualization.axis_length", vis.axis_length, "Axis length must be positive"));
        }
        if vis.show_grid {
            if !vis.grid_size.is_finite() || vis.grid_size <= 0.0 {
                errors.push(invalid("visualization.grid_size", vis.grid_size, "Grid size must be positive"));
            }
            if vis.grid_divisions == 0 {
                errors.push(invalid(
                    "visualization.grid_divisions",
                    vis.grid_divisions,
                    "Grid needs at least one division",
                ));
            }
        }
        if vis.grid_color > 0xffffff {
            errors.push(invalid(
                "visualization.grid_color",
                format!("{:#x}", vis.grid_color),
                "Grid color must be a 24-bit RGB value",
            ));
        }
        if (vis.show_axis || vis.show_grid) && self.pov_height == 0.0 {
            warnings.push("Axis and grid helpers are edge-on at pov_height 0".to_string());
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Loads and saves tracking documents
#[derive(Debug, Default)]
pub struct ConfigurationManager {
    document: TrackingDocument,
    /// File the document was last loaded from or saved to
    path: Option<PathBuf>,
    dirty: bool,
}

impl ConfigurationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.document.config
    }

    pub fn pois(&self) -> &[PoiDescriptor] {
        &self.document.pois
    }

    pub fn document(&self) -> &TrackingDocument {
        &self.document
    }

    /// Replace the configuration after validating it
    pub fn update_config(&mut self, config: TrackingConfig) -> Result<(), ConfigError> {
        config.validate().into_result()?;
        self.document.config = config;
        self.dirty = true;
        Ok(())
    }

    /// Replace the POI set after validating it
    pub fn update_pois(&mut self, pois: Vec<PoiDescriptor>) -> Result<(), ConfigError> {
        Self::check_pois(&pois)?;
        self.document.pois = pois;
        self.dirty = true;
        Ok(())
    }

    /// Parse and validate a document from JSON text
    pub fn parse(content: &str) -> Result<TrackingDocument, ConfigError> {
        let document: TrackingDocument = serde_json::from_str(content).map_err(|e| json_error("parse", e))?;
        document.config.validate().into_result()?;
        Self::check_pois(&document.pois)?;
        Ok(document)
    }

    /// Replace the held document with the one in `path`. On error nothing changes.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| io_error("read", path, e))?;
        self.document = Self::parse(&content)?;
        self.mark_clean(path);
        Ok(())
    }

    /// Write the document as pretty JSON; `path` becomes the target of [`save`](Self::save)
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(&self.document).map_err(|e| json_error("serialize", e))?;
        fs::write(path, content).map_err(|e| io_error("write", path, e))?;
        self.mark_clean(path);
        Ok(())
    }

    pub fn save(&mut self) -> Result<(), ConfigError> {
        let path = self.path.clone().ok_or_else(|| ConfigError::IoError {
            message: "document has no file to save to".to_string(),
        })?;
        self.save_to_file(path)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// True once the document was updated and not yet saved
    pub fn is_modified(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self, path: &Path) {
        self.path = Some(path.to_path_buf());
        self.dirty = false;
    }

    fn check_pois(pois: &[PoiDescriptor]) -> Result<(), ConfigError> {
        DescriptorValidator::validate_all(pois).map_err(|e| ConfigError::InvalidParameter {
            parameter: "pois".to_string(),
            value: e.poi_id().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PoiKind;

    #[test]
    fn test_defaults() {
        let config = TrackingConfig::default();
        assert!(config.align_frame_to_heading);
        assert!(config.link_camera_to_device_position);
        assert_eq!(config.pov_height, 0.0);
        assert_eq!(config.min_heading_accuracy, 15.0);
        assert_eq!(config.startup_poll_interval_ms, 200);
        assert_eq!(config.heading_warmup_samples, 10);
        assert_eq!(config.geolocation_window, 5);
        assert_eq!(config.visualization.grid_color, 0xff8010);
        assert!(config.axis_corrections.is_empty());

        let result = config.validate();
        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TrackingConfig =
            serde_json::from_str(r#"{"pov_height": 1.6, "visualization": {"show_grid": true}}"#).unwrap();
        assert_eq!(config.pov_height, 1.6);
        assert!(config.visualization.show_grid);
        assert_eq!(config.visualization.grid_divisions, 10);
        assert_eq!(config.min_heading_accuracy, 15.0);
    }

    #[test]
    fn test_invalid_config_collects_every_error() {
        let mut config = TrackingConfig::default();
        config.min_heading_accuracy = -1.0;
        config.geolocation_window = 0;
        config.startup_timeout_ms = 100;
        config.min_camera_delta_m = f64::NAN;
        config.visualization.grid_color = 0x1000000;

        let result = config.validate();
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 5);

        let first = result.into_result().unwrap_err();
        assert!(matches!(first, ConfigError::InvalidParameter { ref parameter, .. } if parameter == "min_heading_accuracy"));
    }

    #[test]
    fn test_helpers_at_ground_level_warn() {
        let mut config = TrackingConfig::default();
        config.visualization.show_axis = true;
        let result = config.validate();
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_non_finite_axis_correction_rejected() {
        let config = TrackingConfig::default()
            .with_axis_corrections(AxisCorrectionTable::new().with(Platform::Ios, PoiKind::Polar, f64::INFINITY));
        assert!(!config.validate().is_valid);
    }

    #[test]
    fn test_document_parse_rejects_bad_pois() {
        let json = r#"{"pois": [
            {"poi_id": "a", "polar": {"angle": 0, "radius": 5}},
            {"poi_id": "a", "polar": {"angle": 90, "radius": 5}}
        ]}"#;
        let err = ConfigurationManager::parse(json).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { ref value, .. } if value == "a"));

        let err = ConfigurationManager::parse("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::SerializationError { .. }));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("poi_tracking_config_{}.json", std::process::id()));

        let mut manager = ConfigurationManager::new();
        manager
            .update_config(TrackingConfig::default().with_platform(Platform::Android))
            .unwrap();
        manager
            .update_pois(vec![PoiDescriptor::polar("gate", 45.0, 30.0, 2.0)])
            .unwrap();
        assert!(manager.is_modified());
        manager.save_to_file(&path).unwrap();
        assert!(!manager.is_modified());

        assert_eq!(manager.path(), Some(path.as_path()));

        let loaded = ConfigurationManager::from_file(&path).unwrap();
        assert_eq!(loaded.config().platform, Platform::Android);
        assert_eq!(loaded.pois(), manager.pois());
        assert!(!loaded.is_modified());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_without_path() {
        let mut manager = ConfigurationManager::new();
        assert!(matches!(manager.save(), Err(ConfigError::IoError { .. })));
    }

    #[test]
    fn test_failed_load_keeps_document() {
        let mut manager = ConfigurationManager::new();
        manager
            .update_pois(vec![PoiDescriptor::polar("gate", 0.0, 10.0, 0.0)])
            .unwrap();

        let missing = std::env::temp_dir().join("poi_tracking_missing_dir").join("none.json");
        let err = manager.load_from_file(&missing).unwrap_err();
        match err {
            ConfigError::IoError { message } => assert!(message.contains("none.json")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(manager.pois().len(), 1);
        assert!(manager.is_modified());
        assert_eq!(manager.path(), None);
    }
}

//! Per-platform axis corrections
//!
//! Some device platforms report positions in a frame rotated relative to
//! the scene. Corrections are fixed rotations about the vertical axis,
//! keyed by platform and POI kind, applied before heading alignment.

use serde::{Deserialize, Serialize};

use crate::algorithms::projection::rotate_ground;
use crate::core::{LocalCoordinate, PoiKind};

/// Device platform family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    Generic,
    Ios,
    Android,
}

/// A single table entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisCorrection {
    pub platform: Platform,
    pub kind: PoiKind,
    pub rotation_deg: f64,
}

/// Platform x POI-kind rotation table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisCorrectionTable {
    entries: Vec<AxisCorrection>,
}

impl AxisCorrectionTable {
    /// Empty table: no platform is corrected
    pub fn new() -> Self {
        Self::default()
    }

    /// Calibration observed on early iOS/Android builds of the AR viewer.
    ///
    /// iOS geodetic POIs are turned +90 degrees and Android polar POIs -90
    /// degrees. Only use this when matching that visual behaviour matters.
    pub fn legacy() -> Self {
        Self::new()
            .with(Platform::Ios, PoiKind::Geodetic, 90.0)
            .with(Platform::Android, PoiKind::Polar, -90.0)
    }

    /// Add or replace the rotation for a platform/kind pair
    pub fn with(mut self, platform: Platform, kind: PoiKind, rotation_deg: f64) -> Self {
        self.set(platform, kind, rotation_deg);
        self
    }

    pub fn set(&mut self, platform: Platform, kind: PoiKind, rotation_deg: f64) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.platform == platform && e.kind == kind)
        {
            Some(entry) => entry.rotation_deg = rotation_deg,
            None => self.entries.push(AxisCorrection { platform, kind, rotation_deg }),
        }
    }

    /// Rotation for the pair, zero when not listed
    pub fn rotation_for(&self, platform: Platform, kind: PoiKind) -> f64 {
        self.entries
            .iter()
            .find(|e| e.platform == platform && e.kind == kind)
            .map_or(0.0, |e| e.rotation_deg)
    }

    pub fn apply(&self, platform: Platform, kind: PoiKind, position: LocalCoordinate) -> LocalCoordinate {
        let rotation = self.rotation_for(platform, kind);
        if rotation == 0.0 {
            return position;
        }
        position.with_ground(rotate_ground(position.ground(), rotation))
    }

    pub fn entries(&self) -> &[AxisCorrection] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_empty_table_is_identity() {
        let table = AxisCorrectionTable::new();
        let p = LocalCoordinate::new(1.0, 2.0, 3.0);
        assert_eq!(table.apply(Platform::Ios, PoiKind::Geodetic, p), p);
        assert_eq!(table.rotation_for(Platform::Android, PoiKind::Polar), 0.0);
    }

    #[test]
    fn test_legacy_entries() {
        let table = AxisCorrectionTable::legacy();
        assert_eq!(table.rotation_for(Platform::Ios, PoiKind::Geodetic), 90.0);
        assert_eq!(table.rotation_for(Platform::Ios, PoiKind::Polar), 0.0);
        assert_eq!(table.rotation_for(Platform::Android, PoiKind::Polar), -90.0);
        assert_eq!(table.rotation_for(Platform::Generic, PoiKind::Geodetic), 0.0);
    }

    #[test]
    fn test_apply_rotates_ground_only() {
        let table = AxisCorrectionTable::legacy();
        let p = LocalCoordinate::new(10.0, 5.0, 0.0);
        let rotated = table.apply(Platform::Ios, PoiKind::Geodetic, p);

        assert_abs_diff_eq!(rotated.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rotated.z, 10.0, epsilon = 1e-9);
        assert_eq!(rotated.y, 5.0);
    }

    #[test]
    fn test_set_replaces_existing() {
        let mut table = AxisCorrectionTable::legacy();
        table.set(Platform::Ios, PoiKind::Geodetic, 45.0);
        assert_eq!(table.rotation_for(Platform::Ios, PoiKind::Geodetic), 45.0);
        assert_eq!(table.entries().len(), 2);
    }

    #[test]
    fn test_table_serialization() {
        let table = AxisCorrectionTable::legacy();
        let json = serde_json::to_string(&table).unwrap();
        let back: AxisCorrectionTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}

//! POI placement in the local scene frame
//!
//! Geodetic POIs are placed relative to the device anchor in ECEF; polar
//! POIs are already device-relative. Both pass through the platform axis
//! correction table, and the whole set can then be turned once to line
//! the frame up with the device's initial heading.

use log::debug;

use crate::algorithms::axis_correction::{AxisCorrectionTable, Platform};
use crate::algorithms::projection::{geodetic_to_ecef, polar_to_local, rotate_ground};
use crate::core::{EcefCoordinate, LocalCoordinate, PoiDescriptor, PoiKind};
use crate::scene::{PoiRegistry, PositionUpdate, SceneError};

/// One POI after placement
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPoi {
    pub poi_id: String,
    pub kind: PoiKind,
    pub position: LocalCoordinate,
}

/// Placed POIs in descriptor order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPois {
    entries: Vec<ResolvedPoi>,
}

impl ResolvedPois {
    pub fn get(&self, poi_id: &str) -> Option<LocalCoordinate> {
        self.entries
            .iter()
            .find(|e| e.poi_id == poi_id)
            .map(|e| e.position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedPoi> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, poi_id: &str) -> bool {
        self.entries.iter().any(|e| e.poi_id == poi_id)
    }
}

/// Computes local POI positions for one platform
#[derive(Debug, Clone, Default)]
pub struct PoiResolver {
    platform: Platform,
    corrections: AxisCorrectionTable,
}

impl PoiResolver {
    pub fn new(platform: Platform, corrections: AxisCorrectionTable) -> Self {
        Self { platform, corrections }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Local position of a single POI relative to `anchor`
    pub fn resolve(&self, descriptor: &PoiDescriptor, anchor: &EcefCoordinate) -> LocalCoordinate {
        let position = match descriptor {
            PoiDescriptor::Geodetic { coordinate, .. } => {
                // Projected on the same surface as the anchor; scene height comes from the descriptor
                let poi_ecef = geodetic_to_ecef(coordinate.latitude, coordinate.longitude, 0.0);
                let delta = poi_ecef - *anchor;
                LocalCoordinate::new(delta.x, coordinate.height, -delta.y)
            }
            PoiDescriptor::Polar { angle_deg, radius, height, .. } => {
                polar_to_local(*angle_deg, *radius, *height)
            }
        };

        self.corrections.apply(self.platform, descriptor.kind(), position)
    }

    pub fn resolve_all(&self, descriptors: &[PoiDescriptor], anchor: &EcefCoordinate) -> ResolvedPois {
        let entries = descriptors
            .iter()
            .map(|descriptor| {
                let position = self.resolve(descriptor, anchor);
                debug!(
                    "Resolved {} POI '{}' at ({:.2}, {:.2}, {:.2})",
                    descriptor.kind(),
                    descriptor.poi_id(),
                    position.x,
                    position.y,
                    position.z
                );
                ResolvedPoi {
                    poi_id: descriptor.poi_id().to_string(),
                    kind: descriptor.kind(),
                    position,
                }
            })
            .collect();

        ResolvedPois { entries }
    }

    /// Turn every POI by `-heading_deg` around the vertical axis so the
    /// device's initial bearing maps onto -z.
    pub fn apply_heading_offset(heading_deg: f64, resolved: &mut ResolvedPois) {
        for entry in &mut resolved.entries {
            let ground = rotate_ground(entry.position.ground(), -heading_deg);
            entry.position = entry.position.with_ground(ground);
        }
    }

    /// Write positions to the registry, creating missing POIs at the origin first
    pub fn publish<R: PoiRegistry + ?Sized>(resolved: &ResolvedPois, registry: &mut R) -> Result<(), SceneError> {
        for entry in resolved.iter() {
            if !registry.contains_poi(&entry.poi_id) {
                registry.add_poi(&entry.poi_id, LocalCoordinate::default());
            }
            registry.set_poi_position(&entry.poi_id, PositionUpdate::full(entry.position))?;
        }
        Ok(())
    }
}

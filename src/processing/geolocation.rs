//! Device position smoothing and anchor tracking

use log::debug;

use crate::algorithms::projection::{geodetic_to_ecef, CoordinateValidator};
use crate::core::{EcefCoordinate, GeodeticCoordinate, LatLng, GEOLOCATION_WINDOW};
use crate::hardware::{SensorError, SensorKind};
use crate::processing::moving_average::MovingAverageFilter;

/// Result of an accepted position sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeolocationUpdate {
    /// Smoothed position
    pub geolocation: LatLng,
    pub previous_anchor: EcefCoordinate,
    pub anchor: EcefCoordinate,
    /// True for the first sample of the session
    pub first: bool,
}

/// Smooths raw fixes and keeps the current and previous ECEF anchors.
#[derive(Debug, Clone)]
pub struct GeolocationTracker {
    filter: MovingAverageFilter,
    geolocation: Option<LatLng>,
    initial_geolocation: Option<LatLng>,
    anchor: Option<EcefCoordinate>,
    previous_anchor: Option<EcefCoordinate>,
}

impl Default for GeolocationTracker {
    fn default() -> Self {
        Self::new(GEOLOCATION_WINDOW)
    }
}

impl GeolocationTracker {
    pub fn new(window: usize) -> Self {
        Self {
            filter: MovingAverageFilter::new(window),
            geolocation: None,
            initial_geolocation: None,
            anchor: None,
            previous_anchor: None,
        }
    }

    /// Feed one raw fix. Out-of-range or non-finite fixes are rejected
    /// before they reach the filter.
    pub fn on_sample(&mut self, sample: &GeodeticCoordinate) -> Result<GeolocationUpdate, SensorError> {
        CoordinateValidator::validate_geodetic(sample).map_err(|reason| SensorError::MalformedSample {
            sensor: SensorKind::Position,
            details: reason.to_string(),
        })?;

        let averaged = LatLng::from_vector2(self.filter.push(sample.lat_lng().to_vector2()));
        let anchor = geodetic_to_ecef(averaged.lat, averaged.lng, 0.0);

        let first = self.initial_geolocation.is_none();
        let previous_anchor = if first {
            self.initial_geolocation = Some(averaged);
            anchor
        } else {
            self.anchor.unwrap_or(anchor)
        };

        self.geolocation = Some(averaged);
        self.previous_anchor = Some(previous_anchor);
        self.anchor = Some(anchor);

        debug!("Geolocation averaged to ({:.7}, {:.7})", averaged.lat, averaged.lng);

        Ok(GeolocationUpdate {
            geolocation: averaged,
            previous_anchor,
            anchor,
            first,
        })
    }

    pub fn has_geolocation(&self) -> bool {
        self.geolocation.is_some()
    }

    pub fn current_geolocation(&self) -> Option<LatLng> {
        self.geolocation
    }

    pub fn initial_geolocation(&self) -> Option<LatLng> {
        self.initial_geolocation
    }

    pub fn current_anchor(&self) -> Option<EcefCoordinate> {
        self.anchor
    }

    pub fn previous_anchor(&self) -> Option<EcefCoordinate> {
        self.previous_anchor
    }

    pub fn reset(&mut self) {
        self.filter.reset();
        self.geolocation = None;
        self.initial_geolocation = None;
        self.anchor = None;
        self.previous_anchor = None;
    }
}

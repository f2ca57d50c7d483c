//! Camera translation from anchor movement

use log::trace;
use nalgebra::Vector2;

use crate::core::{EcefCoordinate, MIN_CAMERA_DELTA_M};
use crate::scene::CameraTranslation;

/// Turns anchor deltas into whole-meter camera moves.
///
/// Only the ECEF x and y axes are used; y maps onto local -z. Moves under
/// `min_delta` on both axes are treated as GPS jitter and dropped, unless
/// accumulation is enabled, in which case they are carried into the next
/// update until they add up to a whole move.
#[derive(Debug, Clone)]
pub struct CameraDriver {
    min_delta: f64,
    accumulate: bool,
    residual: Vector2<f64>,
}

impl Default for CameraDriver {
    fn default() -> Self {
        Self::new(MIN_CAMERA_DELTA_M, false)
    }
}

impl CameraDriver {
    pub fn new(min_delta: f64, accumulate: bool) -> Self {
        Self {
            min_delta,
            accumulate,
            residual: Vector2::zeros(),
        }
    }

    pub fn on_anchor_update(
        &mut self,
        previous: &EcefCoordinate,
        current: &EcefCoordinate,
        link_enabled: bool,
        pois_ready: bool,
    ) -> Option<CameraTranslation> {
        if !(link_enabled && pois_ready) {
            return None;
        }

        let raw = Vector2::new(current.x - previous.x, current.y - previous.y);
        let delta = if self.accumulate { self.residual + raw } else { raw };

        let dx = delta.x.round();
        let dz = delta.y.round();

        if dx.abs() < self.min_delta && dz.abs() < self.min_delta {
            if self.accumulate {
                self.residual = delta;
            }
            trace!("Dropping sub-threshold anchor delta ({:.3}, {:.3})", delta.x, delta.y);
            return None;
        }

        if self.accumulate {
            self.residual = delta - Vector2::new(dx, dz);
        }

        trace!("Camera translate dx={} dz={}", dx, -dz);
        Some(CameraTranslation {
            dx: Some(dx),
            dz: Some(-dz),
        })
    }

    /// Carried sub-threshold movement (always zero without accumulation)
    pub fn residual(&self) -> Vector2<f64> {
        self.residual
    }

    pub fn reset(&mut self) {
        self.residual = Vector2::zeros();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn moved(dx: f64, dy: f64) -> (EcefCoordinate, EcefCoordinate) {
        let previous = EcefCoordinate::new(1000.0, 2000.0, 3000.0);
        let current = EcefCoordinate::new(1000.0 + dx, 2000.0 + dy, 3000.0 + 50.0);
        (previous, current)
    }

    #[test]
    fn test_disabled_or_not_ready_is_noop() {
        let mut driver = CameraDriver::default();
        let (p, c) = moved(10.0, 10.0);
        assert_eq!(driver.on_anchor_update(&p, &c, false, true), None);
        assert_eq!(driver.on_anchor_update(&p, &c, true, false), None);
    }

    #[test]
    fn test_jitter_is_dropped() {
        let mut driver = CameraDriver::default();
        let (p, c) = moved(0.4, -0.3);
        assert_eq!(driver.on_anchor_update(&p, &c, true, true), None);
        assert_eq!(driver.residual(), Vector2::zeros());
    }

    #[test]
    fn test_significant_move_rounds_and_flips_z() {
        let mut driver = CameraDriver::default();
        let (p, c) = moved(2.6, 0.2);
        let t = driver.on_anchor_update(&p, &c, true, true).unwrap();
        assert_eq!(t.dx, Some(3.0));
        assert_eq!(t.dz, Some(0.0));

        let (p, c) = moved(0.0, 4.4);
        let t = driver.on_anchor_update(&p, &c, true, true).unwrap();
        assert_eq!(t.dx, Some(0.0));
        assert_eq!(t.dz, Some(-4.0));
    }

    #[test]
    fn test_vertical_ecef_axis_is_ignored() {
        let mut driver = CameraDriver::default();
        let p = EcefCoordinate::new(0.0, 0.0, 0.0);
        let c = EcefCoordinate::new(0.0, 0.0, 25.0);
        assert_eq!(driver.on_anchor_update(&p, &c, true, true), None);
    }

    #[test]
    fn test_accumulation_releases_whole_moves() {
        let mut driver = CameraDriver::new(1.0, true);
        let (p, c) = moved(0.3, 0.0);

        assert_eq!(driver.on_anchor_update(&p, &c, true, true), None);
        assert_abs_diff_eq!(driver.residual().x, 0.3, epsilon = 1e-9);

        // 0.6 rounds to 1
        let t = driver.on_anchor_update(&p, &c, true, true).unwrap();
        assert_eq!(t.dx, Some(1.0));
        assert_abs_diff_eq!(driver.residual().x, -0.4, epsilon = 1e-9);

        driver.reset();
        assert_eq!(driver.residual(), Vector2::zeros());
    }
}

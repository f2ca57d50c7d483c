//! Compass heading gating

use log::debug;

use crate::core::{HeadingSample, DEFAULT_MIN_HEADING_ACCURACY, HEADING_WARMUP_SAMPLES};

/// Outcome of feeding one heading sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeadingDecision {
    /// Discarded during the warm-up window
    WarmingUp,
    /// Discarded: reported error above the accuracy gate
    LowAccuracy,
    /// Discarded: true heading flagged unavailable
    Unavailable,
    /// Accepted; carries the new heading in degrees
    Accepted(f64),
}

/// Tracks the device heading.
///
/// Compass hardware tends to emit degenerate readings right after a watch
/// starts (zeros on some devices, wildly inaccurate values on others), so
/// the first `warmup_samples - 1` readings are always ignored.
#[derive(Debug, Clone)]
pub struct HeadingTracker {
    min_accuracy: f64,
    warmup_samples: u32,
    sample_count: u32,
    heading: Option<f64>,
}

impl Default for HeadingTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_HEADING_ACCURACY, HEADING_WARMUP_SAMPLES)
    }
}

impl HeadingTracker {
    pub fn new(min_accuracy: f64, warmup_samples: u32) -> Self {
        Self {
            min_accuracy,
            warmup_samples,
            sample_count: 0,
            heading: None,
        }
    }

    pub fn on_sample(&mut self, sample: &HeadingSample) -> HeadingDecision {
        self.sample_count = self.sample_count.saturating_add(1);
        if self.sample_count < self.warmup_samples {
            return HeadingDecision::WarmingUp;
        }

        if sample.heading_accuracy > self.min_accuracy {
            debug!(
                "Heading sample rejected: accuracy {:.1} exceeds {:.1}",
                sample.heading_accuracy, self.min_accuracy
            );
            return HeadingDecision::LowAccuracy;
        }

        if sample.true_heading.is_some_and(|h| h < 0.0) {
            debug!("Heading sample rejected: true heading unavailable");
            return HeadingDecision::Unavailable;
        }

        let heading = match sample.true_heading {
            Some(h) if h != 0.0 && !h.is_nan() => h,
            _ => sample.magnetic_heading,
        };

        self.heading = Some(heading);
        HeadingDecision::Accepted(heading)
    }

    pub fn has_heading(&self) -> bool {
        self.heading.is_some()
    }

    pub fn current_heading(&self) -> Option<f64> {
        self.heading
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn reset(&mut self) {
        self.sample_count = 0;
        self.heading = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warmed_up() -> HeadingTracker {
        let mut tracker = HeadingTracker::default();
        for _ in 0..HEADING_WARMUP_SAMPLES - 1 {
            tracker.on_sample(&HeadingSample::new(10.0, 10.0, 1.0));
        }
        tracker
    }

    #[test]
    fn test_warmup_ignores_everything() {
        let mut tracker = HeadingTracker::default();
        for i in 0..HEADING_WARMUP_SAMPLES - 1 {
            let sample = HeadingSample::new(42.0 + i as f64, 40.0, 0.5);
            assert_eq!(tracker.on_sample(&sample), HeadingDecision::WarmingUp);
        }
        assert!(!tracker.has_heading());

        // Tenth sample is the first one considered
        assert_eq!(
            tracker.on_sample(&HeadingSample::new(42.0, 40.0, 0.5)),
            HeadingDecision::Accepted(42.0)
        );
        assert_eq!(tracker.current_heading(), Some(42.0));
    }

    #[test]
    fn test_accuracy_gate() {
        let mut tracker = warmed_up();
        assert_eq!(
            tracker.on_sample(&HeadingSample::new(90.0, 88.0, 15.5)),
            HeadingDecision::LowAccuracy
        );
        assert!(!tracker.has_heading());

        // At the threshold is accepted
        assert_eq!(
            tracker.on_sample(&HeadingSample::new(90.0, 88.0, 15.0)),
            HeadingDecision::Accepted(90.0)
        );
    }

    #[test]
    fn test_negative_true_heading_is_unavailable() {
        let mut tracker = warmed_up();
        assert_eq!(
            tracker.on_sample(&HeadingSample::new(-1.0, 120.0, 1.0)),
            HeadingDecision::Unavailable
        );
        assert!(!tracker.has_heading());
    }

    #[test]
    fn test_magnetic_fallback() {
        let mut tracker = warmed_up();
        assert_eq!(
            tracker.on_sample(&HeadingSample::magnetic_only(270.0, 2.0)),
            HeadingDecision::Accepted(270.0)
        );
        // Zero true heading is treated as missing
        assert_eq!(
            tracker.on_sample(&HeadingSample::new(0.0, 12.0, 2.0)),
            HeadingDecision::Accepted(12.0)
        );
    }

    #[test]
    fn test_reset_restarts_warmup() {
        let mut tracker = warmed_up();
        tracker.on_sample(&HeadingSample::new(5.0, 5.0, 1.0));
        assert!(tracker.has_heading());

        tracker.reset();
        assert!(!tracker.has_heading());
        assert_eq!(tracker.sample_count(), 0);
        assert_eq!(
            tracker.on_sample(&HeadingSample::new(5.0, 5.0, 1.0)),
            HeadingDecision::WarmingUp
        );
    }
}

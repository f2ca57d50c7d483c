//! Fixed-window moving average over latitude/longitude pairs

use nalgebra::Vector2;
use std::collections::VecDeque;

use crate::core::GEOLOCATION_WINDOW;

/// Rolling mean of the last `capacity` samples.
///
/// The first sample fills every slot so the average starts at that sample
/// instead of being dragged toward zero. Each push is O(1): the oldest
/// sample leaves the running sum as the newest one enters it.
#[derive(Debug, Clone)]
pub struct MovingAverageFilter {
    capacity: usize,
    samples: VecDeque<Vector2<f64>>,
    sum: Vector2<f64>,
}

impl Default for MovingAverageFilter {
    fn default() -> Self {
        Self::new(GEOLOCATION_WINDOW)
    }
}

impl MovingAverageFilter {
    /// Create a filter; a zero capacity is treated as one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
            sum: Vector2::zeros(),
        }
    }

    /// Add a sample and return the updated average
    pub fn push(&mut self, sample: Vector2<f64>) -> Vector2<f64> {
        match self.samples.pop_front() {
            Some(oldest) => {
                self.samples.push_back(sample);
                self.sum += sample - oldest;
            }
            None => {
                self.samples.extend(std::iter::repeat(sample).take(self.capacity));
                self.sum = sample * self.capacity as f64;
            }
        }

        self.sum / self.capacity as f64
    }

    /// Current average, `None` before the first push
    pub fn average(&self) -> Option<Vector2<f64>> {
        if self.samples.is_empty() {
            None
        } else {
            Some(self.sum / self.capacity as f64)
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn sum(&self) -> Vector2<f64> {
        self.sum
    }

    pub fn samples(&self) -> impl Iterator<Item = &Vector2<f64>> {
        self.samples.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn reset(&mut self) {
        self.samples.clear();
        self.sum = Vector2::zeros();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_empty_filter_has_no_average() {
        let filter = MovingAverageFilter::default();
        assert!(filter.average().is_none());
        assert_eq!(filter.capacity(), GEOLOCATION_WINDOW);
    }

    #[test]
    fn test_first_sample_seeds_window() {
        let mut filter = MovingAverageFilter::default();
        let sample = Vector2::new(33.0001, -96.0003);

        assert_eq!(filter.push(sample), sample);
        assert_eq!(filter.average(), Some(sample));
        assert_eq!(filter.samples().count(), GEOLOCATION_WINDOW);
    }

    #[test]
    fn test_window_slides() {
        let mut filter = MovingAverageFilter::new(3);
        filter.push(Vector2::new(3.0, 0.0));
        filter.push(Vector2::new(6.0, 0.0));
        // [3, 3, 6] -> [3, 6, 9]
        let avg = filter.push(Vector2::new(9.0, 3.0));
        assert_abs_diff_eq!(avg.x, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(avg.y, 1.0, epsilon = 1e-12);
        assert_eq!(filter.samples().count(), 3);
    }

    #[test]
    fn test_rolling_sum_matches_naive_average() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..50 {
            let mut filter = MovingAverageFilter::default();
            let count = rng.gen_range(5..60);
            let mut history = Vec::with_capacity(count);

            for _ in 0..count {
                let sample = Vector2::new(rng.gen_range(-90.0..90.0), rng.gen_range(-180.0..180.0));
                history.push(sample);
                filter.push(sample);
            }

            let tail = &history[history.len() - GEOLOCATION_WINDOW..];
            let naive = tail.iter().fold(Vector2::<f64>::zeros(), |acc, s| acc + s) / GEOLOCATION_WINDOW as f64;
            let avg = filter.average().unwrap();

            assert_abs_diff_eq!(avg.x, naive.x, epsilon = 1e-9);
            assert_abs_diff_eq!(avg.y, naive.y, epsilon = 1e-9);

            let buffered: Vector2<f64> = filter.samples().fold(Vector2::zeros(), |acc, s| acc + s);
            assert_abs_diff_eq!(filter.sum().x, buffered.x, epsilon = 1e-9);
            assert_abs_diff_eq!(filter.sum().y, buffered.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = MovingAverageFilter::default();
        filter.push(Vector2::new(1.0, 1.0));
        filter.reset();
        assert!(filter.is_empty());
        assert!(filter.average().is_none());
        assert_eq!(filter.sum(), Vector2::zeros());
    }
}

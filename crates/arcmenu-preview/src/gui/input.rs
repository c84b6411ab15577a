use arcmenu::events::Velocity;
use arcmenu::geometry::Point;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Samples older than this do not count towards the release velocity.
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Estimates pointer velocity from recent drag samples, the way a fling
/// detector would.
#[derive(Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(Instant, Point)>,
}

impl VelocityTracker {
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn push(&mut self, at: Instant, p: Point) {
        self.samples.push_back((at, p));
        while let Some(&(first, _)) = self.samples.front() {
            if at.duration_since(first) > VELOCITY_WINDOW && self.samples.len() > 2 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Pixels per second between the oldest and newest sample in the window.
    pub fn velocity(&self) -> Velocity {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.front(), self.samples.back()) else {
            return Velocity::default();
        };
        let dt = t1.duration_since(t0).as_secs_f64();
        if dt <= f64::EPSILON {
            return Velocity::default();
        }
        Velocity::new((p1.x - p0.x) / dt, (p1.y - p0.y) / dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_from_samples() {
        let start = Instant::now();
        let mut tracker = VelocityTracker::default();
        tracker.push(start, Point::new(0.0, 0.0));
        tracker.push(start + Duration::from_millis(50), Point::new(50.0, -25.0));
        let v = tracker.velocity();
        assert!((v.x - 1000.0).abs() < 1e-6);
        assert!((v.y + 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_old_samples_are_dropped() {
        let start = Instant::now();
        let mut tracker = VelocityTracker::default();
        tracker.push(start, Point::new(-1000.0, 0.0));
        tracker.push(start + Duration::from_millis(300), Point::new(0.0, 0.0));
        tracker.push(start + Duration::from_millis(350), Point::new(10.0, 0.0));
        tracker.push(start + Duration::from_millis(400), Point::new(20.0, 0.0));
        let v = tracker.velocity();
        assert!((v.x - 200.0).abs() < 1e-6, "{v:?}");
    }

    #[test]
    fn test_single_sample_has_no_velocity() {
        let mut tracker = VelocityTracker::default();
        tracker.push(Instant::now(), Point::new(5.0, 5.0));
        assert_eq!(tracker.velocity(), Velocity::default());
        tracker.reset();
        assert_eq!(tracker.velocity(), Velocity::default());
    }
}

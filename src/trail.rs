use crate::geom::{Point, sample_segment};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub at: Point,
    pub born: Instant,
}

/// The recent path of one hand.
#[derive(Debug, Default)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
    samples: Vec<Point>,
}

impl Trail {
    pub fn push(&mut self, at: Point, now: Instant) {
        self.points.push_back(TrailPoint { at, born: now });
    }

    /// Drops points that have lived `lifetime` or longer, then resamples the
    /// remaining path at `spacing`. The previous frame's samples are gone
    /// afterwards.
    pub fn refresh(&mut self, now: Instant, lifetime: Duration, spacing: f32) {
        // Points arrive in time order, so expired ones sit at the front.
        while let Some(p) = self.points.front() {
            if p.born + lifetime > now {
                break;
            }
            self.points.pop_front();
        }

        self.samples.clear();
        for (a, b) in self.points.iter().zip(self.points.iter().skip(1)) {
            self.samples.extend(sample_segment(a.at, b.at, spacing));
        }
    }

    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    /// Hit-test points for the current frame.
    pub fn samples(&self) -> &[Point] {
        &self.samples
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.samples.clear();
    }
}

#[derive(Debug, Default)]
pub struct TrailTracker {
    pub left: Trail,
    pub right: Trail,
}

impl TrailTracker {
    pub fn record(&mut self, left: Option<Point>, right: Option<Point>, now: Instant) {
        if let Some(p) = left {
            self.left.push(p, now);
        }
        if let Some(p) = right {
            self.right.push(p, now);
        }
    }

    pub fn refresh(&mut self, now: Instant, lifetime: Duration, spacing: f32) {
        self.left.refresh(now, lifetime, spacing);
        self.right.refresh(now, lifetime, spacing);
    }

    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIFE: Duration = Duration::from_millis(250);

    #[test]
    fn single_point_yields_no_samples() {
        let t0 = Instant::now();
        let mut trail = Trail::default();
        trail.push(Point::new(0.0, 0.0), t0);
        trail.refresh(t0, LIFE, 5.0);
        assert!(trail.samples().is_empty());
        assert_eq!(trail.points().count(), 1);
    }

    #[test]
    fn samples_fill_the_gap_between_frames() {
        let t0 = Instant::now();
        let mut trail = Trail::default();
        trail.push(Point::new(0.0, 0.0), t0);
        trail.push(Point::new(50.0, 0.0), t0 + Duration::from_millis(40));
        trail.refresh(t0 + Duration::from_millis(40), LIFE, 5.0);
        assert_eq!(trail.samples().len(), 11);
        assert!(trail.samples().iter().any(|p| p.x == 25.0));
    }

    #[test]
    fn expired_points_are_never_sampled() {
        let t0 = Instant::now();
        let mut trail = Trail::default();
        trail.push(Point::new(0.0, 0.0), t0);
        trail.push(Point::new(100.0, 0.0), t0 + Duration::from_millis(100));
        trail.push(Point::new(200.0, 0.0), t0 + Duration::from_millis(200));

        // Exactly one lifetime old counts as expired.
        trail.refresh(t0 + LIFE, LIFE, 10.0);
        assert_eq!(trail.points().count(), 2);
        assert!(trail.samples().iter().all(|p| p.x >= 100.0));

        trail.refresh(t0 + Duration::from_millis(460), LIFE, 10.0);
        assert_eq!(trail.points().count(), 0);
        assert!(trail.samples().is_empty());
    }

    #[test]
    fn missing_hand_adds_nothing() {
        let t0 = Instant::now();
        let mut tracker = TrailTracker::default();
        tracker.record(Some(Point::new(1.0, 1.0)), None, t0);
        assert_eq!(tracker.left.points().count(), 1);
        assert_eq!(tracker.right.points().count(), 0);
        tracker.clear();
        assert_eq!(tracker.left.points().count(), 0);
    }
}

use std::collections::VecDeque;

use crate::config::EngineConfig;
use crate::geometry::WorldPoint;
use crate::stroke::Point;

/// Smoothing parameters for stroke capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureConfig {
    /// Trailing samples averaged for position.
    pub window: usize,
    /// Weight of the newest pressure sample.
    pub pressure_alpha: f32,
    /// Points closer than this to the last recorded one are dropped.
    pub min_distance: f64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            window: 3,
            pressure_alpha: 0.7,
            min_distance: 2.0,
        }
    }
}

impl From<&EngineConfig> for CaptureConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            window: config.smoothing_window,
            pressure_alpha: config.pressure_alpha.clamp(0.0, 1.0),
            min_distance: config.min_point_distance,
        }
    }
}

/// Maps device pressure to `[0, 1]`, treating missing or garbage input as 1.
pub fn sanitize_pressure(pressure: Option<f32>) -> f32 {
    match pressure {
        Some(p) if p.is_finite() => p.clamp(0.0, 1.0),
        _ => 1.0,
    }
}

/// Turns raw pointer samples of one gesture into stroke points.
///
/// Positions go through a trailing moving average, pressure through an
/// exponential moving average, and a point is only emitted once it is far
/// enough from the previously emitted one.
#[derive(Debug, Clone)]
pub struct StrokeCapture {
    config: CaptureConfig,
    window: VecDeque<WorldPoint>,
    pressure: f32,
    last_recorded: Option<WorldPoint>,
}

impl StrokeCapture {
    pub fn new(mut config: CaptureConfig) -> Self {
        config.window = config.window.max(1);
        Self {
            config,
            window: VecDeque::with_capacity(config.window),
            pressure: 1.0,
            last_recorded: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.last_recorded.is_some()
    }

    /// Starts a gesture and returns the point that seeds the stroke.
    pub fn begin(&mut self, pos: WorldPoint, pressure: Option<f32>) -> Point {
        self.window.clear();
        self.window.push_back(pos);
        self.pressure = sanitize_pressure(pressure);
        self.last_recorded = Some(pos);
        Point::at(pos, Some(self.pressure))
    }

    /// Feeds one raw sample; returns a point to append, if any.
    pub fn sample(&mut self, pos: WorldPoint, pressure: Option<f32>) -> Option<Point> {
        let last = self.last_recorded?;

        if self.window.len() == self.config.window {
            self.window.pop_front();
        }
        self.window.push_back(pos);
        let n = self.window.len() as f64;
        let (sx, sy) = self
            .window
            .iter()
            .fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
        let smoothed = WorldPoint::new(sx / n, sy / n);

        let alpha = self.config.pressure_alpha;
        self.pressure = self.pressure * (1.0 - alpha) + sanitize_pressure(pressure) * alpha;

        if smoothed.distance(last) <= self.config.min_distance {
            return None;
        }
        self.last_recorded = Some(smoothed);
        Some(Point::at(smoothed, Some(self.pressure)))
    }

    /// Ends the gesture and forgets the smoothing state.
    pub fn end(&mut self) {
        self.window.clear();
        self.pressure = 1.0;
        self.last_recorded = None;
    }
}

impl Default for StrokeCapture {
    fn default() -> Self {
        Self::new(CaptureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> WorldPoint {
        WorldPoint::new(x, y)
    }

    #[test]
    fn begin_defaults_pressure_to_one() {
        let mut capture = StrokeCapture::default();
        assert_eq!(capture.begin(p(3.0, 4.0), None), Point::new(3.0, 4.0, Some(1.0)));
        assert_eq!(capture.begin(p(0.0, 0.0), Some(f32::NAN)).pressure, Some(1.0));
        assert_eq!(capture.begin(p(0.0, 0.0), Some(1.7)).pressure, Some(1.0));
        assert_eq!(capture.begin(p(0.0, 0.0), Some(0.25)).pressure, Some(0.25));
    }

    #[test]
    fn drops_samples_within_min_distance() {
        let mut capture = StrokeCapture::new(CaptureConfig {
            window: 1,
            ..CaptureConfig::default()
        });
        capture.begin(p(0.0, 0.0), None);
        assert_eq!(capture.sample(p(1.0, 1.0), None), None);
        assert_eq!(capture.sample(p(2.0, 0.0), None), None);
        let point = capture.sample(p(2.5, 0.0), None).unwrap();
        assert_eq!(point.pos(), p(2.5, 0.0));
        // Distance is measured from the last recorded point, not the last sample.
        assert_eq!(capture.sample(p(4.0, 0.0), None), None);
    }

    #[test]
    fn empty_window_acts_as_single_sample() {
        let mut capture = StrokeCapture::new(CaptureConfig {
            window: 0,
            ..CaptureConfig::default()
        });
        capture.begin(p(0.0, 0.0), None);
        assert_eq!(capture.sample(p(9.0, 0.0), None).unwrap().pos(), p(9.0, 0.0));
        assert_eq!(capture.sample(p(21.0, 0.0), None).unwrap().pos(), p(21.0, 0.0));
        assert_eq!(capture.window.len(), 1);
    }

    #[test]
    fn averages_trailing_window() {
        let mut capture = StrokeCapture::default();
        capture.begin(p(0.0, 0.0), None);
        // Window is [0, 9] -> 4.5
        assert_eq!(capture.sample(p(9.0, 0.0), None).unwrap().pos(), p(4.5, 0.0));
        // Window is [0, 9, 21] -> 10
        assert_eq!(capture.sample(p(21.0, 0.0), None).unwrap().pos(), p(10.0, 0.0));
        // Oldest sample drops out: [9, 21, 30] -> 20
        assert_eq!(capture.sample(p(30.0, 0.0), None).unwrap().pos(), p(20.0, 0.0));
    }

    #[test]
    fn pressure_is_exponentially_smoothed() {
        let mut capture = StrokeCapture::new(CaptureConfig {
            window: 1,
            pressure_alpha: 0.5,
            min_distance: 0.0,
        });
        capture.begin(p(0.0, 0.0), Some(1.0));
        assert_eq!(capture.sample(p(5.0, 0.0), Some(0.0)).unwrap().pressure, Some(0.5));
        assert_eq!(capture.sample(p(10.0, 0.0), Some(0.0)).unwrap().pressure, Some(0.25));
        // Malformed samples count as full pressure.
        assert_eq!(
            capture.sample(p(15.0, 0.0), Some(f32::INFINITY)).unwrap().pressure,
            Some(0.625)
        );
    }

    #[test]
    fn end_resets_state() {
        let mut capture = StrokeCapture::default();
        capture.begin(p(0.0, 0.0), Some(0.2));
        assert!(capture.is_active());
        capture.end();
        assert!(!capture.is_active());
        assert_eq!(capture.sample(p(50.0, 50.0), None), None);

        // A new gesture does not average against the old one.
        capture.begin(p(100.0, 100.0), None);
        assert_eq!(capture.sample(p(106.0, 100.0), None).unwrap().pos(), p(103.0, 100.0));
    }
}

use std::time::Instant;

use crate::Point;

/// Weight given to the latest instantaneous speed when averaging.
pub const DEFAULT_SMOOTHING_WEIGHT: f64 = 0.1;

/// Exponentially smoothed mouse speed estimator.
///
/// Speeds are in scale-independent points per second: distances are
/// divided by the display's pixel scale so that a flick feels the same on
/// a 1x and a 2x display.
#[derive(Debug, Clone)]
pub struct SpeedTracker {
    weight: f64,
    previous: Option<(Point, Instant)>,
    speed: f64,
}

impl SpeedTracker {
    /// Creates an idle tracker. `weight` is clamped into `(0, 1]`.
    pub fn new(weight: f64) -> Self {
        Self {
            weight: if weight > 0.0 { weight.min(1.0) } else { DEFAULT_SMOOTHING_WEIGHT },
            previous: None,
            speed: 0.0,
        }
    }

    /// The current smoothed speed.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Starts a new gesture at `position` with zero speed.
    pub fn start(&mut self, position: Point, at: Instant) {
        self.previous = Some((position, at));
        self.speed = 0.0;
    }

    /// Forgets the previous sample and drops the speed back to zero.
    pub fn reset(&mut self) {
        self.previous = None;
        self.speed = 0.0;
    }

    /// Feeds one mouse sample and returns the updated smoothed speed.
    ///
    /// The first sample after a reset only records the position. Samples
    /// that are not strictly later than the previous one are ignored, so a
    /// zero elapsed time can never produce an infinite speed.
    pub fn update(&mut self, position: Point, at: Instant, scale: f64) -> f64 {
        let Some((prev_pos, prev_at)) = self.previous else {
            self.previous = Some((position, at));
            return self.speed;
        };

        let elapsed = match at.checked_duration_since(prev_at) {
            Some(d) if !d.is_zero() => d.as_secs_f64(),
            _ => return self.speed,
        };

        let scale = if scale > 0.0 { scale } else { 1.0 };
        let distance = prev_pos.distance_to(position) / scale;
        let instant = distance / elapsed;

        self.speed = instant * self.weight + self.speed * (1.0 - self.weight);
        self.previous = Some((position, at));
        self.speed
    }
}

impl Default for SpeedTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_WEIGHT)
    }
}

#[cfg(test)]
#[path = "tween_test.rs"]
mod tween_test;

use std::time::{Duration, Instant};

use crate::consts::CAMERA_TWEEN_MS;

/// Easing curves for camera transitions.
///
/// `QuartOut` is the stock camera feel: a fast start and a long soft
/// landing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    QuadOut,
    CubicOut,
    #[default]
    QuartOut,
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadOut => 1.0 - (1.0 - t).powi(2),
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::QuartOut => 1.0 - (1.0 - t).powi(4),
        }
    }
}

/// The numeric fields a camera tween interpolates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenFields {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

/// Duration and easing for one camera flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenOptions {
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for TweenOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(CAMERA_TWEEN_MS),
            easing: Easing::QuartOut,
        }
    }
}

/// A host-pumped interpolation between two field sets.
///
/// The tween holds no timer of its own: it starts on the first tick it
/// receives and reports completion once the eased progress reaches the
/// end. Owners apply the returned fields to their subject.
#[derive(Debug, Clone)]
pub struct Tween {
    from: TweenFields,
    to: TweenFields,
    options: TweenOptions,
    started_at: Option<Instant>,
}

impl Tween {
    #[must_use]
    pub fn new(from: TweenFields, to: TweenFields, options: TweenOptions) -> Self {
        Self { from, to, options, started_at: None }
    }

    #[must_use]
    pub fn target(&self) -> TweenFields {
        self.to
    }

    /// Interpolated fields at `now`, plus whether the tween finished.
    ///
    /// The first tick starts the clock. A zero duration completes on
    /// that same tick.
    pub fn tick(&mut self, now: Instant) -> (TweenFields, bool) {
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);
        let progress = if self.options.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.options.duration.as_secs_f64()).clamp(0.0, 1.0)
        };
        let eased = self.options.easing.apply(progress);
        let fields = TweenFields {
            x: lerp(self.from.x, self.to.x, eased),
            y: lerp(self.from.y, self.to.y, eased),
            scale: lerp(self.from.scale, self.to.scale, eased),
        };
        (fields, progress >= 1.0)
    }
}

fn lerp(from: f64, to: f64, k: f64) -> f64 {
    from + (to - from) * k
}

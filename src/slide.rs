#[cfg(test)]
#[path = "slide_test.rs"]
mod slide_test;

use std::time::{Duration, Instant};

use tracing::debug;

use crate::consts::{SETTLE_QUIET_MS, WAS_SLIDING_CLEAR_MS, ZOOM_SCALES};

/// Tuning handed to the host's gesture source when controls attach.
///
/// The engine does not interpret these values; they configure the
/// drag/pinch/wheel plugins and their deceleration on the host side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideControlsConfig {
    pub friction: f64,
    pub bounce: f64,
    pub min_speed: f64,
    pub clamp_min_scale: f64,
    pub clamp_max_scale: f64,
}

impl Default for SlideControlsConfig {
    fn default() -> Self {
        Self {
            friction: 0.95,
            bounce: 0.8,
            min_speed: 0.05,
            clamp_min_scale: ZOOM_SCALES[0],
            clamp_max_scale: ZOOM_SCALES[ZOOM_SCALES.len() - 1],
        }
    }
}

/// Phase of the continuous-interaction tracker.
///
/// Transitions:
/// - movement while attached arms the quiet deadline and enters
///   `Active`;
/// - a gesture ending while `Active` enters `Settling` (the deadline
///   keeps running, deceleration may still move the camera);
/// - movement while `Settling` re-arms the deadline and re-enters
///   `Active`;
/// - the quiet deadline elapsing in either phase returns to `Idle` and
///   reports the settle exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlidePhase {
    #[default]
    Idle,
    Active,
    Settling,
}

/// Debounced activity tracking for continuous gestures.
///
/// Gesture sources end their drag events while inertia is still moving
/// the camera, so the end event alone is not a stability signal. The
/// quiet-period deadline owned here is the source of truth for "the
/// user has settled"; a separate was-sliding flag lingers after the
/// gesture ends so click handlers can tell a slide from a tap.
#[derive(Debug)]
pub struct SlideTracker {
    attached: bool,
    phase: SlidePhase,
    quiet_deadline: Option<Instant>,
    was_sliding: bool,
    was_sliding_deadline: Option<Instant>,
    quiet_period: Duration,
    clear_window: Duration,
}

impl Default for SlideTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SlideTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            attached: false,
            phase: SlidePhase::Idle,
            quiet_deadline: None,
            was_sliding: false,
            was_sliding_deadline: None,
            quiet_period: Duration::from_millis(SETTLE_QUIET_MS),
            clear_window: Duration::from_millis(WAS_SLIDING_CLEAR_MS),
        }
    }

    /// Tracker with custom windows, for hosts with different feel.
    #[must_use]
    pub fn with_windows(quiet_period: Duration, clear_window: Duration) -> Self {
        Self { quiet_period, clear_window, ..Self::new() }
    }

    /// Start tracking gestures; returns the host-side configuration.
    pub fn attach(&mut self) -> SlideControlsConfig {
        self.attached = true;
        debug!("slide controls attached");
        SlideControlsConfig::default()
    }

    /// Stop tracking. Every pending deadline is dropped, so nothing
    /// settles or clears after this.
    pub fn detach(&mut self) {
        self.attached = false;
        self.phase = SlidePhase::Idle;
        self.quiet_deadline = None;
        self.was_sliding = false;
        self.was_sliding_deadline = None;
        debug!("slide controls detached");
    }

    #[must_use]
    pub fn attached(&self) -> bool {
        self.attached
    }

    #[must_use]
    pub fn phase(&self) -> SlidePhase {
        self.phase
    }

    /// True from the first movement until the settle fires.
    #[must_use]
    pub fn is_sliding(&self) -> bool {
        self.phase != SlidePhase::Idle
    }

    /// True from gesture start until the clear window elapses after
    /// the gesture ends.
    #[must_use]
    pub fn was_sliding(&self) -> bool {
        self.was_sliding
    }

    /// A press began. Raises the was-sliding flag and cancels any
    /// pending clear from a previous gesture.
    pub fn on_gesture_start(&mut self, _now: Instant) {
        if !self.attached {
            return;
        }
        self.was_sliding = true;
        self.was_sliding_deadline = None;
    }

    /// A press ended. Inertia may still produce movement, so the quiet
    /// deadline keeps running; the was-sliding clear window re-arms.
    pub fn on_gesture_end(&mut self, now: Instant) {
        if !self.attached {
            return;
        }
        if self.phase == SlidePhase::Active {
            self.phase = SlidePhase::Settling;
        }
        self.was_sliding_deadline = Some(now + self.clear_window);
    }

    /// A movement tick (drag, pinch, wheel, or deceleration).
    pub fn on_moved(&mut self, now: Instant) {
        if !self.attached {
            return;
        }
        self.phase = SlidePhase::Active;
        self.quiet_deadline = Some(now + self.quiet_period);
    }

    /// Expire deadlines up to `now`. Returns true when the quiet
    /// period elapsed and the interaction settled on this tick.
    pub fn advance(&mut self, now: Instant) -> bool {
        if let Some(deadline) = self.was_sliding_deadline {
            if now >= deadline {
                self.was_sliding = false;
                self.was_sliding_deadline = None;
            }
        }
        let Some(deadline) = self.quiet_deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.phase = SlidePhase::Idle;
        self.quiet_deadline = None;
        debug!("slide settled");
        true
    }
}

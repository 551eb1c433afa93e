#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::fmt;
use std::time::Instant;

use tracing::debug;
use uuid::Uuid;

use crate::camera::{CameraTransform, PublicCameraState, ScreenPoint, WorldPoint};
use crate::consts::ZOOM_SCALES;
use crate::request::AsyncId;
use crate::slide::{SlideControlsConfig, SlidePhase, SlideTracker};
use crate::tween::{Tween, TweenFields, TweenOptions};
use crate::zoom;

/// Zero-argument redraw notification for dependent overlays.
pub type RedrawHook = Box<dyn FnMut()>;

/// Signals produced while pumping the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportSignal {
    /// A camera flight reached its target. The settled record must be
    /// committed through the store with the animated tag and this id.
    FlightFinished { id: AsyncId, settled: PublicCameraState },
    /// The quiet period elapsed; the continuous interaction settled.
    SlideSettled,
}

/// One in-flight camera transition.
#[derive(Debug)]
struct CameraFlight {
    id: AsyncId,
    tween: Tween,
    target: PublicCameraState,
}

/// Owner of the live camera transform and the interaction machinery.
///
/// Gestures write `x` / `y` / `scale` straight into the transform on
/// the fast path, bypassing the state tree; the slide tracker's settle
/// signal marks the point where the derived camera record is committed
/// back. Camera flights suspend interactivity until they land or are
/// cancelled.
pub struct ViewportController {
    transform: CameraTransform,
    interactive: bool,
    slide: SlideTracker,
    flight: Option<CameraFlight>,
    redraw: Option<RedrawHook>,
    tween_options: TweenOptions,
}

impl fmt::Debug for ViewportController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportController")
            .field("transform", &self.transform)
            .field("interactive", &self.interactive)
            .field("slide", &self.slide)
            .field("flight", &self.flight)
            .finish_non_exhaustive()
    }
}

impl ViewportController {
    #[must_use]
    pub fn new(screen_width: f64, screen_height: f64) -> Self {
        Self {
            transform: CameraTransform::new(screen_width, screen_height),
            interactive: true,
            slide: SlideTracker::new(),
            flight: None,
            redraw: None,
            tween_options: TweenOptions::default(),
        }
    }

    /// Replace the flight duration and easing.
    #[must_use]
    pub fn with_tween_options(mut self, options: TweenOptions) -> Self {
        self.tween_options = options;
        self
    }

    /// Install the host's redraw callback.
    pub fn set_redraw_hook(&mut self, hook: RedrawHook) {
        self.redraw = Some(hook);
    }

    pub fn clear_redraw_hook(&mut self) {
        self.redraw = None;
    }

    fn notify_redraw(&mut self) {
        if let Some(hook) = self.redraw.as_mut() {
            hook();
        }
    }

    // ── Live transform ──────────────────────────────────────────────

    #[must_use]
    pub fn transform(&self) -> CameraTransform {
        self.transform
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.transform.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.transform.y
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn set_x(&mut self, x: f64) {
        self.transform.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.transform.y = y;
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.transform.scale = scale;
    }

    #[must_use]
    pub fn screen_width(&self) -> f64 {
        self.transform.screen_width
    }

    #[must_use]
    pub fn screen_height(&self) -> f64 {
        self.transform.screen_height
    }

    /// Whether gestures currently reach the transform.
    #[must_use]
    pub fn interactive(&self) -> bool {
        self.interactive
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    // ── Derived projections ─────────────────────────────────────────

    /// World point currently centered on screen. Recomputed on every
    /// call, never stored.
    #[must_use]
    pub fn world_center(&self) -> WorldPoint {
        self.transform.world_screen_center()
    }

    #[must_use]
    pub fn screen_to_world(&self, screen: ScreenPoint) -> WorldPoint {
        self.transform.screen_to_world(screen)
    }

    /// Full derived camera record for the current transform.
    #[must_use]
    pub fn derived_camera_state(&self) -> PublicCameraState {
        self.transform.camera_state_for(None, None)
    }

    /// Zoom as an integral percentage for UI chrome.
    #[must_use]
    pub fn zoom_percent(&self) -> String {
        let percent = (self.transform.scale * 100.0).round() as i64;
        percent.to_string()
    }

    // ── Zoom steps ──────────────────────────────────────────────────

    #[must_use]
    pub fn next_scale_step_up(&self, run_ahead: usize) -> f64 {
        zoom::next_scale_step_up(self.transform.scale, run_ahead, &ZOOM_SCALES)
    }

    #[must_use]
    pub fn next_scale_step_down(&self, run_ahead: usize) -> f64 {
        zoom::next_scale_step_down(self.transform.scale, run_ahead, &ZOOM_SCALES)
    }

    // ── Slide controls ──────────────────────────────────────────────

    /// Attach gesture handling; returns the configuration for the
    /// host's gesture source.
    pub fn attach_slide_controls(&mut self) -> SlideControlsConfig {
        self.slide.attach()
    }

    /// Detach gesture handling. Later gesture events are ignored and
    /// no settle or clear fires afterwards.
    pub fn detach_slide_controls(&mut self) {
        self.slide.detach();
    }

    #[must_use]
    pub fn slide_phase(&self) -> SlidePhase {
        self.slide.phase()
    }

    #[must_use]
    pub fn is_sliding(&self) -> bool {
        self.slide.is_sliding()
    }

    #[must_use]
    pub fn was_sliding(&self) -> bool {
        self.slide.was_sliding()
    }

    fn gestures_blocked(&self) -> bool {
        !self.interactive || !self.slide.attached()
    }

    pub fn on_drag_start(&mut self, now: Instant) {
        if self.gestures_blocked() {
            return;
        }
        self.slide.on_gesture_start(now);
    }

    pub fn on_drag_end(&mut self, now: Instant) {
        if self.gestures_blocked() {
            return;
        }
        self.slide.on_gesture_end(now);
    }

    pub fn on_pinch_start(&mut self, now: Instant) {
        if self.gestures_blocked() {
            return;
        }
        self.slide.on_gesture_start(now);
    }

    pub fn on_pinch_end(&mut self, now: Instant) {
        if self.gestures_blocked() {
            return;
        }
        self.slide.on_gesture_end(now);
    }

    /// Continuous movement tick. Hot path: deadline re-arm and redraw
    /// only, no tree access.
    pub fn on_moved(&mut self, now: Instant) {
        if self.gestures_blocked() {
            return;
        }
        self.slide.on_moved(now);
        self.notify_redraw();
    }

    /// Wheel zoom tick; counts as movement for activity tracking.
    pub fn on_wheel(&mut self, now: Instant) {
        if self.gestures_blocked() {
            return;
        }
        self.slide.on_moved(now);
        self.notify_redraw();
    }

    // ── Resize ──────────────────────────────────────────────────────

    /// Apply new host dimensions. Returns false when nothing changed.
    #[allow(clippy::float_cmp)]
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        if width == self.transform.screen_width && height == self.transform.screen_height {
            return false;
        }
        self.transform.screen_width = width;
        self.transform.screen_height = height;
        debug!(width, height, "viewport resized");
        self.notify_redraw();
        true
    }

    // ── Camera flights ──────────────────────────────────────────────

    /// Begin an animated transition toward `target`. Interactivity is
    /// suspended until the flight lands or is cancelled; the tween
    /// starts on the next [`Self::advance`] tick.
    pub fn animate_camera(&mut self, target: PublicCameraState) -> AsyncId {
        let id = Uuid::new_v4();
        let from = TweenFields {
            x: self.transform.x,
            y: self.transform.y,
            scale: self.transform.scale,
        };
        let to = TweenFields { x: target.x, y: target.y, scale: target.scale };
        self.interactive = false;
        self.flight = Some(CameraFlight {
            id,
            tween: Tween::new(from, to, self.tween_options),
            target,
        });
        debug!(%id, scale = target.scale, "camera flight started");
        id
    }

    /// Id of the in-flight camera transition, if any.
    #[must_use]
    pub fn flight_id(&self) -> Option<AsyncId> {
        self.flight.as_ref().map(|flight| flight.id)
    }

    /// Cancel the named flight if it is the live one. Restores
    /// interactivity; unknown ids are ignored.
    pub fn cancel_flight(&mut self, id: AsyncId) -> bool {
        match &self.flight {
            Some(flight) if flight.id == id => {
                self.flight = None;
                self.interactive = true;
                debug!(%id, "camera flight cancelled");
                true
            }
            _ => false,
        }
    }

    // ── Pump ────────────────────────────────────────────────────────

    /// Advance the flight and the slide deadlines to `now`.
    pub fn advance(&mut self, now: Instant) -> Vec<ViewportSignal> {
        let mut signals = Vec::new();

        if let Some(mut flight) = self.flight.take() {
            let (fields, finished) = flight.tween.tick(now);
            self.transform.x = fields.x;
            self.transform.y = fields.y;
            self.transform.scale = fields.scale;
            if finished {
                // Land exactly on the target so the settle commit is
                // stable against easing arithmetic.
                self.transform.x = flight.target.x;
                self.transform.y = flight.target.y;
                self.transform.scale = flight.target.scale;
                self.interactive = true;
                debug!(id = %flight.id, "camera flight finished");
                signals.push(ViewportSignal::FlightFinished {
                    id: flight.id,
                    settled: flight.target,
                });
            } else {
                self.flight = Some(flight);
            }
            self.notify_redraw();
        }

        if self.slide.advance(now) {
            signals.push(ViewportSignal::SlideSettled);
        }

        signals
    }
}

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

use serde_json::json;
use tracing::debug;

use crate::app::AppCore;
use crate::board::MemoId;
use crate::camera::WorldPoint;
use crate::consts::FIT_AREA_MARGIN_PERCENT;
use crate::locator::{Locator, Scope};
use crate::request::{AsyncId, OpSettings};
use crate::store::{UpdateError, UpdateStatus};

/// User-level camera and board operations.
///
/// These are the compositions a host binds its controls to; every one
/// of them flows through [`AppCore::set_state`].
impl AppCore {
    /// Animated zoom to the next ladder step up from the live scale.
    pub fn zoom_in(&mut self, run_ahead: usize) -> Result<AsyncId, UpdateError> {
        let scale = self.viewport().next_scale_step_up(run_ahead);
        self.zoom_to(None, scale)
    }

    /// Animated zoom to the next ladder step down from the live scale.
    pub fn zoom_out(&mut self, run_ahead: usize) -> Result<AsyncId, UpdateError> {
        let scale = self.viewport().next_scale_step_down(run_ahead);
        self.zoom_to(None, scale)
    }

    /// Animated pan-and-zoom centering `point` at `scale`. A missing
    /// point keeps the current focal point, so this doubles as a plain
    /// animated zoom.
    pub fn zoom_to(&mut self, point: Option<WorldPoint>, scale: f64) -> Result<AsyncId, UpdateError> {
        let target = self.viewport().transform().camera_state_for(point, Some(scale));
        let status = self.set_state(Locator::VIEWPORT, target.snapshot(), OpSettings::animation())?;
        match status {
            UpdateStatus::Pending(id) => Ok(id),
            _ => Err(UpdateError::AnimationStartFailure),
        }
    }

    /// Fly to a memo so it fills the screen with the standard margin,
    /// and focus it once the flight lands.
    pub fn focus_memo(&mut self, id: MemoId) -> Result<AsyncId, UpdateError> {
        let Some(memo) = self.board_memo(&id) else {
            return Err(UpdateError::UnknownEntity { scope: Scope::Board, id });
        };
        let margin = 1.0 + FIT_AREA_MARGIN_PERCENT / 100.0;
        let width = memo.width * memo.scale * margin;
        let height = memo.height * memo.scale * margin;
        if width <= 0.0 || height <= 0.0 {
            debug!(%id, "memo has no extent to fit");
            return Err(UpdateError::AnimationStartFailure);
        }
        let scale = self.viewport().transform().find_scale_fit(width, height);
        let (cx, cy) = memo.center();
        let flight = self.zoom_to(Some(WorldPoint::new(cx, cy)), scale)?;
        self.defer_focus(flight, id);
        Ok(flight)
    }

    /// Clear the focused memo, if any.
    pub fn blur_memo(&mut self) -> Result<UpdateStatus, UpdateError> {
        self.set_state(Locator::BOARD, json!({ "focused": null }), OpSettings::default())
    }

    /// Commit the current derived camera record through the store.
    ///
    /// This is the reconciliation point between the fast interactive
    /// path and the canonical tree; [`AppCore::advance`] calls it for
    /// every slide settle, and hosts may call it directly after moving
    /// the transform themselves.
    pub fn amend_camera_state(&mut self) -> Result<UpdateStatus, UpdateError> {
        let state = self.viewport().derived_camera_state();
        self.set_state(Locator::VIEWPORT, state.snapshot(), OpSettings::default())
    }

    /// Zoom as an integral percentage for UI chrome.
    #[must_use]
    pub fn zoom_percent(&self) -> String {
        self.viewport().zoom_percent()
    }
}

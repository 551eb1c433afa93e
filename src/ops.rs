#[cfg(test)]
#[path = "ops_test.rs"]
mod ops_test;

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::camera::{PublicCameraState, WorldPoint, round4};
use crate::locator::Locator;
use crate::request::{AsyncId, UpdateRequest};
use crate::viewport::ViewportController;

/// One registered in-flight animated transition.
#[derive(Debug, Clone, Copy)]
struct ActiveAnimation {
    locator: Locator,
    target: PublicCameraState,
}

/// Field-level value resolution and the asynchronous pipeline.
///
/// Sync updates pass each changed field through [`Operations::exec_value`]
/// one at a time; animation requests treat the whole slice as a single
/// grouped target and never touch the tree until they settle.
#[derive(Debug, Default)]
pub struct Operations {
    active: HashMap<AsyncId, ActiveAnimation>,
}

impl Operations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transitions currently registered as in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.active.len()
    }

    /// Target registered for a transition, if it is still in flight.
    #[must_use]
    pub fn target_of(&self, async_id: AsyncId) -> Option<PublicCameraState> {
        self.active.get(&async_id).map(|animation| animation.target)
    }

    /// Locator a transition was registered against.
    #[must_use]
    pub fn locator_of(&self, async_id: AsyncId) -> Option<Locator> {
        self.active.get(&async_id).map(|animation| animation.locator)
    }

    /// Resolve the final value to commit for one changed field.
    ///
    /// Viewport primitives are pushed to the live transform and read
    /// back, so the store records the effective value; the projection
    /// fields `wX` / `wY` and all board fields pass through. Numeric
    /// values stabilize at four decimals. Dry runs resolve without
    /// touching the subject.
    #[allow(clippy::unused_self)]
    pub fn exec_value(
        &self,
        field: &str,
        value: &Value,
        request: &UpdateRequest,
        viewport: &mut ViewportController,
    ) -> Value {
        let Some(number) = value.as_f64() else {
            // Non-numeric schema fields (board `focused`) pass through.
            return value.clone();
        };
        let rounded = round4(number);
        if request.settings.no_op || request.locator != Locator::VIEWPORT {
            return Value::from(rounded);
        }
        let effective = match field {
            "x" => {
                viewport.set_x(rounded);
                viewport.x()
            }
            "y" => {
                viewport.set_y(rounded);
                viewport.y()
            }
            "scale" => {
                viewport.set_scale(rounded);
                viewport.scale()
            }
            _ => rounded,
        };
        Value::from(round4(effective))
    }

    /// Start a grouped animated transition toward the slice's values.
    ///
    /// The tree is untouched on this path; the settled values commit
    /// later under the animated tag. Starting a new camera transition
    /// supersedes any flight already in the air. Returns `None` when
    /// the slice resolves to no target or to the current state.
    pub fn exec_animation(
        &mut self,
        request: &UpdateRequest,
        viewport: &mut ViewportController,
    ) -> Option<AsyncId> {
        let target = Self::animation_target(&request.slice, viewport)?;
        if let Some(superseded) = viewport.flight_id() {
            viewport.cancel_flight(superseded);
            self.active.remove(&superseded);
            debug!(%superseded, "camera flight superseded");
        }
        let id = viewport.animate_camera(target);
        self.active.insert(id, ActiveAnimation { locator: request.locator, target });
        debug!(async_id = %id, "animated transition registered");
        Some(id)
    }

    /// Drop the named transition and cancel its flight. Idempotent;
    /// returns whether anything was actually removed.
    pub fn remove_async(&mut self, async_id: AsyncId, viewport: &mut ViewportController) -> bool {
        let registered = self.active.remove(&async_id).is_some();
        let cancelled = viewport.cancel_flight(async_id);
        if registered || cancelled {
            debug!(%async_id, registered, cancelled, "animated transition removed");
        }
        registered || cancelled
    }

    /// Resolve an animation slice into a full camera-state target.
    ///
    /// Explicit `x` / `y` override the translation directly, with the
    /// focal point re-derived from them. Otherwise the target centers
    /// the named focal point, defaulting to the current one, so a
    /// scale-only slice zooms in place. A target equal to the current
    /// state is degenerate.
    fn animation_target(slice: &Value, viewport: &ViewportController) -> Option<PublicCameraState> {
        let fields = slice.as_object()?;
        let wx = fields.get("wX").and_then(Value::as_f64);
        let wy = fields.get("wY").and_then(Value::as_f64);
        let x = fields.get("x").and_then(Value::as_f64);
        let y = fields.get("y").and_then(Value::as_f64);
        let scale = fields.get("scale").and_then(Value::as_f64);
        if wx.is_none() && wy.is_none() && x.is_none() && y.is_none() && scale.is_none() {
            return None;
        }

        let transform = viewport.transform();
        let target = if x.is_some() || y.is_some() {
            transform.camera_state_from_translation(
                x.unwrap_or(transform.x),
                y.unwrap_or(transform.y),
                scale.unwrap_or(transform.scale),
            )
        } else {
            let center = transform.world_screen_center();
            let point = WorldPoint::new(wx.unwrap_or(center.wx), wy.unwrap_or(center.wy));
            transform.camera_state_for(Some(point), scale)
        };

        let current = transform.camera_state_for(None, None);
        if Self::same_pose(target, current) {
            return None;
        }
        Some(target)
    }

    #[allow(clippy::float_cmp)]
    fn same_pose(a: PublicCameraState, b: PublicCameraState) -> bool {
        a.x == b.x && a.y == b.y && a.scale == b.scale
    }
}

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::consts::{MAX_TARGET_SCALE, MIN_TARGET_SCALE};

/// A point in screen space (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub sx: f64,
    pub sy: f64,
}

impl ScreenPoint {
    #[must_use]
    pub fn new(sx: f64, sy: f64) -> Self {
        Self { sx, sy }
    }
}

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    pub wx: f64,
    pub wy: f64,
}

impl WorldPoint {
    #[must_use]
    pub fn new(wx: f64, wy: f64) -> Self {
        Self { wx, wy }
    }
}

/// Round to four decimal places, the stable precision for every
/// derived camera value and every committed numeric field.
#[must_use]
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// The canonical camera record committed to the state tree.
///
/// `x` / `y` are the translation of the world origin in screen pixels,
/// `wx` / `wy` the world point centered on screen, `scale` the zoom
/// factor. The wire names for the focal point are `wX` / `wY`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PublicCameraState {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "wX")]
    pub wx: f64,
    #[serde(rename = "wY")]
    pub wy: f64,
    pub scale: f64,
}

impl Default for PublicCameraState {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, wx: 0.0, wy: 0.0, scale: 1.0 }
    }
}

impl PublicCameraState {
    /// Serialized record with the wire field names.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        json!({
            "x": self.x,
            "y": self.y,
            "wX": self.wx,
            "wY": self.wy,
            "scale": self.scale,
        })
    }

    /// Shallow-merge resolved numeric fields into the record. Fields
    /// outside the schema are ignored.
    pub(crate) fn merge(&mut self, fields: &serde_json::Map<String, Value>) {
        for (field, value) in fields {
            let Some(number) = value.as_f64() else { continue };
            match field.as_str() {
                "x" => self.x = number,
                "y" => self.y = number,
                "wX" => self.wx = number,
                "wY" => self.wy = number,
                "scale" => self.scale = number,
                _ => {}
            }
        }
    }
}

/// Live camera transform for pan/zoom over the infinite board.
///
/// `x` / `y` are the world-origin translation in CSS pixels and `scale`
/// the zoom factor; `screen_width` / `screen_height` are the host
/// surface dimensions. The focal point is never stored here, it is
/// recomputed from these five values on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub screen_width: f64,
    pub screen_height: f64,
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl CameraTransform {
    #[must_use]
    pub fn new(screen_width: f64, screen_height: f64) -> Self {
        Self { x: 0.0, y: 0.0, scale: 1.0, screen_width, screen_height }
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: ScreenPoint) -> WorldPoint {
        WorldPoint {
            wx: (screen.sx - self.x) / self.scale,
            wy: (screen.sy - self.y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: WorldPoint) -> ScreenPoint {
        ScreenPoint {
            sx: world.wx * self.scale + self.x,
            sy: world.wy * self.scale + self.y,
        }
    }

    /// Geometric center of the host surface in screen pixels.
    #[must_use]
    pub fn screen_center(&self) -> ScreenPoint {
        ScreenPoint::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }

    /// Width of the visible world region at the current scale.
    #[must_use]
    pub fn world_screen_width(&self) -> f64 {
        self.screen_width / self.scale
    }

    /// Height of the visible world region at the current scale.
    #[must_use]
    pub fn world_screen_height(&self) -> f64 {
        self.screen_height / self.scale
    }

    /// World point currently centered on screen, at four decimals.
    #[must_use]
    pub fn world_screen_center(&self) -> WorldPoint {
        WorldPoint {
            wx: round4(self.world_screen_width() / 2.0 - self.x / self.scale),
            wy: round4(self.world_screen_height() / 2.0 - self.y / self.scale),
        }
    }

    /// Full camera record that would center `target` at `target_scale`.
    ///
    /// Omitted arguments fall back to the current focal point and the
    /// current scale. The scale is clamped to the animated-target
    /// bounds and the translation lands on four decimals.
    #[must_use]
    pub fn camera_state_for(
        &self,
        target: Option<WorldPoint>,
        target_scale: Option<f64>,
    ) -> PublicCameraState {
        let target = target.unwrap_or_else(|| self.world_screen_center());
        let scale = target_scale
            .unwrap_or(self.scale)
            .clamp(MIN_TARGET_SCALE, MAX_TARGET_SCALE);
        PublicCameraState {
            x: round4((self.screen_width / scale / 2.0 - target.wx) * scale),
            y: round4((self.screen_height / scale / 2.0 - target.wy) * scale),
            wx: round4(target.wx),
            wy: round4(target.wy),
            scale,
        }
    }

    /// Full camera record for a raw translation target, deriving the
    /// focal point that target would center.
    #[must_use]
    pub fn camera_state_from_translation(&self, x: f64, y: f64, scale: f64) -> PublicCameraState {
        let scale = scale.clamp(MIN_TARGET_SCALE, MAX_TARGET_SCALE);
        PublicCameraState {
            x: round4(x),
            y: round4(y),
            wx: round4((self.screen_width / 2.0 - x) / scale),
            wy: round4((self.screen_height / 2.0 - y) / scale),
            scale,
        }
    }

    /// Largest scale at which a world extent of `width` x `height`
    /// fits fully on screen. The extent must be positive.
    #[must_use]
    pub fn find_scale_fit(&self, width: f64, height: f64) -> f64 {
        round4((self.screen_width / width).min(self.screen_height / height))
    }
}

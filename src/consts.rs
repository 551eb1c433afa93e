//! Shared numeric constants for the flowboard crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Discrete zoom ladder, ascending. Every rung is a power of two so
/// on-rung comparisons stay exact in binary floating point.
pub const ZOOM_SCALES: [f64; 11] = [
    0.031_25, 0.0625, 0.125, 0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0,
];

/// Lowest scale an animated camera target may request.
pub const MIN_TARGET_SCALE: f64 = 0.01;

/// Highest scale an animated camera target may request.
pub const MAX_TARGET_SCALE: f64 = 32.0;

// ── State ───────────────────────────────────────────────────────

/// Maximum committed updates retained by the history log.
pub const HISTORY_LEVEL: usize = 50;

/// Extra margin applied around a memo when fitting it to the screen,
/// as a percentage of the memo's extent.
pub const FIT_AREA_MARGIN_PERCENT: f64 = 20.0;

// ── Timing ──────────────────────────────────────────────────────

/// Quiet period after the last movement before a continuous
/// interaction counts as settled, in milliseconds.
pub const SETTLE_QUIET_MS: u64 = 300;

/// How long the was-sliding indicator lingers after a gesture ends,
/// in milliseconds.
pub const WAS_SLIDING_CLEAR_MS: u64 = 220;

/// Default duration of an animated camera transition, in milliseconds.
pub const CAMERA_TWEEN_MS: u64 = 500;

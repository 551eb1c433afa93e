//! Scoped state-update engine for an interactive memo board.
//!
//! The crate owns a small public state tree (the camera viewport and
//! the board's memos), addressed by locators and mutated exclusively
//! through [`store::StateStore::set_state`]. A sync update diffs its
//! partial slice against current state and commits the changed fields
//! atomically, leaving a bounded history trail; animation-tagged
//! updates detour through cancellable camera flights that the host
//! pumps with [`app::AppCore::advance`]. The host layer is responsible
//! only for wiring gesture events in and applying redraws out.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Engine facade: state access, board surgery, the time pump |
//! | [`store`] | The state tree and the set/get pipeline |
//! | [`ops`] | Field value resolution and the async transition registry |
//! | [`history`] | Bounded newest-first log of committed updates |
//! | [`viewport`] | Live camera transform, gestures, flights |
//! | [`camera`] | Camera records and coordinate conversions |
//! | [`zoom`] | Discrete zoom-step ladder |
//! | [`slide`] | Settle debounce for continuous interactions |
//! | [`tween`] | Host-pumped easing for camera flights |
//! | [`board`] | Board domain state and memo entities |
//! | [`locator`] | State-tree addresses and their parsing |
//! | [`request`] | Update requests and per-call settings |
//! | [`actions`] | User-level camera and focus operations |
//! | [`modifiers`] | Bulk spatial modifiers (grid layout) |
//! | [`consts`] | Shared numeric constants (ladder, windows, margins) |

pub mod actions;
pub mod app;
pub mod board;
pub mod camera;
pub mod consts;
pub mod history;
pub mod locator;
pub mod modifiers;
pub mod ops;
pub mod request;
pub mod slide;
pub mod store;
pub mod tween;
pub mod viewport;
pub mod zoom;

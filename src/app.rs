#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::time::Instant;

use serde_json::{Value, json};
use tracing::{debug, info};
use uuid::Uuid;

use crate::board::{MemoId, MemoState};
use crate::camera::PublicCameraState;
use crate::locator::Locator;
use crate::ops::Operations;
use crate::request::{AsyncId, OpSettings};
use crate::slide::SlideControlsConfig;
use crate::store::{StateStore, UpdateError, UpdateStatus};
use crate::viewport::{RedrawHook, ViewportController, ViewportSignal};

/// Events surfaced to the host by one [`AppCore::advance`] pump.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceEvent {
    /// A camera flight landed and its settled record was committed.
    CameraAnimationSettled { id: AsyncId, state: PublicCameraState },
    /// A continuous interaction settled and the derived camera record
    /// was amended into the tree.
    SlideSettled { state: PublicCameraState },
}

/// The whole engine behind one board surface: the state tree, the
/// operations engine, and the live viewport.
///
/// Everything is plain method calls so hosts wire their own event
/// sources and drive time themselves through [`AppCore::advance`].
/// The store never reaches back into the viewport on its own; this
/// facade hands the collaborators to each call that needs them.
#[derive(Debug)]
pub struct AppCore {
    store: StateStore,
    operations: Operations,
    viewport: ViewportController,
    pending_focus: Option<(AsyncId, MemoId)>,
}

impl AppCore {
    #[must_use]
    pub fn new(screen_width: f64, screen_height: f64) -> Self {
        info!(screen_width, screen_height, "engine created");
        Self {
            store: StateStore::new(),
            operations: Operations::new(),
            viewport: ViewportController::new(screen_width, screen_height),
            pending_focus: None,
        }
    }

    #[must_use]
    pub fn with_viewport(viewport: ViewportController) -> Self {
        Self {
            store: StateStore::new(),
            operations: Operations::new(),
            viewport,
            pending_focus: None,
        }
    }

    // ── State access ────────────────────────────────────────────────

    /// Single mutation entry point for the whole engine.
    pub fn set_state(
        &mut self,
        locator: Locator,
        slice: Value,
        settings: OpSettings,
    ) -> Result<UpdateStatus, UpdateError> {
        self.store.set_state(&mut self.operations, &mut self.viewport, locator, slice, settings)
    }

    /// Snapshot of the whole tree, one domain, or one entity.
    pub fn get_state(&self, locator: Option<&Locator>) -> Result<Value, UpdateError> {
        self.store.get_state(locator)
    }

    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    #[must_use]
    pub fn operations(&self) -> &Operations {
        &self.operations
    }

    #[must_use]
    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportController {
        &mut self.viewport
    }

    // ── Board surgery ───────────────────────────────────────────────

    /// Create a memo with a fresh id. Creation is store surgery, not a
    /// patch; updates to the memo then flow through `set_state`.
    pub fn add_memo(&mut self, memo: MemoState) -> MemoId {
        let id = Uuid::new_v4();
        self.insert_memo(id, memo);
        id
    }

    /// Insert a memo under a caller-chosen id.
    pub fn insert_memo(&mut self, id: MemoId, memo: MemoState) {
        self.store.board_mut().insert_memo(id, memo);
        debug!(%id, "memo inserted");
    }

    /// Remove a memo; a stale pending focus on it is dropped too.
    pub fn remove_memo(&mut self, id: &MemoId) -> Option<MemoState> {
        if let Some((_, memo_id)) = self.pending_focus {
            if memo_id == *id {
                self.pending_focus = None;
            }
        }
        self.store.board_mut().remove_memo(id)
    }

    #[must_use]
    pub fn board_memo(&self, id: &MemoId) -> Option<MemoState> {
        self.store.board().memo(id).copied()
    }

    #[must_use]
    pub fn memo_ids(&self) -> Vec<MemoId> {
        self.store.board().memo_ids()
    }

    // ── Host wiring ─────────────────────────────────────────────────

    pub fn set_redraw_hook(&mut self, hook: RedrawHook) {
        self.viewport.set_redraw_hook(hook);
    }

    pub fn attach_slide_controls(&mut self) -> SlideControlsConfig {
        self.viewport.attach_slide_controls()
    }

    pub fn detach_slide_controls(&mut self) {
        self.viewport.detach_slide_controls();
    }

    pub fn on_drag_start(&mut self, now: Instant) {
        self.viewport.on_drag_start(now);
    }

    pub fn on_drag_end(&mut self, now: Instant) {
        self.viewport.on_drag_end(now);
    }

    pub fn on_pinch_start(&mut self, now: Instant) {
        self.viewport.on_pinch_start(now);
    }

    pub fn on_pinch_end(&mut self, now: Instant) {
        self.viewport.on_pinch_end(now);
    }

    pub fn on_moved(&mut self, now: Instant) {
        self.viewport.on_moved(now);
    }

    pub fn on_wheel(&mut self, now: Instant) {
        self.viewport.on_wheel(now);
    }

    /// Apply new host dimensions. Returns whether anything changed.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        self.viewport.resize(width, height)
    }

    // ── Pump ────────────────────────────────────────────────────────

    /// Advance flights and deadlines to `now`, committing whatever
    /// settled on this tick.
    ///
    /// A finished flight commits its settled record under the animated
    /// tag, then resolves any focus waiting on that flight. A settled
    /// slide amends the derived camera record. Both commits land in
    /// history like any other sync update.
    pub fn advance(&mut self, now: Instant) -> Vec<AdvanceEvent> {
        let mut events = Vec::new();
        for signal in self.viewport.advance(now) {
            match signal {
                ViewportSignal::FlightFinished { id, settled } => {
                    match self.set_state(
                        Locator::VIEWPORT,
                        settled.snapshot(),
                        OpSettings::animated(id),
                    ) {
                        Ok(_) => {
                            events.push(AdvanceEvent::CameraAnimationSettled { id, state: settled });
                        }
                        Err(error) => debug!(%error, %id, "animated settle not committed"),
                    }
                    self.resolve_pending_focus(id);
                }
                ViewportSignal::SlideSettled => {
                    let state = self.viewport.derived_camera_state();
                    match self.set_state(Locator::VIEWPORT, state.snapshot(), OpSettings::default())
                    {
                        Ok(_) => events.push(AdvanceEvent::SlideSettled { state }),
                        Err(error) => debug!(%error, "slide settle not committed"),
                    }
                }
            }
        }
        events
    }

    /// Remember a focus to commit once the named flight lands.
    pub(crate) fn defer_focus(&mut self, flight: AsyncId, memo: MemoId) {
        self.pending_focus = Some((flight, memo));
    }

    fn resolve_pending_focus(&mut self, landed: AsyncId) {
        let Some((flight, memo)) = self.pending_focus.take() else {
            return;
        };
        if flight != landed {
            // The awaited flight was superseded; the focus dies with it.
            return;
        }
        let slice = json!({ "focused": memo.to_string() });
        if let Err(error) = self.set_state(Locator::BOARD, slice, OpSettings::default()) {
            debug!(%error, %memo, "focus not committed");
        }
    }
}

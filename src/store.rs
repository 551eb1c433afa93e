#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::board::{MemoState, PublicBoardState};
use crate::camera::PublicCameraState;
use crate::consts::HISTORY_LEVEL;
use crate::history::{CommittedUpdate, History};
use crate::locator::{Locator, Scope};
use crate::ops::Operations;
use crate::request::{AsyncId, AsyncKind, OpSettings, UpdateRequest};
use crate::viewport::ViewportController;

/// Failure taxonomy for state access. Every variant is local and
/// recoverable; nothing has been mutated when one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateError {
    /// The slice body is not an object or array.
    #[error("state slice is not valid")]
    InvalidSlice,
    /// The animation engine declined to start a transition.
    #[error("animation was not executed")]
    AnimationStartFailure,
    /// An entity locator addressed an entity that does not exist.
    #[error("unknown {scope} entity: {id}")]
    UnknownEntity { scope: Scope, id: Uuid },
    /// An entity locator was used on a domain without entities.
    #[error("{scope} state has no addressable entities")]
    EntityAccessUnsupported { scope: Scope },
}

/// Successful outcomes of one `set_state` call.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateStatus {
    /// Changed fields committed atomically; the committed update says
    /// exactly which.
    Updated(CommittedUpdate),
    /// The request was routed to an animated transition.
    Pending(AsyncId),
    /// Nothing differed from current state; nothing was written.
    Idle,
}

/// Owner of the public state tree and the history log.
///
/// All mutation flows through [`StateStore::set_state`], which runs
/// the received, validated, routed-or-diffed, committed pipeline.
/// There is no partial commit: a slice fails validation before
/// anything is touched, or all of its changed fields land in one
/// merge. Reads hand out snapshots, never live references.
#[derive(Debug)]
pub struct StateStore {
    viewport: PublicCameraState,
    board: PublicBoardState,
    history: History,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_history_level(HISTORY_LEVEL)
    }

    #[must_use]
    pub fn with_history_level(level: usize) -> Self {
        Self {
            viewport: PublicCameraState::default(),
            board: PublicBoardState::new(),
            history: History::new(level),
        }
    }

    /// Apply one update request to the tree.
    ///
    /// Animation-tagged requests short-circuit to the asynchronous
    /// pipeline without touching the tree. Animated-tagged requests
    /// first stop the transition they conclude, then fall through to
    /// the sync path, where the slice is diffed field by field against
    /// current state and every changed field commits in a single
    /// merge. Unknown and mistyped fields are skipped with a warning
    /// rather than failing the whole slice.
    pub fn set_state(
        &mut self,
        operations: &mut Operations,
        viewport: &mut ViewportController,
        locator: Locator,
        slice: Value,
        settings: OpSettings,
    ) -> Result<UpdateStatus, UpdateError> {
        if !Self::is_valid_slice(&slice) {
            return Err(UpdateError::InvalidSlice);
        }
        let request = UpdateRequest::new(locator, slice, settings);

        match settings.async_kind {
            Some(AsyncKind::Animation) => {
                return match operations.exec_animation(&request, viewport) {
                    Some(async_id) => Ok(UpdateStatus::Pending(async_id)),
                    None => Err(UpdateError::AnimationStartFailure),
                };
            }
            Some(AsyncKind::Animated) => {
                if let Some(async_id) = settings.async_id {
                    operations.remove_async(async_id, viewport);
                }
            }
            None => {}
        }

        let current = self.scoped_snapshot(&locator)?;
        let mut applied = Map::new();
        if let Some(fields) = request.slice.as_object() {
            for (field, value) in fields {
                let Some(current_value) = current.get(field) else {
                    warn!(%field, %locator, "unknown field skipped");
                    continue;
                };
                if !Self::diffable_field(&locator, field, value) {
                    warn!(%field, %locator, "mistyped field skipped");
                    continue;
                }
                if Self::values_equal(current_value, value) {
                    continue;
                }
                let resolved = operations.exec_value(field, value, &request, viewport);
                applied.insert(field.clone(), resolved);
            }
        }

        if applied.is_empty() {
            return Ok(UpdateStatus::Idle);
        }

        if settings.no_op {
            return Ok(UpdateStatus::Updated(CommittedUpdate { request, applied }));
        }

        self.merge(&locator, &applied)?;
        debug!(%locator, fields = applied.len(), "state committed");
        let update = CommittedUpdate { request, applied };
        if !settings.no_history {
            self.history.push(update.clone());
        }
        Ok(UpdateStatus::Updated(update))
    }

    /// Snapshot of the whole tree, one domain, or one entity.
    pub fn get_state(&self, locator: Option<&Locator>) -> Result<Value, UpdateError> {
        match locator {
            None => Ok(json!({
                "viewport": self.viewport.snapshot(),
                "board": self.board.snapshot(),
            })),
            Some(locator) => self.scoped_snapshot(locator),
        }
    }

    /// Committed camera record.
    #[must_use]
    pub fn viewport_state(&self) -> PublicCameraState {
        self.viewport
    }

    #[must_use]
    pub fn board(&self) -> &PublicBoardState {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut PublicBoardState {
        &mut self.board
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// A slice body must be an object or array. Scalars and null are
    /// rejected before the pipeline runs.
    #[must_use]
    pub fn is_valid_slice(slice: &Value) -> bool {
        slice.is_object() || slice.is_array()
    }

    /// Validate the shape of a full-tree snapshot: an object carrying
    /// every known domain. All domains are checked, not just the
    /// first.
    #[must_use]
    pub fn is_state_shape_valid(state: &Value) -> bool {
        let Some(map) = state.as_object() else {
            return false;
        };
        Scope::ALL.iter().all(|scope| map.contains_key(scope.as_str()))
    }

    fn scoped_snapshot(&self, locator: &Locator) -> Result<Value, UpdateError> {
        match locator {
            Locator::Domain(Scope::Viewport) => Ok(self.viewport.snapshot()),
            Locator::Domain(Scope::Board) => Ok(self.board.snapshot()),
            Locator::Entity(Scope::Board, id) => self
                .board
                .memo(id)
                .map(MemoState::snapshot)
                .ok_or(UpdateError::UnknownEntity { scope: Scope::Board, id: *id }),
            Locator::Entity(scope, _) => {
                Err(UpdateError::EntityAccessUnsupported { scope: *scope })
            }
        }
    }

    /// Whether a field/value pair is eligible for diffing under this
    /// locator. The schema is closed: viewport and memo fields are
    /// numeric, the board's `focused` is null or an entity id.
    fn diffable_field(locator: &Locator, field: &str, value: &Value) -> bool {
        match locator {
            Locator::Domain(Scope::Viewport) | Locator::Entity(Scope::Board, _) => {
                value.as_f64().is_some()
            }
            Locator::Domain(Scope::Board) => {
                field == "focused"
                    && match value {
                        Value::Null => true,
                        Value::String(text) => Uuid::parse_str(text).is_ok(),
                        _ => false,
                    }
            }
            Locator::Entity(_, _) => false,
        }
    }

    /// Field equality with numeric unification, so `10` equals `10.0`.
    #[allow(clippy::float_cmp)]
    fn values_equal(a: &Value, b: &Value) -> bool {
        match (a.as_f64(), b.as_f64()) {
            (Some(left), Some(right)) => left == right,
            _ => a == b,
        }
    }

    fn merge(&mut self, locator: &Locator, fields: &Map<String, Value>) -> Result<(), UpdateError> {
        match locator {
            Locator::Domain(Scope::Viewport) => {
                self.viewport.merge(fields);
                Ok(())
            }
            Locator::Domain(Scope::Board) => {
                self.board.merge_domain(fields);
                Ok(())
            }
            Locator::Entity(Scope::Board, id) => {
                if self.board.merge_memo(id, fields) {
                    Ok(())
                } else {
                    Err(UpdateError::UnknownEntity { scope: Scope::Board, id: *id })
                }
            }
            Locator::Entity(scope, _) => {
                Err(UpdateError::EntityAccessUnsupported { scope: *scope })
            }
        }
    }
}

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use serde_json::Value;
use uuid::Uuid;

use crate::locator::Locator;

/// Handle of an in-flight animated transition.
pub type AsyncId = Uuid;

/// How a call wants the asynchronous pipeline involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncKind {
    /// Start a grouped animated transition toward the slice's values.
    Animation,
    /// The slice carries the settled values of a finished transition;
    /// stop that transition and commit through the sync path.
    Animated,
}

/// Per-call settings for one `set_state`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpSettings {
    /// Diff and resolve only; nothing is committed or logged and the
    /// subject stays untouched.
    pub no_op: bool,
    /// Commit, but keep the update out of the history log.
    pub no_history: bool,
    /// Route through the asynchronous pipeline.
    pub async_kind: Option<AsyncKind>,
    /// The in-flight transition this call concludes or cancels.
    pub async_id: Option<AsyncId>,
}

impl OpSettings {
    /// Settings that start an animated transition.
    #[must_use]
    pub fn animation() -> Self {
        Self { async_kind: Some(AsyncKind::Animation), ..Self::default() }
    }

    /// Settings that conclude the transition named by `async_id`.
    #[must_use]
    pub fn animated(async_id: AsyncId) -> Self {
        Self {
            async_kind: Some(AsyncKind::Animated),
            async_id: Some(async_id),
            ..Self::default()
        }
    }

    /// Settings for a commit that skips the history log.
    #[must_use]
    pub fn without_history() -> Self {
        Self { no_history: true, ..Self::default() }
    }

    /// Settings for a dry run that resolves but commits nothing.
    #[must_use]
    pub fn dry_run() -> Self {
        Self { no_op: true, ..Self::default() }
    }
}

/// One requested mutation: the address, the slice to apply there, and
/// the settings governing how it applies.
///
/// Built once per `set_state` call and never mutated afterwards;
/// committed requests are retained verbatim in the history log.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub locator: Locator,
    pub slice: Value,
    pub settings: OpSettings,
}

impl UpdateRequest {
    #[must_use]
    pub fn new(locator: Locator, slice: Value, settings: OpSettings) -> Self {
        Self { locator, slice, settings }
    }
}

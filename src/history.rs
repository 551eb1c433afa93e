#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use serde_json::{Map, Value};

use crate::request::UpdateRequest;

/// One committed sync update: the original request plus the fields
/// that actually changed, with their resolved values.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedUpdate {
    pub request: UpdateRequest,
    pub applied: Map<String, Value>,
}

/// Bounded, newest-first log of committed updates.
///
/// Pushing at capacity evicts the oldest entry. The log is purely
/// observational: undo and inspection read from it, nothing in the
/// engine recovers state through it.
#[derive(Debug)]
pub struct History {
    entries: VecDeque<CommittedUpdate>,
    level: usize,
}

impl History {
    #[must_use]
    pub fn new(level: usize) -> Self {
        let level = level.max(1);
        Self { entries: VecDeque::with_capacity(level), level }
    }

    /// Append as the newest entry, evicting the oldest at capacity.
    pub fn push(&mut self, update: CommittedUpdate) {
        if self.entries.len() == self.level {
            self.entries.pop_back();
        }
        self.entries.push_front(update);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retention bound this log was created with.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Most recent committed update.
    #[must_use]
    pub fn newest(&self) -> Option<&CommittedUpdate> {
        self.entries.front()
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &CommittedUpdate> {
        self.entries.iter()
    }
}

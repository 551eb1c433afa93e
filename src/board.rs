#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

/// Unique identifier of one memo on the board.
pub type MemoId = Uuid;

/// Public state of one memo element.
///
/// `x` / `y` locate the memo's top-left corner in world space and
/// `scale` multiplies its intrinsic `width` / `height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoState {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for MemoState {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, scale: 1.0, width: 0.0, height: 0.0 }
    }
}

impl MemoState {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, scale: 1.0, width, height }
    }

    /// World-space center of the memo at its current scale.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            self.x + self.width * self.scale / 2.0,
            self.y + self.height * self.scale / 2.0,
        )
    }

    #[must_use]
    pub fn snapshot(&self) -> Value {
        json!({
            "x": self.x,
            "y": self.y,
            "scale": self.scale,
            "width": self.width,
            "height": self.height,
        })
    }

    /// Shallow-merge resolved numeric fields. Unknown fields are ignored.
    pub(crate) fn merge(&mut self, fields: &Map<String, Value>) {
        for (field, value) in fields {
            let Some(number) = value.as_f64() else { continue };
            match field.as_str() {
                "x" => self.x = number,
                "y" => self.y = number,
                "scale" => self.scale = number,
                "width" => self.width = number,
                "height" => self.height = number,
                _ => {}
            }
        }
    }
}

/// The `board` domain: its own fields plus the memo entities.
#[derive(Debug, Clone, Default)]
pub struct PublicBoardState {
    /// Memo currently focused (fitted to the screen), if any.
    pub focused: Option<MemoId>,
    memos: HashMap<MemoId, MemoState>,
}

impl PublicBoardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_memo(&mut self, id: MemoId, memo: MemoState) {
        self.memos.insert(id, memo);
    }

    /// Remove a memo; focus on it is dropped along with it.
    pub fn remove_memo(&mut self, id: &MemoId) -> Option<MemoState> {
        if self.focused == Some(*id) {
            self.focused = None;
        }
        self.memos.remove(id)
    }

    #[must_use]
    pub fn memo(&self, id: &MemoId) -> Option<&MemoState> {
        self.memos.get(id)
    }

    /// Every memo id, sorted for deterministic iteration.
    #[must_use]
    pub fn memo_ids(&self) -> Vec<MemoId> {
        let mut ids: Vec<MemoId> = self.memos.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.memos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }

    /// Serialized snapshot of the whole domain.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        let mut memos = Map::new();
        for (id, memo) in &self.memos {
            memos.insert(id.to_string(), memo.snapshot());
        }
        json!({
            "focused": self.focused.map(|id| id.to_string()),
            "memos": memos,
        })
    }

    /// Merge resolved domain-level fields (`focused`).
    pub(crate) fn merge_domain(&mut self, fields: &Map<String, Value>) {
        for (field, value) in fields {
            if field != "focused" {
                continue;
            }
            match value {
                Value::Null => self.focused = None,
                Value::String(text) => {
                    if let Ok(id) = Uuid::parse_str(text) {
                        self.focused = Some(id);
                    }
                }
                _ => {}
            }
        }
    }

    /// Merge resolved fields into one memo. Returns false when the
    /// memo does not exist.
    pub(crate) fn merge_memo(&mut self, id: &MemoId, fields: &Map<String, Value>) -> bool {
        let Some(memo) = self.memos.get_mut(id) else {
            return false;
        };
        memo.merge(fields);
        true
    }
}

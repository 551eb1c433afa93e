#[cfg(test)]
#[path = "modifiers_test.rs"]
mod modifiers_test;

use serde_json::json;
use tracing::debug;

use crate::app::AppCore;
use crate::locator::Locator;
use crate::request::OpSettings;
use crate::store::{UpdateError, UpdateStatus};

/// Grid layout parameters for [`AppCore::set_position_grid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Memos per row before wrapping to the next one.
    pub col_limit: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Scale applied to every memo.
    pub scale: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self { col_limit: 4, cell_width: 300.0, cell_height: 100.0, scale: 1.0 }
    }
}

/// Bulk spatial modifiers over board entities.
impl AppCore {
    /// Lay every memo out on a row-major grid, each cell center-
    /// anchored. One per-entity update is committed per memo, so each
    /// placement lands in history individually. Returns how many memos
    /// actually moved.
    pub fn set_position_grid(&mut self, layout: GridLayout) -> Result<usize, UpdateError> {
        let col_limit = layout.col_limit.max(1);
        let ids = self.memo_ids();
        let mut moved = 0;
        for (index, id) in ids.iter().enumerate() {
            let col = index % col_limit;
            let row = index / col_limit;
            let slice = json!({
                "x": col as f64 * layout.cell_width + layout.cell_width / 2.0,
                "y": row as f64 * layout.cell_height + layout.cell_height / 2.0,
                "scale": layout.scale,
            });
            let status = self.set_state(Locator::memo(*id), slice, OpSettings::default())?;
            if matches!(status, UpdateStatus::Updated(_)) {
                moved += 1;
            }
        }
        debug!(total = ids.len(), moved, "memos arranged on a grid");
        Ok(moved)
    }
}

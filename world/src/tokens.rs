//! Token piles lying on grid cells.

use std::collections::BTreeMap;

use gridbot_core::CellCoord;

/// Sparse token counts; cells without tokens have no entry.
#[derive(Clone, Debug, Default)]
pub(crate) struct TokenPiles {
    piles: BTreeMap<CellCoord, u32>,
}

impl TokenPiles {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn count(&self, cell: CellCoord) -> u32 {
        self.piles.get(&cell).copied().unwrap_or(0)
    }

    /// Replaces the pile, returning `false` when the count was unchanged.
    pub(crate) fn set(&mut self, cell: CellCoord, count: u32) -> bool {
        if self.count(cell) == count {
            return false;
        }
        if count == 0 {
            let _ = self.piles.remove(&cell);
        } else {
            let _ = self.piles.insert(cell, count);
        }
        true
    }

    pub(crate) fn drop_one(&mut self, cell: CellCoord) {
        let pile = self.piles.entry(cell).or_insert(0);
        *pile = pile.saturating_add(1);
    }

    /// Removes one token, returning `false` when the cell had none.
    pub(crate) fn take_one(&mut self, cell: CellCoord) -> bool {
        let remaining = match self.count(cell) {
            0 => return false,
            count => count - 1,
        };
        let _ = self.set(cell, remaining);
        true
    }

    pub(crate) fn clear(&mut self) {
        self.piles.clear();
    }
}

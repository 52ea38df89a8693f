//! Per-cell object placements validated against the known-entity catalog.

use std::collections::BTreeMap;

use gridbot_core::{CellCoord, ObjectSpec};

/// Result of toggling an object at a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Toggle {
    /// The object was absent and is now present.
    Placed,
    /// The object was present and is now gone.
    Removed,
}

/// Sparse registry of objects keyed by cell.
///
/// A cell only has an entry while it holds at least one object, so an
/// emptied registry compares equal to a fresh one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ObstacleRegistry {
    cells: BTreeMap<CellCoord, BTreeMap<String, ObjectSpec>>,
}

impl ObstacleRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Places the object when absent, removes it when present.
    pub(crate) fn toggle(&mut self, name: &str, cell: CellCoord, spec: ObjectSpec) -> Toggle {
        let objects = self.cells.entry(cell).or_default();
        if objects.remove(name).is_some() {
            if objects.is_empty() {
                let _ = self.cells.remove(&cell);
            }
            Toggle::Removed
        } else {
            let _ = objects.insert(name.to_owned(), spec);
            Toggle::Placed
        }
    }

    /// Names of the objects at the cell in sorted order.
    pub(crate) fn names_at(&self, cell: CellCoord) -> Vec<&str> {
        self.cells
            .get(&cell)
            .map(|objects| objects.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Reports whether any object at the cell blocks movement.
    pub(crate) fn blocks(&self, cell: CellCoord) -> bool {
        self.cells
            .get(&cell)
            .is_some_and(|objects| objects.values().any(|spec| spec.solid))
    }

    /// Cells holding at least one object.
    pub(crate) fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.keys().copied()
    }

    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }
}

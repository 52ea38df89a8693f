//! Wall registry keyed by canonical grid edges.

use std::collections::BTreeSet;

use gridbot_core::{CellCoord, Orientation};

/// Storage key naming a single edge of the grid.
///
/// The edge between `(x, y)` and `(x + 1, y)` is always stored as the east
/// side of `(x, y)`, and the edge between `(x, y)` and `(x, y + 1)` as the
/// north side of `(x, y)`. Border edges without a left or lower neighbour keep
/// their own side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct EdgeKey {
    cell: CellCoord,
    side: Orientation,
}

impl EdgeKey {
    fn canonical(cell: CellCoord, side: Orientation) -> Self {
        match side {
            Orientation::West if cell.x() > 1 => Self {
                cell: CellCoord::new(cell.x() - 1, cell.y()),
                side: Orientation::East,
            },
            Orientation::South if cell.y() > 1 => Self {
                cell: CellCoord::new(cell.x(), cell.y() - 1),
                side: Orientation::North,
            },
            _ => Self { cell, side },
        }
    }
}

/// Registry storing regular and goal walls as two independent edge sets.
#[derive(Clone, Debug, Default)]
pub(crate) struct WallRegistry {
    regular: BTreeSet<EdgeKey>,
    goal: BTreeSet<EdgeKey>,
}

impl WallRegistry {
    /// Creates a registry without walls.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reports whether a wall of the class sits on the given side of the cell.
    pub(crate) fn contains(&self, cell: CellCoord, side: Orientation, goal: bool) -> bool {
        self.class(goal).contains(&EdgeKey::canonical(cell, side))
    }

    /// Adds a wall, returning `false` when the edge was already walled.
    pub(crate) fn insert(&mut self, cell: CellCoord, side: Orientation, goal: bool) -> bool {
        self.class_mut(goal).insert(EdgeKey::canonical(cell, side))
    }

    /// Removes a wall, returning `false` when the edge was open.
    pub(crate) fn remove(&mut self, cell: CellCoord, side: Orientation, goal: bool) -> bool {
        self.class_mut(goal).remove(&EdgeKey::canonical(cell, side))
    }

    /// Walled sides of the cell in `[east, north, west, south]` order.
    pub(crate) fn sides(&self, cell: CellCoord, goal: bool) -> Vec<Orientation> {
        Orientation::ALL
            .into_iter()
            .filter(|side| self.contains(cell, *side, goal))
            .collect()
    }

    /// Every wall of the class in canonical form, ordered by cell then side.
    pub(crate) fn edges(&self, goal: bool) -> impl Iterator<Item = (CellCoord, Orientation)> + '_ {
        self.class(goal).iter().map(|key| (key.cell, key.side))
    }

    /// Removes every wall of both classes.
    pub(crate) fn clear(&mut self) {
        self.regular.clear();
        self.goal.clear();
    }

    fn class(&self, goal: bool) -> &BTreeSet<EdgeKey> {
        if goal {
            &self.goal
        } else {
            &self.regular
        }
    }

    fn class_mut(&mut self, goal: bool) -> &mut BTreeSet<EdgeKey> {
        if goal {
            &mut self.goal
        } else {
            &mut self.regular
        }
    }
}

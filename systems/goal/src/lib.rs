#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that checks a world against the author's goal description.
//!
//! Goals combine a final robot position and heading, the requirement that
//! every goal wall has been built as a regular wall, and expected token
//! counts on chosen cells. The checker reads the world through its query
//! surface and never mutates it.

use std::collections::BTreeSet;

use gridbot_core::{CellCoord, Orientation, RobotId, WorldError};
use gridbot_world::{query, World};
use serde::{Deserialize, Serialize};

/// Conditions a world must satisfy for the exercise to count as solved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Cell the robot must finish on.
    #[serde(default)]
    pub position: Option<CellCoord>,
    /// Direction the robot must finish facing.
    #[serde(default)]
    pub orientation: Option<Orientation>,
    /// Requires every goal wall to be present as a regular wall.
    #[serde(default)]
    pub goal_walls: bool,
    /// Token counts expected on specific cells.
    #[serde(default)]
    pub tokens: Vec<TokenTarget>,
}

/// Expected token count on a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTarget {
    /// Cell to inspect.
    pub cell: CellCoord,
    /// Tokens the cell must hold.
    pub count: u32,
}

/// A single unmet goal condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalFailure {
    /// The robot finished on the wrong cell.
    Position {
        /// Cell named by the goal.
        expected: CellCoord,
        /// Cell the robot occupies.
        actual: CellCoord,
    },
    /// The robot finished facing the wrong way.
    Orientation {
        /// Heading named by the goal.
        expected: Orientation,
        /// Heading of the robot.
        actual: Orientation,
    },
    /// A goal wall has not been built.
    MissingWall {
        /// Cell the goal wall is recorded on.
        cell: CellCoord,
        /// Side of that cell.
        orientation: Orientation,
    },
    /// A cell holds the wrong number of tokens.
    Tokens {
        /// Cell that was inspected.
        cell: CellCoord,
        /// Tokens named by the goal.
        expected: u32,
        /// Tokens lying on the cell.
        actual: u32,
    },
}

/// Outcome of a goal evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoalReport {
    failures: Vec<GoalFailure>,
}

impl GoalReport {
    /// Reports whether every condition was met.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Unmet conditions in evaluation order.
    #[must_use]
    pub fn failures(&self) -> &[GoalFailure] {
        &self.failures
    }
}

/// Evaluates goals against the world's current state.
#[derive(Debug, Default)]
pub struct GoalChecker;

impl GoalChecker {
    /// Checks the goal for the provided robot.
    ///
    /// Fails only when the robot is not registered in the world.
    pub fn evaluate(
        &self,
        world: &World,
        robot: RobotId,
        goal: &Goal,
    ) -> Result<GoalReport, WorldError> {
        let snapshot = query::robot(world, robot)?;
        let mut failures = Vec::new();

        if let Some(expected) = goal.position {
            if expected != snapshot.cell {
                failures.push(GoalFailure::Position {
                    expected,
                    actual: snapshot.cell,
                });
            }
        }

        if let Some(expected) = goal.orientation {
            if expected != snapshot.orientation {
                failures.push(GoalFailure::Orientation {
                    expected,
                    actual: snapshot.orientation,
                });
            }
        }

        if goal.goal_walls {
            let built: BTreeSet<(CellCoord, Orientation)> =
                query::walls(world, false).into_iter().collect();
            failures.extend(
                query::walls(world, true)
                    .into_iter()
                    .filter(|edge| !built.contains(edge))
                    .map(|(cell, orientation)| GoalFailure::MissingWall { cell, orientation }),
            );
        }

        for target in &goal.tokens {
            let actual = query::tokens_at_cell(world, target.cell);
            if actual != target.count {
                failures.push(GoalFailure::Tokens {
                    cell: target.cell,
                    expected: target.count,
                    actual,
                });
            }
        }

        Ok(GoalReport { failures })
    }
}

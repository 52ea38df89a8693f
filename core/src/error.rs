//! Error contract shared by the world and every collaborator that drives it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CellCoord, Orientation, RobotId};

/// Stable, machine-checkable identifier attached to every [`WorldError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A coordinate pair fell outside the grid.
    InvalidPosition,
    /// An orientation token did not match any known alias.
    UnknownOrientation,
    /// An object name is absent from the known-entity catalog.
    UnknownObject,
    /// A robot movement was blocked by a wall, obstacle or the grid border.
    HitWall,
    /// A token was requested where none exists.
    MissingObject,
    /// No robot is registered under the provided identifier.
    UnknownRobot,
    /// Every robot identifier has been allocated.
    RobotLimit,
}

impl ErrorKind {
    /// Snake-case code that collaborators may branch on.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidPosition => "invalid_position",
            Self::UnknownOrientation => "unknown_orientation",
            Self::UnknownObject => "unknown_object",
            Self::HitWall => "hit_wall",
            Self::MissingObject => "missing_object",
            Self::UnknownRobot => "unknown_robot",
            Self::RobotLimit => "robot_limit",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// What stopped a robot from completing a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Blocker {
    /// A regular wall sits on the departure edge.
    Wall,
    /// The destination lies outside the grid.
    Boundary,
    /// The destination cell holds a solid obstacle.
    Obstacle,
}

/// Side of a token transfer that ran dry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenShortage {
    /// The robot carries no token to put down.
    Carried,
    /// The robot's cell holds no token to pick up.
    Cell,
}

impl fmt::Display for TokenShortage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Carried => f.write_str("I don't have any token to put down!"),
            Self::Cell => f.write_str("No token found here!"),
        }
    }
}

/// Failures reported by world mutations and queries.
///
/// The display string is the user-facing message. [`WorldError::shout`]
/// returns the same text for adapters that render it verbatim, while
/// [`WorldError::kind`] exposes a stable code for programmatic branching.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum WorldError {
    /// The provided coordinates do not name a cell inside the grid.
    #[error("({x}, {y}) is an invalid position.")]
    InvalidPosition {
        /// Column requested by the caller.
        x: i32,
        /// Row requested by the caller.
        y: i32,
    },
    /// The provided orientation token is not recognised.
    #[error("'{token}' is an unknown orientation.")]
    UnknownOrientation {
        /// Token exactly as supplied by the caller.
        token: String,
    },
    /// The object name is not part of the known-entity catalog.
    #[error("Unknown object")]
    UnknownObject {
        /// Name that failed the catalog lookup.
        name: String,
    },
    /// A robot could not leave its cell in the requested direction.
    #[error("Ouch! I hit a wall!")]
    HitWall {
        /// Cell the robot attempted to leave.
        cell: CellCoord,
        /// Direction of the attempted move.
        orientation: Orientation,
        /// What blocked the move.
        blocker: Blocker,
    },
    /// A token transfer found nothing to transfer.
    #[error("{shortage}")]
    MissingObject {
        /// Cell the robot occupied during the transfer.
        cell: CellCoord,
        /// Which side of the transfer was empty.
        shortage: TokenShortage,
    },
    /// No robot is registered under the identifier.
    #[error("No robot named {0} exists.")]
    UnknownRobot(RobotId),
    /// The identifier space is exhausted until the world is reset.
    #[error("No more robots can be added.")]
    RobotLimit,
}

impl WorldError {
    /// Stable kind identifier for the failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPosition { .. } => ErrorKind::InvalidPosition,
            Self::UnknownOrientation { .. } => ErrorKind::UnknownOrientation,
            Self::UnknownObject { .. } => ErrorKind::UnknownObject,
            Self::HitWall { .. } => ErrorKind::HitWall,
            Self::MissingObject { .. } => ErrorKind::MissingObject,
            Self::UnknownRobot(_) => ErrorKind::UnknownRobot,
            Self::RobotLimit => ErrorKind::RobotLimit,
        }
    }

    /// Human-readable description of the failure.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// User-facing text rendered by adapters; always equal to [`Self::message`].
    #[must_use]
    pub fn shout(&self) -> String {
        self.message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_position_reports_literal_pair() {
        let error = WorldError::InvalidPosition { x: 0, y: -3 };
        assert_eq!(error.message(), "(0, -3) is an invalid position.");
        assert_eq!(error.shout(), error.message());
        assert_eq!(error.kind(), ErrorKind::InvalidPosition);
    }

    #[test]
    fn unknown_orientation_quotes_token_verbatim() {
        let error = WorldError::UnknownOrientation {
            token: "N".to_owned(),
        };
        assert_eq!(error.shout(), "'N' is an unknown orientation.");
        assert_eq!(error.kind().code(), "unknown_orientation");
    }

    #[test]
    fn missing_object_message_depends_on_shortage() {
        let cell = CellCoord::new(2, 2);
        let carried = WorldError::MissingObject {
            cell,
            shortage: TokenShortage::Carried,
        };
        let on_cell = WorldError::MissingObject {
            cell,
            shortage: TokenShortage::Cell,
        };
        assert_eq!(carried.message(), "I don't have any token to put down!");
        assert_eq!(on_cell.message(), "No token found here!");
    }

    #[test]
    fn unknown_robot_names_the_robot() {
        let error = WorldError::UnknownRobot(RobotId::new(4));
        assert_eq!(error.message(), "No robot named robot4 exists.");
    }

    #[test]
    fn robot_limit_has_its_own_code() {
        let error = WorldError::RobotLimit;
        assert_eq!(error.shout(), "No more robots can be added.");
        assert_eq!(error.kind().code(), "robot_limit");
    }
}

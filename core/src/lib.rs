#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gridbot workspace.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point and reports [`Event`] values describing what changed.
//! Every failure is expressed as a [`WorldError`] carrying a stable
//! [`ErrorKind`].

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use serde::{Deserialize, Serialize};

mod error;

pub use error::{Blocker, ErrorKind, TokenShortage, WorldError};

/// Number of columns in a default world.
pub const DEFAULT_COLUMNS: u32 = 14;

/// Number of rows in a default world.
pub const DEFAULT_ROWS: u32 = 12;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Places a wall on one side of a cell.
    AddWall {
        /// Orientation token naming the side of the cell.
        orientation: String,
        /// Column of the cell.
        x: i32,
        /// Row of the cell.
        y: i32,
        /// Targets the goal-wall class instead of regular walls.
        goal: bool,
    },
    /// Removes a wall from one side of a cell.
    RemoveWall {
        /// Orientation token naming the side of the cell.
        orientation: String,
        /// Column of the cell.
        x: i32,
        /// Row of the cell.
        y: i32,
        /// Targets the goal-wall class instead of regular walls.
        goal: bool,
    },
    /// Adds the wall when absent, removes it when present.
    ToggleWall {
        /// Orientation token naming the side of the cell.
        orientation: String,
        /// Column of the cell.
        x: i32,
        /// Row of the cell.
        y: i32,
        /// Targets the goal-wall class instead of regular walls.
        goal: bool,
    },
    /// Places the named object when absent at the cell, removes it when present.
    ToggleObstacle {
        /// Catalog name of the object.
        name: String,
        /// Column of the cell.
        x: i32,
        /// Row of the cell.
        y: i32,
    },
    /// Replaces the token pile lying on a cell.
    SetTokens {
        /// Column of the cell.
        x: i32,
        /// Row of the cell.
        y: i32,
        /// Number of tokens the cell holds afterwards.
        count: u32,
    },
    /// Registers a new robot.
    AddRobot(RobotSpec),
    /// Rotates a robot a quarter turn counter-clockwise.
    TurnLeft {
        /// Robot to rotate.
        robot: RobotId,
    },
    /// Advances a robot one cell in the direction it faces.
    Move {
        /// Robot to move.
        robot: RobotId,
    },
    /// Drops one carried token on the robot's cell.
    PutToken {
        /// Robot dropping the token.
        robot: RobotId,
    },
    /// Picks one token up from the robot's cell.
    TakeToken {
        /// Robot picking the token up.
        robot: RobotId,
    },
    /// Clears robots, walls, obstacles and tokens.
    Reset,
    /// Acknowledges that the latest world state has been drawn.
    Update,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A wall was added to the world.
    WallAdded {
        /// Cell the wall was requested on.
        cell: CellCoord,
        /// Side of the cell the wall occupies.
        orientation: Orientation,
        /// Indicates whether the wall belongs to the goal class.
        goal: bool,
    },
    /// A wall was removed from the world.
    WallRemoved {
        /// Cell the removal was requested on.
        cell: CellCoord,
        /// Side of the cell the wall occupied.
        orientation: Orientation,
        /// Indicates whether the wall belonged to the goal class.
        goal: bool,
    },
    /// An object was placed on a cell.
    ObstaclePlaced {
        /// Catalog name of the object.
        name: String,
        /// Cell now holding the object.
        cell: CellCoord,
    },
    /// An object was removed from a cell.
    ObstacleRemoved {
        /// Catalog name of the object.
        name: String,
        /// Cell that held the object.
        cell: CellCoord,
    },
    /// Advisory diagnostic: the translation table has no entry for the name.
    TranslationNeeded {
        /// Name lacking a display entry.
        name: String,
    },
    /// The token pile on a cell changed through an authoring command.
    TokensSet {
        /// Cell whose pile changed.
        cell: CellCoord,
        /// Tokens on the cell afterwards.
        count: u32,
    },
    /// A robot joined the world.
    RobotAdded {
        /// Identifier allocated to the robot.
        robot: RobotId,
        /// Cell the robot starts on.
        cell: CellCoord,
        /// Direction the robot initially faces.
        orientation: Orientation,
    },
    /// A robot changed orientation.
    RobotTurned {
        /// Robot that turned.
        robot: RobotId,
        /// Direction the robot faces afterwards.
        orientation: Orientation,
    },
    /// A robot moved between two adjacent cells.
    RobotMoved {
        /// Robot that moved.
        robot: RobotId,
        /// Cell the robot left.
        from: CellCoord,
        /// Cell the robot entered.
        to: CellCoord,
    },
    /// A robot dropped a token on its cell.
    TokenPut {
        /// Robot that dropped the token.
        robot: RobotId,
        /// Cell receiving the token.
        cell: CellCoord,
    },
    /// A robot picked a token up from its cell.
    TokenTaken {
        /// Robot that picked the token up.
        robot: RobotId,
        /// Cell the token came from.
        cell: CellCoord,
    },
    /// The world returned to its empty state.
    WorldReset,
}

/// Cardinal directions in their cyclic order.
///
/// Turning left advances through `East → North → West → South → East`;
/// turning right walks the cycle backwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Toward increasing `x`.
    East,
    /// Toward increasing `y`.
    North,
    /// Toward decreasing `x`.
    West,
    /// Toward decreasing `y`.
    South,
}

const WALL_ALIASES: [(&str, Orientation); 8] = [
    ("east", Orientation::East),
    ("est", Orientation::East),
    ("north", Orientation::North),
    ("nord", Orientation::North),
    ("west", Orientation::West),
    ("ouest", Orientation::West),
    ("south", Orientation::South),
    ("sud", Orientation::South),
];

const ROBOT_SHORTHANDS: [(&str, Orientation); 5] = [
    ("e", Orientation::East),
    ("n", Orientation::North),
    ("w", Orientation::West),
    ("o", Orientation::West),
    ("s", Orientation::South),
];

impl Orientation {
    /// All orientations in canonical listing order.
    pub const ALL: [Self; 4] = [Self::East, Self::North, Self::West, Self::South];

    /// Position of the orientation within the cycle.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::East => 0,
            Self::North => 1,
            Self::West => 2,
            Self::South => 3,
        }
    }

    /// Orientation at the provided position of the cycle, wrapping modulo four.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Self::East,
            1 => Self::North,
            2 => Self::West,
            _ => Self::South,
        }
    }

    /// Orientation after a quarter turn counter-clockwise.
    #[must_use]
    pub const fn turned_left(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Orientation after a quarter turn clockwise.
    #[must_use]
    pub const fn turned_right(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Orientation facing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Unit step `(dx, dy)` taken when moving in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::North => (0, 1),
            Self::West => (-1, 0),
            Self::South => (0, -1),
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::East => "east",
            Self::North => "north",
            Self::West => "west",
            Self::South => "south",
        }
    }

    /// Parses a wall-side token.
    ///
    /// Accepts the full English and French direction names, ignoring case.
    /// Single-letter shorthands are rejected.
    pub fn from_wall_token(token: &str) -> Result<Self, WorldError> {
        lookup(&WALL_ALIASES, token).ok_or_else(|| unknown_orientation(token))
    }

    /// Parses a robot heading token.
    ///
    /// Accepts everything [`Self::from_wall_token`] does plus the
    /// single-letter shorthands `e`, `n`, `w`, `o` and `s`.
    pub fn from_robot_token(token: &str) -> Result<Self, WorldError> {
        lookup(&WALL_ALIASES, token)
            .or_else(|| lookup(&ROBOT_SHORTHANDS, token))
            .ok_or_else(|| unknown_orientation(token))
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn lookup(table: &[(&str, Orientation)], token: &str) -> Option<Orientation> {
    let lowered = token.to_lowercase();
    table
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, orientation)| *orientation)
}

fn unknown_orientation(token: &str) -> WorldError {
    WorldError::UnknownOrientation {
        token: token.to_owned(),
    }
}

/// Location of a single grid cell. Both coordinates start at one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// One-based column of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// One-based row of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Extent of the grid. A `None` limit leaves that axis unbounded.
///
/// A limit omitted from a config file takes its default size, so only
/// [`GridBounds::unbounded`] produces an unlimited axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    #[serde(default = "default_columns")]
    columns: Option<u32>,
    #[serde(default = "default_rows")]
    rows: Option<u32>,
}

fn default_columns() -> Option<u32> {
    Some(DEFAULT_COLUMNS)
}

fn default_rows() -> Option<u32> {
    Some(DEFAULT_ROWS)
}

impl GridBounds {
    /// Creates bounds limited to the provided number of columns and rows.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns: Some(columns),
            rows: Some(rows),
        }
    }

    /// Creates bounds without upper limits.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            columns: None,
            rows: None,
        }
    }

    /// Largest valid column, if limited.
    #[must_use]
    pub const fn columns(&self) -> Option<u32> {
        self.columns
    }

    /// Largest valid row, if limited.
    #[must_use]
    pub const fn rows(&self) -> Option<u32> {
        self.rows
    }

    /// Validates a raw coordinate pair, producing the cell it names.
    ///
    /// Fails with [`WorldError::InvalidPosition`] carrying the literal pair
    /// when either coordinate is below one or beyond the configured limit.
    pub fn validate(&self, x: i32, y: i32) -> Result<CellCoord, WorldError> {
        match (within(x, self.columns), within(y, self.rows)) {
            (Some(column), Some(row)) => Ok(CellCoord::new(column, row)),
            _ => Err(WorldError::InvalidPosition { x, y }),
        }
    }

    /// Adjacent cell in the given direction, or `None` when it leaves the grid.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, orientation: Orientation) -> Option<CellCoord> {
        let (dx, dy) = orientation.delta();
        let x = i32::try_from(i64::from(cell.x()) + i64::from(dx)).ok()?;
        let y = i32::try_from(i64::from(cell.y()) + i64::from(dy)).ok()?;
        self.validate(x, y).ok()
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS, DEFAULT_ROWS)
    }
}

fn within(value: i32, limit: Option<u32>) -> Option<u32> {
    let value = u32::try_from(value).ok().filter(|value| *value >= 1)?;
    match limit {
        Some(limit) if value > limit => None,
        _ => Some(value),
    }
}

/// Unique identifier assigned to a robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RobotId(u32);

impl RobotId {
    /// Creates a new robot identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "robot{}", self.0)
    }
}

/// Construction parameters for a robot. Unset fields take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotSpec {
    /// Starting coordinates; `(1, 1)` when unset.
    #[serde(default)]
    pub position: Option<(i32, i32)>,
    /// Heading token; east when unset.
    #[serde(default)]
    pub orientation: Option<String>,
    /// Tokens carried at construction.
    #[serde(default)]
    pub tokens: u32,
}

impl RobotSpec {
    /// Creates a spec with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the starting coordinates.
    #[must_use]
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Some((x, y));
        self
    }

    /// Sets the heading token.
    #[must_use]
    pub fn facing(mut self, orientation: impl Into<String>) -> Self {
        self.orientation = Some(orientation.into());
        self
    }

    /// Sets the number of carried tokens.
    #[must_use]
    pub fn carrying(mut self, tokens: u32) -> Self {
        self.tokens = tokens;
        self
    }
}

/// Metadata attached to a catalog object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSpec {
    /// Robots cannot enter a cell holding a solid object.
    #[serde(default)]
    pub solid: bool,
}

/// Known-entity catalog naming every object that may be placed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectCatalog {
    objects: BTreeMap<String, ObjectSpec>,
}

impl ObjectCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the catalog extended with the provided object.
    #[must_use]
    pub fn with_object(mut self, name: impl Into<String>, spec: ObjectSpec) -> Self {
        self.insert(name, spec);
        self
    }

    /// Adds or replaces an object definition.
    pub fn insert(&mut self, name: impl Into<String>, spec: ObjectSpec) {
        let _ = self.objects.insert(name.into(), spec);
    }

    /// Metadata for the named object, if it is known.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ObjectSpec> {
        self.objects.get(name)
    }

    /// Known names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }
}

/// Display table mapping object names to their localized labels.
///
/// Names listed as untranslated are deliberately shown as-is and never
/// trigger a missing-translation diagnostic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationTable {
    #[serde(default)]
    entries: BTreeMap<String, String>,
    #[serde(default)]
    untranslated: BTreeSet<String>,
}

impl TranslationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table extended with a display entry.
    #[must_use]
    pub fn with_entry(mut self, name: impl Into<String>, display: impl Into<String>) -> Self {
        let _ = self.entries.insert(name.into(), display.into());
        self
    }

    /// Returns the table with the name marked as intentionally untranslated.
    #[must_use]
    pub fn with_untranslated(mut self, name: impl Into<String>) -> Self {
        let _ = self.untranslated.insert(name.into());
        self
    }

    /// Label shown for the name.
    #[must_use]
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries.get(name).map_or(name, String::as_str)
    }

    /// Reports whether the table lacks any entry for the name.
    #[must_use]
    pub fn needs_translation(&self, name: &str) -> bool {
        !self.entries.contains_key(name) && !self.untranslated.contains(name)
    }
}

/// Configuration supplied when a world is created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Grid extent.
    #[serde(default)]
    pub bounds: GridBounds,
    /// Objects that may be placed.
    #[serde(default)]
    pub objects: ObjectCatalog,
    /// Display labels for object names.
    #[serde(default)]
    pub translations: TranslationTable,
}

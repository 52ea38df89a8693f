#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Gridbot.
//!
//! The [`World`] owns the grid bounds, both wall classes, object placements,
//! token piles and robots. All mutations go through [`apply`], which validates
//! a command completely before touching any state, so a failed command leaves
//! the world exactly as it found it. Read access lives in [`query`].

mod obstacles;
mod robots;
mod tokens;
mod walls;

use gridbot_core::{
    Blocker, CellCoord, Command, Event, GridBounds, ObjectCatalog, Orientation, RobotId,
    RobotSpec, TokenShortage, TranslationTable, WorldConfig, WorldError,
};
use tracing::{debug, warn};

use crate::{
    obstacles::{ObstacleRegistry, Toggle},
    robots::RobotRegistry,
    tokens::TokenPiles,
    walls::WallRegistry,
};

/// Represents the authoritative Gridbot world state.
#[derive(Debug)]
pub struct World {
    bounds: GridBounds,
    catalog: ObjectCatalog,
    translations: TranslationTable,
    walls: WallRegistry,
    obstacles: ObstacleRegistry,
    tokens: TokenPiles,
    robots: RobotRegistry,
    needs_update: bool,
}

impl World {
    /// Creates an empty world of default size with an empty object catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates an empty world using the provided bounds, catalog and translations.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            bounds: config.bounds,
            catalog: config.objects,
            translations: config.translations,
            walls: WallRegistry::new(),
            obstacles: ObstacleRegistry::new(),
            tokens: TokenPiles::new(),
            robots: RobotRegistry::new(),
            needs_update: true,
        }
    }

    fn wall_target(
        &self,
        orientation: &str,
        x: i32,
        y: i32,
    ) -> Result<(CellCoord, Orientation), WorldError> {
        let cell = self.bounds.validate(x, y)?;
        let side = Orientation::from_wall_token(orientation)?;
        Ok((cell, side))
    }

    fn add_wall(
        &mut self,
        orientation: &str,
        x: i32,
        y: i32,
        goal: bool,
        out_events: &mut Vec<Event>,
    ) -> Result<(), WorldError> {
        let (cell, side) = self.wall_target(orientation, x, y)?;
        if self.walls.insert(cell, side, goal) {
            self.needs_update = true;
            out_events.push(Event::WallAdded {
                cell,
                orientation: side,
                goal,
            });
        }
        Ok(())
    }

    fn remove_wall(
        &mut self,
        orientation: &str,
        x: i32,
        y: i32,
        goal: bool,
        out_events: &mut Vec<Event>,
    ) -> Result<(), WorldError> {
        let (cell, side) = self.wall_target(orientation, x, y)?;
        if self.walls.remove(cell, side, goal) {
            self.needs_update = true;
            out_events.push(Event::WallRemoved {
                cell,
                orientation: side,
                goal,
            });
        }
        Ok(())
    }

    fn toggle_wall(
        &mut self,
        orientation: &str,
        x: i32,
        y: i32,
        goal: bool,
        out_events: &mut Vec<Event>,
    ) -> Result<(), WorldError> {
        let (cell, side) = self.wall_target(orientation, x, y)?;
        if self.walls.contains(cell, side, goal) {
            self.remove_wall(orientation, x, y, goal, out_events)
        } else {
            self.add_wall(orientation, x, y, goal, out_events)
        }
    }

    fn toggle_obstacle(
        &mut self,
        name: String,
        x: i32,
        y: i32,
        out_events: &mut Vec<Event>,
    ) -> Result<(), WorldError> {
        let cell = self.bounds.validate(x, y)?;
        if self.translations.needs_translation(&name) {
            warn!(object = %name, "Translation needed for {name}");
            out_events.push(Event::TranslationNeeded { name: name.clone() });
        }
        let Some(spec) = self.catalog.get(&name).copied() else {
            return Err(WorldError::UnknownObject { name });
        };

        self.needs_update = true;
        match self.obstacles.toggle(&name, cell, spec) {
            Toggle::Placed => out_events.push(Event::ObstaclePlaced { name, cell }),
            Toggle::Removed => out_events.push(Event::ObstacleRemoved { name, cell }),
        }
        Ok(())
    }

    fn set_tokens(
        &mut self,
        x: i32,
        y: i32,
        count: u32,
        out_events: &mut Vec<Event>,
    ) -> Result<(), WorldError> {
        let cell = self.bounds.validate(x, y)?;
        if self.tokens.set(cell, count) {
            self.needs_update = true;
            out_events.push(Event::TokensSet { cell, count });
        }
        Ok(())
    }

    fn add_robot(
        &mut self,
        spec: &RobotSpec,
        out_events: &mut Vec<Event>,
    ) -> Result<(), WorldError> {
        let robot = self.robots.register(spec, &self.bounds)?;
        debug!(
            robot = %robot.id,
            cell = %robot.cell,
            orientation = %robot.orientation,
            "robot added"
        );
        out_events.push(Event::RobotAdded {
            robot: robot.id,
            cell: robot.cell,
            orientation: robot.orientation,
        });
        self.needs_update = true;
        Ok(())
    }

    fn turn_left(&mut self, id: RobotId, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
        let robot = self.robots.get_mut(id)?;
        robot.turn_left();
        out_events.push(Event::RobotTurned {
            robot: id,
            orientation: robot.orientation,
        });
        self.needs_update = true;
        Ok(())
    }

    fn move_robot(&mut self, id: RobotId, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
        let robot = self.robots.get(id)?;
        let from = robot.cell;
        let orientation = robot.orientation;
        let blocked = |blocker: Blocker| WorldError::HitWall {
            cell: from,
            orientation,
            blocker,
        };

        if self.walls.contains(from, orientation, false) {
            return Err(blocked(Blocker::Wall));
        }
        let to = self
            .bounds
            .neighbor(from, orientation)
            .ok_or_else(|| blocked(Blocker::Boundary))?;
        if self.obstacles.blocks(to) {
            return Err(blocked(Blocker::Obstacle));
        }

        self.robots.get_mut(id)?.advance(to);
        debug!(robot = %id, %from, %to, "robot moved");
        out_events.push(Event::RobotMoved {
            robot: id,
            from,
            to,
        });
        self.needs_update = true;
        Ok(())
    }

    fn put_token(&mut self, id: RobotId, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
        let robot = self.robots.get_mut(id)?;
        let cell = robot.cell;
        if robot.tokens == 0 {
            return Err(WorldError::MissingObject {
                cell,
                shortage: TokenShortage::Carried,
            });
        }
        robot.tokens -= 1;
        self.tokens.drop_one(cell);
        out_events.push(Event::TokenPut { robot: id, cell });
        self.needs_update = true;
        Ok(())
    }

    fn take_token(&mut self, id: RobotId, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
        let robot = self.robots.get_mut(id)?;
        let cell = robot.cell;
        if !self.tokens.take_one(cell) {
            return Err(WorldError::MissingObject {
                cell,
                shortage: TokenShortage::Cell,
            });
        }
        robot.tokens = robot.tokens.saturating_add(1);
        out_events.push(Event::TokenTaken { robot: id, cell });
        self.needs_update = true;
        Ok(())
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        self.robots.clear();
        self.walls.clear();
        self.obstacles.clear();
        self.tokens.clear();
        self.needs_update = true;
        debug!("world reset");
        out_events.push(Event::WorldReset);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world.
///
/// Commands are validated in full before any state changes; on error the
/// world is untouched. Advisory events such as
/// [`Event::TranslationNeeded`] may still be pushed ahead of a failure.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), WorldError> {
    match command {
        Command::AddWall {
            orientation,
            x,
            y,
            goal,
        } => world.add_wall(&orientation, x, y, goal, out_events),
        Command::RemoveWall {
            orientation,
            x,
            y,
            goal,
        } => world.remove_wall(&orientation, x, y, goal, out_events),
        Command::ToggleWall {
            orientation,
            x,
            y,
            goal,
        } => world.toggle_wall(&orientation, x, y, goal, out_events),
        Command::ToggleObstacle { name, x, y } => world.toggle_obstacle(name, x, y, out_events),
        Command::SetTokens { x, y, count } => world.set_tokens(x, y, count, out_events),
        Command::AddRobot(spec) => world.add_robot(&spec, out_events),
        Command::TurnLeft { robot } => world.turn_left(robot, out_events),
        Command::Move { robot } => world.move_robot(robot, out_events),
        Command::PutToken { robot } => world.put_token(robot, out_events),
        Command::TakeToken { robot } => world.take_token(robot, out_events),
        Command::Reset => {
            world.reset(out_events);
            Ok(())
        }
        Command::Update => {
            world.needs_update = false;
            Ok(())
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use gridbot_core::{
        CellCoord, GridBounds, ObjectCatalog, Orientation, RobotId, TranslationTable, WorldError,
    };

    use super::World;

    /// Grid extent the world validates coordinates against.
    #[must_use]
    pub fn bounds(world: &World) -> GridBounds {
        world.bounds
    }

    /// Objects that may be placed in the world.
    #[must_use]
    pub fn catalog(world: &World) -> &ObjectCatalog {
        &world.catalog
    }

    /// Display labels for object names.
    #[must_use]
    pub fn translations(world: &World) -> &TranslationTable {
        &world.translations
    }

    /// Reports whether the world changed since the last [`gridbot_core::Command::Update`].
    #[must_use]
    pub fn needs_update(world: &World) -> bool {
        world.needs_update
    }

    /// Reports whether a wall sits on the given side of the cell.
    ///
    /// The answer describes the edge, so a wall added on the east side of
    /// `(x, y)` is also reported on the west side of `(x + 1, y)`.
    pub fn is_wall_at_position(
        world: &World,
        orientation: &str,
        x: i32,
        y: i32,
        goal: bool,
    ) -> Result<bool, WorldError> {
        let (cell, side) = world.wall_target(orientation, x, y)?;
        Ok(world.walls.contains(cell, side, goal))
    }

    /// Walled sides of the cell, always in `[east, north, west, south]` order.
    pub fn list_walls_at_position(
        world: &World,
        x: i32,
        y: i32,
        goal: bool,
    ) -> Result<Vec<Orientation>, WorldError> {
        let cell = world.bounds.validate(x, y)?;
        Ok(world.walls.sides(cell, goal))
    }

    /// Every wall of the class, each edge listed once in canonical form.
    ///
    /// Interior edges appear as the east or north side of their lower-left
    /// cell; border edges keep the side they were added on.
    #[must_use]
    pub fn walls(world: &World, goal: bool) -> Vec<(CellCoord, Orientation)> {
        world.walls.edges(goal).collect()
    }

    /// Names of the objects placed at the cell, sorted.
    pub fn obstacles_at_position(world: &World, x: i32, y: i32) -> Result<Vec<&str>, WorldError> {
        let cell = world.bounds.validate(x, y)?;
        Ok(world.obstacles.names_at(cell))
    }

    /// Cells that hold at least one object.
    #[must_use]
    pub fn obstacle_cells(world: &World) -> Vec<CellCoord> {
        world.obstacles.cells().collect()
    }

    /// Number of tokens lying on the cell.
    pub fn tokens_at_position(world: &World, x: i32, y: i32) -> Result<u32, WorldError> {
        let cell = world.bounds.validate(x, y)?;
        Ok(world.tokens.count(cell))
    }

    /// Number of tokens lying on an already validated cell.
    #[must_use]
    pub fn tokens_at_cell(world: &World, cell: CellCoord) -> u32 {
        world.tokens.count(cell)
    }

    /// Captures the state of a single robot.
    pub fn robot(world: &World, id: RobotId) -> Result<RobotSnapshot, WorldError> {
        world.robots.get(id).map(snapshot)
    }

    /// Captures a read-only view of every robot in identifier order.
    #[must_use]
    pub fn robot_view(world: &World) -> RobotView {
        RobotView {
            snapshots: world.robots.iter().map(snapshot).collect(),
        }
    }

    fn snapshot(robot: &super::robots::Robot) -> RobotSnapshot {
        RobotSnapshot {
            id: robot.id,
            cell: robot.cell,
            orientation: robot.orientation,
            tokens: robot.tokens,
        }
    }

    /// Read-only snapshot describing all robots in the world.
    #[derive(Clone, Debug, Default)]
    pub struct RobotView {
        snapshots: Vec<RobotSnapshot>,
    }

    impl RobotView {
        /// Iterator over the captured robot snapshots in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &RobotSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<RobotSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single robot's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RobotSnapshot {
        /// Identifier allocated to the robot.
        pub id: RobotId,
        /// Cell the robot occupies.
        pub cell: CellCoord,
        /// Direction the robot faces.
        pub orientation: Orientation,
        /// Tokens the robot carries.
        pub tokens: u32,
    }
}

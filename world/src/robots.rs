//! Robot state and the registry that allocates robot identifiers.

use std::collections::BTreeMap;

use gridbot_core::{CellCoord, GridBounds, Orientation, RobotId, RobotSpec, WorldError};

/// Position, heading and cargo of a single robot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Robot {
    pub(crate) id: RobotId,
    pub(crate) cell: CellCoord,
    pub(crate) orientation: Orientation,
    pub(crate) tokens: u32,
}

impl Robot {
    /// Validates the spec against the bounds without registering anything.
    fn from_spec(id: RobotId, spec: &RobotSpec, bounds: &GridBounds) -> Result<Self, WorldError> {
        let (x, y) = spec.position.unwrap_or((1, 1));
        let cell = bounds.validate(x, y)?;
        let orientation = match spec.orientation.as_deref() {
            Some(token) => Orientation::from_robot_token(token)?,
            None => Orientation::East,
        };
        Ok(Self {
            id,
            cell,
            orientation,
            tokens: spec.tokens,
        })
    }

    pub(crate) fn turn_left(&mut self) {
        self.orientation = self.orientation.turned_left();
    }

    pub(crate) fn advance(&mut self, destination: CellCoord) {
        self.cell = destination;
    }
}

/// Registry that stores robots and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct RobotRegistry {
    entries: BTreeMap<RobotId, Robot>,
    next_robot_id: RobotId,
}

impl RobotRegistry {
    /// Creates an empty registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_robot_id: RobotId::new(0),
        }
    }

    /// Builds and stores a robot, allocating the next identifier on success.
    ///
    /// The last representable identifier is never handed out, so an
    /// allocated identifier always names exactly one robot.
    pub(crate) fn register(
        &mut self,
        spec: &RobotSpec,
        bounds: &GridBounds,
    ) -> Result<&Robot, WorldError> {
        let id = self.next_robot_id;
        let next = id.get().checked_add(1).ok_or(WorldError::RobotLimit)?;
        let robot = Robot::from_spec(id, spec, bounds)?;
        self.next_robot_id = RobotId::new(next);
        Ok(self.entries.entry(id).or_insert(robot))
    }

    pub(crate) fn get(&self, id: RobotId) -> Result<&Robot, WorldError> {
        self.entries.get(&id).ok_or(WorldError::UnknownRobot(id))
    }

    pub(crate) fn get_mut(&mut self, id: RobotId) -> Result<&mut Robot, WorldError> {
        self.entries
            .get_mut(&id)
            .ok_or(WorldError::UnknownRobot(id))
    }

    /// Robots in identifier order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Robot> {
        self.entries.values()
    }

    /// Drops every robot and restarts identifier allocation.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.next_robot_id = RobotId::new(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridbot_core::ErrorKind;

    #[test]
    fn defaults_place_robot_at_origin_facing_east() {
        let mut registry = RobotRegistry::new();
        let robot = registry
            .register(&RobotSpec::new(), &GridBounds::default())
            .expect("default robot");
        assert_eq!(robot.id, RobotId::new(0));
        assert_eq!(robot.cell, CellCoord::new(1, 1));
        assert_eq!(robot.orientation, Orientation::East);
        assert_eq!(robot.tokens, 0);
    }

    #[test]
    fn identifiers_increase_and_restart_after_clear() {
        let mut registry = RobotRegistry::new();
        let bounds = GridBounds::default();
        let first = registry.register(&RobotSpec::new(), &bounds).map(|r| r.id);
        let second = registry.register(&RobotSpec::new(), &bounds).map(|r| r.id);
        assert_eq!(first, Ok(RobotId::new(0)));
        assert_eq!(second, Ok(RobotId::new(1)));

        registry.clear();
        assert_eq!(registry.iter().count(), 0);
        let restarted = registry.register(&RobotSpec::new(), &bounds).map(|r| r.id);
        assert_eq!(restarted, Ok(RobotId::new(0)));
    }

    #[test]
    fn rejected_spec_does_not_consume_an_identifier() {
        let mut registry = RobotRegistry::new();
        let bounds = GridBounds::default();
        let error = registry
            .register(&RobotSpec::new().facing("up"), &bounds)
            .expect_err("unknown heading");
        assert_eq!(error.kind(), ErrorKind::UnknownOrientation);
        let error = registry
            .register(&RobotSpec::new().at(0, 4), &bounds)
            .expect_err("invalid position");
        assert_eq!(error.message(), "(0, 4) is an invalid position.");

        let robot = registry
            .register(&RobotSpec::new().at(2, 2).facing("nord").carrying(3), &bounds)
            .expect("valid robot");
        assert_eq!(robot.id, RobotId::new(0));
        assert_eq!(robot.orientation, Orientation::North);
        assert_eq!(robot.tokens, 3);
    }

    #[test]
    fn exhausted_identifiers_are_reported_without_replacing_robots() {
        let mut registry = RobotRegistry::new();
        let bounds = GridBounds::default();
        registry.next_robot_id = RobotId::new(u32::MAX - 1);
        let last = registry
            .register(&RobotSpec::new().at(2, 2), &bounds)
            .map(|robot| robot.id);
        assert_eq!(last, Ok(RobotId::new(u32::MAX - 1)));

        let error = registry
            .register(&RobotSpec::new().at(5, 5), &bounds)
            .expect_err("identifiers exhausted");
        assert_eq!(error, WorldError::RobotLimit);
        assert_eq!(error.kind(), ErrorKind::RobotLimit);
        assert_eq!(registry.iter().count(), 1);
        let kept = registry.get(RobotId::new(u32::MAX - 1)).expect("kept");
        assert_eq!(kept.cell, CellCoord::new(2, 2));

        registry.clear();
        let restarted = registry.register(&RobotSpec::new(), &bounds).map(|r| r.id);
        assert_eq!(restarted, Ok(RobotId::new(0)));
    }

    #[test]
    fn turn_left_four_times_restores_heading() {
        let mut registry = RobotRegistry::new();
        let id = registry
            .register(&RobotSpec::new().facing("s"), &GridBounds::default())
            .map(|robot| robot.id)
            .expect("robot");
        let robot = registry.get_mut(id).expect("registered");
        robot.turn_left();
        assert_eq!(robot.orientation, Orientation::East);
        for _ in 0..3 {
            robot.turn_left();
        }
        assert_eq!(robot.orientation, Orientation::South);
    }
}

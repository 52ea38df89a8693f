use gridbot_core::{CellCoord, Command, Event, Orientation, RobotId, RobotSpec, WorldError};
use gridbot_system_goal::{Goal, GoalChecker, GoalFailure, TokenTarget};
use gridbot_world::{apply, World};

fn world_with_robot(spec: RobotSpec) -> (World, RobotId) {
    let mut world = World::new();
    let mut events = Vec::new();
    apply(&mut world, Command::AddRobot(spec), &mut events).expect("robot added");
    let Some(Event::RobotAdded { robot, .. }) = events.first() else {
        panic!("robot event missing: {events:?}");
    };
    let robot = *robot;
    (world, robot)
}

fn wall(orientation: &str, x: i32, y: i32, goal: bool) -> Command {
    Command::AddWall {
        orientation: orientation.to_owned(),
        x,
        y,
        goal,
    }
}

#[test]
fn empty_goal_is_always_met() {
    let (world, robot) = world_with_robot(RobotSpec::new());
    let report = GoalChecker
        .evaluate(&world, robot, &Goal::default())
        .expect("evaluated");
    assert!(report.is_success());
}

#[test]
fn position_and_orientation_mismatches_are_reported() {
    let (world, robot) = world_with_robot(RobotSpec::new().at(2, 2));
    let goal = Goal {
        position: Some(CellCoord::new(3, 2)),
        orientation: Some(Orientation::North),
        ..Goal::default()
    };

    let report = GoalChecker.evaluate(&world, robot, &goal).expect("evaluated");
    assert_eq!(
        report.failures(),
        [
            GoalFailure::Position {
                expected: CellCoord::new(3, 2),
                actual: CellCoord::new(2, 2),
            },
            GoalFailure::Orientation {
                expected: Orientation::North,
                actual: Orientation::East,
            },
        ]
    );
}

#[test]
fn goal_walls_must_be_built_from_either_side() {
    let (mut world, robot) = world_with_robot(RobotSpec::new());
    apply(&mut world, wall("east", 3, 3, true), &mut Vec::new()).expect("goal wall");
    apply(&mut world, wall("north", 5, 5, true), &mut Vec::new()).expect("goal wall");
    let goal = Goal {
        goal_walls: true,
        ..Goal::default()
    };

    let report = GoalChecker.evaluate(&world, robot, &goal).expect("evaluated");
    assert_eq!(report.failures().len(), 2);

    apply(&mut world, wall("west", 4, 3, false), &mut Vec::new()).expect("wall");
    apply(&mut world, wall("south", 5, 6, false), &mut Vec::new()).expect("wall");
    let report = GoalChecker.evaluate(&world, robot, &goal).expect("evaluated");
    assert!(report.is_success());
}

#[test]
fn token_targets_compare_cell_counts() {
    let (mut world, robot) = world_with_robot(RobotSpec::new().carrying(1));
    let goal = Goal {
        tokens: vec![TokenTarget {
            cell: CellCoord::new(1, 1),
            count: 1,
        }],
        ..Goal::default()
    };

    let report = GoalChecker.evaluate(&world, robot, &goal).expect("evaluated");
    assert_eq!(
        report.failures(),
        [GoalFailure::Tokens {
            cell: CellCoord::new(1, 1),
            expected: 1,
            actual: 0,
        }]
    );

    apply(&mut world, Command::PutToken { robot }, &mut Vec::new()).expect("put");
    let report = GoalChecker.evaluate(&world, robot, &goal).expect("evaluated");
    assert!(report.is_success());
}

#[test]
fn unknown_robot_cannot_be_evaluated() {
    let world = World::new();
    let error = GoalChecker
        .evaluate(&world, RobotId::new(0), &Goal::default())
        .expect_err("no robot");
    assert_eq!(error, WorldError::UnknownRobot(RobotId::new(0)));
}

#[test]
fn goal_reads_from_toml() {
    let goal: Goal = toml::from_str(
        r#"
        orientation = "north"
        goal_walls = true
        position = { x = 4, y = 2 }
        tokens = [{ cell = { x = 1, y = 1 }, count = 3 }]
        "#,
    )
    .expect("goal parses");
    assert_eq!(goal.position, Some(CellCoord::new(4, 2)));
    assert_eq!(goal.orientation, Some(Orientation::North));
    assert!(goal.goal_walls);
    assert_eq!(goal.tokens.len(), 1);
}

//! Parsers turning command-line arguments into world commands.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use gridbot_core::{Command, RobotId, RobotSpec};

/// Robot action accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Action {
    /// Advance one cell.
    #[value(alias = "avance")]
    Move,
    /// Quarter turn counter-clockwise.
    #[value(name = "turn_left", alias = "tourne_à_gauche")]
    TurnLeft,
    /// Drop one carried token.
    Put,
    /// Pick one token up.
    Take,
}

impl Action {
    /// World command performing the action for the robot.
    pub(crate) fn command(self, robot: RobotId) -> Command {
        match self {
            Self::Move => Command::Move { robot },
            Self::TurnLeft => Command::TurnLeft { robot },
            Self::Put => Command::PutToken { robot },
            Self::Take => Command::TakeToken { robot },
        }
    }
}

/// Parses `X,Y[,ORIENTATION[,TOKENS]]`.
///
/// The heading is passed through untouched; the world validates it.
pub(crate) fn parse_robot(value: &str) -> Result<RobotSpec> {
    let fields: Vec<&str> = value.split(',').map(str::trim).collect();
    let (x, y, rest) = match fields.as_slice() {
        [x, y, rest @ ..] if rest.len() <= 2 => (*x, *y, rest),
        _ => bail!("robot `{value}` must look like X,Y[,ORIENTATION[,TOKENS]]"),
    };

    let mut spec = RobotSpec::new().at(parse_coordinate(x)?, parse_coordinate(y)?);
    if let Some(orientation) = rest.first() {
        spec = spec.facing(*orientation);
    }
    if let Some(tokens) = rest.get(1) {
        let tokens = tokens
            .parse::<u32>()
            .with_context(|| format!("could not parse token count `{tokens}`"))?;
        spec = spec.carrying(tokens);
    }
    Ok(spec)
}

/// Parses `ORIENTATION:X:Y[:goal]` into a wall placement.
pub(crate) fn parse_wall(value: &str) -> Result<Command> {
    let fields: Vec<&str> = value.split(':').map(str::trim).collect();
    let (orientation, x, y, goal) = match fields.as_slice() {
        [orientation, x, y] => (*orientation, *x, *y, false),
        [orientation, x, y, marker] if marker.eq_ignore_ascii_case("goal") => {
            (*orientation, *x, *y, true)
        }
        _ => bail!("wall `{value}` must look like ORIENTATION:X:Y[:goal]"),
    };

    Ok(Command::AddWall {
        orientation: orientation.to_owned(),
        x: parse_coordinate(x)?,
        y: parse_coordinate(y)?,
        goal,
    })
}

fn parse_coordinate(value: &str) -> Result<i32> {
    value
        .parse::<i32>()
        .with_context(|| format!("could not parse coordinate `{value}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robot_with_position_only() {
        let spec = parse_robot("3,4").expect("robot parses");
        assert_eq!(spec, RobotSpec::new().at(3, 4));
    }

    #[test]
    fn robot_with_heading_and_tokens() {
        let spec = parse_robot("1, 2, nord, 5").expect("robot parses");
        assert_eq!(spec, RobotSpec::new().at(1, 2).facing("nord").carrying(5));
    }

    #[test]
    fn robot_rejects_missing_and_extra_fields() {
        assert!(parse_robot("3").is_err());
        assert!(parse_robot("1,1,east,2,9").is_err());
        assert!(parse_robot("one,1").is_err());
    }

    #[test]
    fn wall_parses_goal_marker() {
        assert_eq!(
            parse_wall("east:3:3").expect("wall parses"),
            Command::AddWall {
                orientation: "east".to_owned(),
                x: 3,
                y: 3,
                goal: false,
            }
        );
        assert_eq!(
            parse_wall("north:2:1:GOAL").expect("goal wall parses"),
            Command::AddWall {
                orientation: "north".to_owned(),
                x: 2,
                y: 1,
                goal: true,
            }
        );
        assert!(parse_wall("north:2").is_err());
        assert!(parse_wall("north:2:1:door").is_err());
    }

    #[test]
    fn actions_map_to_robot_commands() {
        let robot = RobotId::new(0);
        assert_eq!(Action::Move.command(robot), Command::Move { robot });
        assert_eq!(
            Action::from_str("turn_left", true).map(|action| action.command(robot)),
            Ok(Command::TurnLeft { robot })
        );
        assert_eq!(Action::Take.command(robot), Command::TakeToken { robot });
    }

    #[test]
    fn french_action_names_are_accepted() {
        assert_eq!(Action::from_str("avance", false), Ok(Action::Move));
        assert_eq!(
            Action::from_str("tourne_à_gauche", false),
            Ok(Action::TurnLeft)
        );
    }
}

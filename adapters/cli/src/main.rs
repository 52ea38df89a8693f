#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a single robot through a Gridbot world.

mod config;
mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gridbot_core::{Command, Event, RobotId, WorldError};
use gridbot_system_goal::{GoalChecker, GoalFailure};
use gridbot_world::{apply, query, World};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{config::CliConfig, script::Action};

/// Drives a robot across a grid world and reports where it ends up.
#[derive(Debug, Parser)]
#[command(name = "gridbot", version)]
struct Args {
    /// TOML file describing the world bounds, object catalog and goal.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Starting robot as `X,Y[,ORIENTATION[,TOKENS]]`.
    #[arg(long, value_parser = script::parse_robot)]
    robot: Option<gridbot_core::RobotSpec>,
    /// Wall placed before the robot starts, as `ORIENTATION:X:Y[:goal]`.
    #[arg(long = "wall", value_parser = script::parse_wall)]
    walls: Vec<Command>,
    /// Actions performed by the robot, in order.
    #[arg(value_enum)]
    actions: Vec<Action>,
}

/// Entry point for the Gridbot command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();
    let config = match args.config.as_deref() {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    let mut world = World::with_config(config.world);
    let bounds = query::bounds(&world);
    let objects: Vec<&str> = query::catalog(&world).names().collect();
    info!(
        columns = ?bounds.columns(),
        rows = ?bounds.rows(),
        ?objects,
        "world configured"
    );
    let mut events = Vec::new();
    for wall in args.walls {
        apply(&mut world, wall, &mut events).context("failed to place wall")?;
    }
    apply(
        &mut world,
        Command::AddRobot(args.robot.unwrap_or_default()),
        &mut events,
    )
    .context("failed to place robot")?;
    let robot = events
        .iter()
        .find_map(|event| match event {
            Event::RobotAdded { robot, .. } => Some(*robot),
            _ => None,
        })
        .context("world did not report the new robot")?;

    let outcome = run(&mut world, robot, &args.actions, &mut events);
    for event in &events {
        debug!(?event, "world event");
    }
    if let Err(error) = &outcome {
        println!("{}", error.shout());
    }

    let snapshot = query::robot(&world, robot)?;
    println!(
        "{} is at {} facing {} carrying {} token(s).",
        snapshot.id, snapshot.cell, snapshot.orientation, snapshot.tokens
    );

    if let Some(goal) = config.goal {
        let report = GoalChecker.evaluate(&world, robot, &goal)?;
        if report.is_success() {
            println!("Goal reached.");
        }
        for failure in report.failures() {
            println!("Goal not met: {}", describe(failure));
        }
    }

    outcome.with_context(|| format!("{robot} stopped before finishing its actions"))
}

fn run(
    world: &mut World,
    robot: RobotId,
    actions: &[Action],
    events: &mut Vec<Event>,
) -> Result<(), WorldError> {
    for action in actions {
        apply(world, action.command(robot), events)?;
    }
    Ok(())
}

fn describe(failure: &GoalFailure) -> String {
    match failure {
        GoalFailure::Position { expected, actual } => {
            format!("robot should be at {expected} but is at {actual}")
        }
        GoalFailure::Orientation { expected, actual } => {
            format!("robot should face {expected} but faces {actual}")
        }
        GoalFailure::MissingWall { cell, orientation } => {
            format!("wall missing on the {orientation} side of {cell}")
        }
        GoalFailure::Tokens {
            cell,
            expected,
            actual,
        } => format!("{cell} should hold {expected} token(s) but holds {actual}"),
    }
}

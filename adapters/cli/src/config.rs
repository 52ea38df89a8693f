//! TOML configuration consumed by the command-line adapter.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use gridbot_core::WorldConfig;
use gridbot_system_goal::Goal;
use serde::Deserialize;

/// Contents of a `--config` file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub(crate) struct CliConfig {
    /// Bounds, object catalog and translations for the world.
    #[serde(default)]
    pub(crate) world: WorldConfig,
    /// Goal checked after all actions ran.
    #[serde(default)]
    pub(crate) goal: Option<Goal>,
}

impl CliConfig {
    /// Reads and parses the configuration at the provided path.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read world config at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to load world config at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse world config toml contents")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridbot_core::{GridBounds, ObjectSpec, Orientation};

    #[test]
    fn empty_file_yields_default_world() {
        let config = CliConfig::parse("").expect("empty config");
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.world.bounds, GridBounds::default());
    }

    #[test]
    fn world_and_goal_sections_are_read() {
        let config = CliConfig::parse(
            r#"
            [world.bounds]
            columns = 5
            rows = 4

            [world.objects.fence]
            solid = true

            [world.translations.entries]
            fence = "clôture"

            [goal]
            orientation = "west"
            "#,
        )
        .expect("config parses");

        assert_eq!(config.world.bounds, GridBounds::new(5, 4));
        assert_eq!(
            config.world.objects.get("fence"),
            Some(&ObjectSpec { solid: true })
        );
        assert_eq!(
            config.goal.and_then(|goal| goal.orientation),
            Some(Orientation::West)
        );
    }

    #[test]
    fn malformed_file_reports_context() {
        let error = CliConfig::parse("[world.bounds]\ncolumns = \"wide\"").expect_err("invalid");
        assert!(error.to_string().contains("failed to parse world config"));
    }
}

//! Configuration settings for the Life simulation

use crate::game_of_life::patterns::{DEFAULT_DENSITY, DEFAULT_EXTENT};
use crate::game_of_life::Rule;
use crate::simulation::scheduler::{DEFAULT_SPEED_MS, MAX_SPEED_MS, MIN_SPEED_MS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub simulation: SimulationConfig,
    pub seeding: SeedingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Milliseconds between generations while running
    pub speed_ms: u64,
    pub rule: Rule,
    /// Generations applied by the `step` command
    pub generations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedingConfig {
    /// Probability that a random fill makes a cell alive
    pub density: f64,
    /// Side length of the default random-fill square
    pub extent: usize,
    /// Fixed RNG seed for reproducible random fills
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 500,
                height: 500,
            },
            simulation: SimulationConfig {
                speed_ms: DEFAULT_SPEED_MS,
                rule: Rule::Conway,
                generations: 100,
            },
            seeding: SeedingConfig {
                density: DEFAULT_DENSITY,
                extent: DEFAULT_EXTENT,
                seed: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            anyhow::bail!("Grid dimensions must be positive, got {}x{}", self.grid.width, self.grid.height);
        }

        if !(MIN_SPEED_MS..=MAX_SPEED_MS).contains(&self.simulation.speed_ms) {
            anyhow::bail!(
                "Speed must be between {} and {} ms, got {}",
                MIN_SPEED_MS, MAX_SPEED_MS, self.simulation.speed_ms
            );
        }

        if !(0.0..=1.0).contains(&self.seeding.density) {
            anyhow::bail!("Random fill density must be within [0, 1], got {}", self.seeding.density);
        }

        if self.seeding.extent == 0 {
            anyhow::bail!("Random fill extent must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.grid.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.grid.height = height;
        }
        if let Some(speed_ms) = cli_overrides.speed_ms {
            self.simulation.speed_ms = speed_ms;
        }
        if let Some(rule) = cli_overrides.rule {
            self.simulation.rule = rule;
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(seed) = cli_overrides.seed {
            self.seeding.seed = Some(seed);
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub speed_ms: Option<u64>,
    pub rule: Option<Rule>,
    pub generations: Option<usize>,
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.simulation.rule = Rule::S34B3;
        settings.seeding.seed = Some(42);
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);

        let yaml = std::fs::read_to_string(&path).unwrap();
        assert!(yaml.contains("rule: s34b3"));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.grid.width = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.simulation.speed_ms = 5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.seeding.density = 1.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            width: Some(64),
            rule: Some(Rule::S3B3),
            seed: Some(9),
            ..CliOverrides::default()
        });

        assert_eq!(settings.grid.width, 64);
        assert_eq!(settings.grid.height, 500);
        assert_eq!(settings.simulation.rule, Rule::S3B3);
        assert_eq!(settings.seeding.seed, Some(9));
    }
}

//! Run configuration, loaded from TOML.
//!
//! Every section and field has a default that reproduces the stock car
//! simulator, so an empty file (or no file at all) is a valid configuration.
//!
//! ```toml
//! [vehicle]
//! start_x = 860.0
//! start_y = 910.0
//!
//! [vehicle.radar]
//! offsets = [-90.0, -45.0, 0.0, 45.0, 90.0]
//!
//! [episode]
//! max_ticks = 1200
//! wall_clock_secs = 20.0
//!
//! [evolution]
//! population = 30
//! seed = 42
//! ```

use crate::error::{Result, SimError};
use crate::evolution::EvolutionConfig;
use crate::global_variables::DEFAULT_MAX_TICKS;
use crate::simulation_engine::simulation::EpisodeBudget;
use crate::simulation_engine::vehicles::VehicleSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    pub max_ticks: u64,
    pub wall_clock_secs: Option<f64>,
    /// Update vehicles across threads within each tick.
    pub parallel: bool,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            max_ticks: DEFAULT_MAX_TICKS,
            wall_clock_secs: None,
            parallel: false,
        }
    }
}

impl EpisodeConfig {
    pub fn budget(&self) -> EpisodeBudget {
        EpisodeBudget {
            max_ticks: self.max_ticks,
            wall_clock_secs: self.wall_clock_secs,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub vehicle: VehicleSpec,
    pub episode: EpisodeConfig,
    pub evolution: EvolutionConfig,
}

impl SimConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        log::info!("Loaded configuration from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// Loads `path` when it exists, otherwise falls back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            log::warn!(
                "No configuration at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.vehicle.validate()?;
        self.evolution.validate()?;
        if self.episode.max_ticks == 0 {
            return Err(SimError::InvalidConfig(
                "episode needs a tick budget of at least one".to_string(),
            ));
        }
        if let Some(secs) = self.episode.wall_clock_secs {
            if !(secs > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "wall clock budget must be positive, got {}",
                    secs
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = SimConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.vehicle.length, 60.0);
        assert_eq!(config.vehicle.radar.offsets.len(), 5);
        assert_eq!(config.episode.max_ticks, 1200);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = SimConfig::from_toml_str(
            r#"
            [vehicle]
            start_x = 100.0

            [vehicle.radar]
            offsets = [-45.0, 0.0, 45.0]
            max_range = 150.0

            [episode]
            wall_clock_secs = 20.0
            parallel = true

            [evolution]
            population = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.vehicle.start_x, 100.0);
        assert_eq!(config.vehicle.start_y, 910.0);
        assert_eq!(config.vehicle.radar.offsets, vec![-45.0, 0.0, 45.0]);
        assert_eq!(config.vehicle.radar.step, 5.0);
        assert_eq!(config.episode.budget().wall_clock_secs, Some(20.0));
        assert!(config.episode.parallel);
        assert_eq!(config.evolution.population, 12);
        assert_eq!(config.evolution.elites, 3);
    }

    #[test]
    fn rejects_zero_length_vehicle() {
        let result = SimConfig::from_toml_str("[vehicle]\nlength = 0.0\n");
        assert!(matches!(result, Err(SimError::InvalidGeometry(_))));
    }

    #[test]
    fn rejects_malformed_toml() {
        let result = SimConfig::from_toml_str("[vehicle\nlength = ");
        assert!(matches!(result, Err(SimError::TomlError(_))));
    }
}

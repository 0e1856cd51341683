//! Configuration file support for cutplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/cutplan/config.toml`.
//! The `[model]` section holds the forecast constants, so alternative
//! adaptation or energy-density assumptions are a config change rather
//! than a code change.

use crate::units::WeightUnit;
use crate::{Error, PerGender, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Forecast model parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// Fraction of the nominal weekly deficit lost to adaptive thermogenesis
    #[serde(default = "default_beta")]
    pub beta: f64,

    /// Iteration cap; a run that hits it is returned as truncated
    #[serde(default = "default_max_weeks")]
    pub max_weeks: u32,

    #[serde(default)]
    pub energy_density: EnergyDensity,

    #[serde(default)]
    pub partition: PartitionConfig,

    /// Lowest body-fat target the engine will simulate towards
    #[serde(default = "default_safe_floor")]
    pub safe_floor: PerGender,

    /// Minimum daily target calories
    #[serde(default = "default_calorie_floor")]
    pub calorie_floor: PerGender,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            beta: default_beta(),
            max_weeks: default_max_weeks(),
            energy_density: EnergyDensity::default(),
            partition: PartitionConfig::default(),
            safe_floor: default_safe_floor(),
            calorie_floor: default_calorie_floor(),
        }
    }
}

/// Energy content of one pound of lost tissue
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnergyDensity {
    /// A single kcal/lb figure for mixed fat and lean tissue
    Blended { kcal_per_lb: f64 },
    /// Fat and lean tissue weighted by the week's partition ratio
    TissueWeighted {
        fat_kcal_per_lb: f64,
        lean_kcal_per_lb: f64,
    },
}

impl Default for EnergyDensity {
    fn default() -> Self {
        EnergyDensity::Blended {
            kcal_per_lb: 4000.0,
        }
    }
}

impl EnergyDensity {
    /// The classic 3500 kcal/lb fat and 760 kcal/lb lean blend
    pub fn tissue_weighted() -> Self {
        EnergyDensity::TissueWeighted {
            fat_kcal_per_lb: 3500.0,
            lean_kcal_per_lb: 760.0,
        }
    }

    /// kcal per pound of loss when `fat_ratio` of it is fat
    pub fn kcal_per_lb(&self, fat_ratio: f64) -> f64 {
        match *self {
            EnergyDensity::Blended { kcal_per_lb } => kcal_per_lb,
            EnergyDensity::TissueWeighted {
                fat_kcal_per_lb,
                lean_kcal_per_lb,
            } => fat_ratio * fat_kcal_per_lb + (1.0 - fat_ratio) * lean_kcal_per_lb,
        }
    }
}

/// Body-fat dependent share of lost weight that comes from fat
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PartitionConfig {
    #[serde(default = "default_high_threshold")]
    pub high_threshold: f64,

    #[serde(default = "default_low_threshold")]
    pub low_threshold: f64,

    #[serde(default = "default_high_fat_ratio")]
    pub high_fat_ratio: f64,

    #[serde(default = "default_mid_fat_ratio")]
    pub mid_fat_ratio: f64,

    #[serde(default = "default_low_fat_ratio")]
    pub low_fat_ratio: f64,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            high_threshold: default_high_threshold(),
            low_threshold: default_low_threshold(),
            high_fat_ratio: default_high_fat_ratio(),
            mid_fat_ratio: default_mid_fat_ratio(),
            low_fat_ratio: default_low_fat_ratio(),
        }
    }
}

impl PartitionConfig {
    /// Fat fraction of this week's loss at the given body fat percentage.
    ///
    /// Above `high_threshold` → high ratio, at or above `low_threshold` → mid,
    /// below → low.
    pub fn fat_ratio(&self, body_fat_percent: f64) -> f64 {
        if body_fat_percent > self.high_threshold {
            self.high_fat_ratio
        } else if body_fat_percent >= self.low_threshold {
            self.mid_fat_ratio
        } else {
            self.low_fat_ratio
        }
    }
}

/// Output preferences
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub weight_unit: WeightUnit,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            weight_unit: WeightUnit::Lbs,
        }
    }
}

// Default value functions
fn default_beta() -> f64 {
    0.10
}

fn default_max_weeks() -> u32 {
    500
}

fn default_safe_floor() -> PerGender {
    PerGender {
        male: 10.0,
        female: 15.0,
    }
}

fn default_calorie_floor() -> PerGender {
    PerGender {
        male: crate::energy::MALE_CALORIE_FLOOR,
        female: crate::energy::FEMALE_CALORIE_FLOOR,
    }
}

fn default_high_threshold() -> f64 {
    30.0
}

fn default_low_threshold() -> f64 {
    20.0
}

fn default_high_fat_ratio() -> f64 {
    0.90
}

fn default_mid_fat_ratio() -> f64 {
    0.75
}

fn default_low_fat_ratio() -> f64 {
    0.60
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.model.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        Ok(base.join("cutplan").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

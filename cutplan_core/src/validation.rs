//! Request and model validation.
//!
//! Everything here runs before a simulation starts; the engine never does
//! partial work on a request that fails these checks.

use crate::engine::weekly_loss;
use crate::{BodyState, Error, GoalRange, ModelConfig, Result, SimulationInput};
use std::ops::RangeInclusive;

/// Accepted starting body fat percentage
pub const BODY_FAT_RANGE: RangeInclusive<f64> = 8.0..=40.0;

/// Accepted age in years
pub const AGE_RANGE: RangeInclusive<u32> = 18..=75;

/// Lowest accepted activity multiplier
pub const MIN_ACTIVITY_MULTIPLIER: f64 = 1.0;

fn positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::validation(
            field,
            format!("must be a positive number, got {}", value),
        ));
    }
    Ok(())
}

fn percentage(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 || value >= 100.0 {
        return Err(Error::validation(
            field,
            format!("must be between 0 and 100 (exclusive), got {}", value),
        ));
    }
    Ok(())
}

impl SimulationInput {
    /// Check every field against its accepted range
    pub fn validate(&self) -> Result<()> {
        positive("initial_weight", self.initial_weight)?;
        positive("height_cm", self.height_cm)?;

        if !self.body_fat_pct.is_finite() || !BODY_FAT_RANGE.contains(&self.body_fat_pct) {
            return Err(Error::validation(
                "body_fat_pct",
                format!(
                    "must be between {} and {}, got {}",
                    BODY_FAT_RANGE.start(),
                    BODY_FAT_RANGE.end(),
                    self.body_fat_pct
                ),
            ));
        }

        if !AGE_RANGE.contains(&self.age) {
            return Err(Error::validation(
                "age",
                format!(
                    "must be between {} and {}, got {}",
                    AGE_RANGE.start(),
                    AGE_RANGE.end(),
                    self.age
                ),
            ));
        }

        if !self.activity_multiplier.is_finite()
            || self.activity_multiplier < MIN_ACTIVITY_MULTIPLIER
        {
            return Err(Error::validation(
                "activity_multiplier",
                format!(
                    "must be at least {}, got {}",
                    MIN_ACTIVITY_MULTIPLIER, self.activity_multiplier
                ),
            ));
        }

        // A zero or surplus adjustment never moves body fat toward the target
        if self.deficit_value >= 0 {
            return Err(Error::validation(
                "deficit_value",
                format!(
                    "must be a negative daily adjustment for weight loss, got {}",
                    self.deficit_value
                ),
            ));
        }

        percentage("target_bf", self.target_bf)
    }
}

impl SimulationInput {
    /// Reject deficits whose first week would remove all fat or lean mass.
    ///
    /// Run after both the input and the model have passed [`validate`].
    ///
    /// [`validate`]: SimulationInput::validate
    pub fn validate_against(&self, model: &ModelConfig) -> Result<()> {
        let state = BodyState::from_weight(self.initial_weight, self.body_fat_pct);
        let (fat_loss, lean_loss) = weekly_loss(model, self.deficit_value, self.body_fat_pct);

        if fat_loss >= state.fat_mass || lean_loss >= state.lean_mass {
            return Err(Error::validation(
                "deficit_value",
                format!(
                    "{} kcal/day would remove {:.1} lbs fat and {:.1} lbs lean in one week \
                     from {:.1} / {:.1} lbs",
                    self.deficit_value, fat_loss, lean_loss, state.fat_mass, state.lean_mass
                ),
            ));
        }
        Ok(())
    }
}

impl GoalRange {
    pub fn validate(&self) -> Result<()> {
        percentage("range.min", self.min)?;
        percentage("range.max", self.max)?;
        if self.min > self.max {
            return Err(Error::validation(
                "range",
                format!("min ({}) must not exceed max ({})", self.min, self.max),
            ));
        }
        Ok(())
    }
}

impl ModelConfig {
    /// Reject parameter sets that would stall or invert the forecast
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.beta) {
            return Err(Error::Config(format!(
                "model.beta must be in [0, 1), got {}",
                self.beta
            )));
        }

        if self.max_weeks == 0 {
            return Err(Error::Config("model.max_weeks must be positive".into()));
        }

        for ratio in [0.0, 1.0] {
            let density = self.energy_density.kcal_per_lb(ratio);
            if !density.is_finite() || density <= 0.0 {
                return Err(Error::Config(format!(
                    "model.energy_density must be positive, got {}",
                    density
                )));
            }
        }

        let p = &self.partition;
        for (name, ratio) in [
            ("high_fat_ratio", p.high_fat_ratio),
            ("mid_fat_ratio", p.mid_fat_ratio),
            ("low_fat_ratio", p.low_fat_ratio),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(Error::Config(format!(
                    "model.partition.{} must be in (0, 1], got {}",
                    name, ratio
                )));
            }
        }

        for (name, threshold) in [
            ("high_threshold", p.high_threshold),
            ("low_threshold", p.low_threshold),
        ] {
            if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
                return Err(Error::Config(format!(
                    "model.partition.{} must be between 0 and 100, got {}",
                    name, threshold
                )));
            }
        }

        if p.low_threshold > p.high_threshold {
            return Err(Error::Config(format!(
                "model.partition.low_threshold ({}) exceeds high_threshold ({})",
                p.low_threshold, p.high_threshold
            )));
        }

        for (name, floor) in [
            ("safe_floor.male", self.safe_floor.male),
            ("safe_floor.female", self.safe_floor.female),
        ] {
            if !floor.is_finite() || !(0.0..100.0).contains(&floor) {
                return Err(Error::Config(format!(
                    "model.{} must be in [0, 100), got {}",
                    name, floor
                )));
            }
        }

        for (name, floor) in [
            ("calorie_floor.male", self.calorie_floor.male),
            ("calorie_floor.female", self.calorie_floor.female),
        ] {
            if !floor.is_finite() || floor < 0.0 {
                return Err(Error::Config(format!(
                    "model.{} must be a non-negative number, got {}",
                    name, floor
                )));
            }
        }

        Ok(())
    }
}

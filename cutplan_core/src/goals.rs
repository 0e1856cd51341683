//! Body-fat goal presets.
//!
//! Ranges follow the ACE body fat chart. The essential-fat ranges sit below
//! the engine's safe floor and are clamped to it when simulated.

use crate::{Gender, GoalRange};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalPreset {
    Essential,
    Athletic,
    Fitness,
    Average,
}

impl GoalPreset {
    pub const ALL: [GoalPreset; 4] = [
        GoalPreset::Essential,
        GoalPreset::Athletic,
        GoalPreset::Fitness,
        GoalPreset::Average,
    ];

    /// Body fat percentage range for this preset
    pub fn range(&self, gender: Gender) -> GoalRange {
        let (min, max) = match (self, gender) {
            (GoalPreset::Essential, Gender::Male) => (2.0, 5.0),
            (GoalPreset::Essential, Gender::Female) => (10.0, 13.0),
            (GoalPreset::Athletic, Gender::Male) => (6.0, 13.0),
            (GoalPreset::Athletic, Gender::Female) => (14.0, 20.0),
            (GoalPreset::Fitness, Gender::Male) => (14.0, 17.0),
            (GoalPreset::Fitness, Gender::Female) => (21.0, 24.0),
            (GoalPreset::Average, Gender::Male) => (18.0, 24.0),
            (GoalPreset::Average, Gender::Female) => (25.0, 31.0),
        };
        GoalRange::new(min, max)
    }

    pub fn label(&self) -> &'static str {
        match self {
            GoalPreset::Essential => "Essential Fat",
            GoalPreset::Athletic => "Athletic",
            GoalPreset::Fitness => "General Fitness",
            GoalPreset::Average => "Average",
        }
    }
}

impl fmt::Display for GoalPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for GoalPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "essential" => Ok(GoalPreset::Essential),
            "athletic" | "athlete" | "athletes" => Ok(GoalPreset::Athletic),
            "fitness" | "general-fitness" => Ok(GoalPreset::Fitness),
            "average" | "acceptable" => Ok(GoalPreset::Average),
            other => Err(format!("Unknown goal preset: {}", other)),
        }
    }
}

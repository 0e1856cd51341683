//! Unit conversion at the input/output boundary.
//!
//! The engine works in pounds and centimeters; callers convert on the way in
//! and format on the way out.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pounds per kilogram
pub const LBS_PER_KG: f64 = 2.20462;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs / LBS_PER_KG
}

pub fn kg_to_lbs(kg: f64) -> f64 {
    kg * LBS_PER_KG
}

/// Height from feet and inches to centimeters
pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    (feet * 12.0 + inches) * CM_PER_INCH
}

/// Weight unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Lbs,
    Kg,
}

impl WeightUnit {
    /// Convert a value in this unit to pounds
    pub fn to_lbs(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Lbs => value,
            WeightUnit::Kg => kg_to_lbs(value),
        }
    }

    /// Convert pounds to this unit
    pub fn from_lbs(&self, lbs: f64) -> f64 {
        match self {
            WeightUnit::Lbs => lbs,
            WeightUnit::Kg => lbs_to_kg(lbs),
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Lbs => "lbs",
            WeightUnit::Kg => "kg",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lbs" | "lb" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            _ => Err(format!("Unknown weight unit: {}", s)),
        }
    }
}

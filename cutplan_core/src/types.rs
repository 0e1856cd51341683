//! Core domain types for the cut planner.
//!
//! This module defines the records passed in and out of the forecast engine:
//! - Demographics and dietary approach selectors
//! - The simulation request and the mutable body composition it seeds
//! - Weekly forecast points and the final simulation result

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Demographics
// ============================================================================

/// Gender, used for the Mifflin–St Jeor constant and the safety floors
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(format!("Unknown gender: {}", other)),
        }
    }
}

/// A value that differs between male and female (floors, constants)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PerGender {
    pub male: f64,
    pub female: f64,
}

impl PerGender {
    pub fn get(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }
}

// ============================================================================
// Diet
// ============================================================================

/// Macro split strategy
///
/// Unknown names deserialize to [`DietaryApproach::Balanced`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum DietaryApproach {
    #[default]
    Balanced,
    LowCarb,
    HighProtein,
}

impl DietaryApproach {
    /// Parse an approach name, falling back to `Balanced` for anything unrecognized
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            "balanced" => DietaryApproach::Balanced,
            "low-carb" | "lowcarb" => DietaryApproach::LowCarb,
            "high-protein" | "highprotein" => DietaryApproach::HighProtein,
            other => {
                tracing::warn!("Unknown dietary approach {:?}, using balanced", other);
                DietaryApproach::Balanced
            }
        }
    }

    /// (carbs, protein, fat) as fractions of total calories
    pub fn split(&self) -> (f64, f64, f64) {
        match self {
            DietaryApproach::Balanced => (0.40, 0.30, 0.30),
            DietaryApproach::LowCarb => (0.25, 0.40, 0.35),
            DietaryApproach::HighProtein => (0.35, 0.45, 0.20),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DietaryApproach::Balanced => "balanced",
            DietaryApproach::LowCarb => "low-carb",
            DietaryApproach::HighProtein => "high-protein",
        }
    }
}

impl From<String> for DietaryApproach {
    fn from(name: String) -> Self {
        DietaryApproach::from_name(&name)
    }
}

impl fmt::Display for DietaryApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Daily macronutrient targets in grams
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Macros {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl Macros {
    /// Energy content of these macros (4 kcal/g protein and carbs, 9 kcal/g fat)
    pub fn kcal(&self) -> f64 {
        4.0 * f64::from(self.protein) + 4.0 * f64::from(self.carbs) + 9.0 * f64::from(self.fat)
    }
}

// ============================================================================
// Simulation request and state
// ============================================================================

/// A simulation request.
///
/// Weights are pounds; callers holding kilograms convert with
/// [`crate::units::WeightUnit::to_lbs`] first.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SimulationInput {
    pub initial_weight: f64,
    pub body_fat_pct: f64,
    pub age: u32,
    pub gender: Gender,
    pub activity_multiplier: f64,
    pub height_cm: f64,
    #[serde(default)]
    pub dietary_approach: DietaryApproach,
    /// Daily kcal adjustment applied to TDEE; negative for a deficit
    pub deficit_value: i32,
    pub target_bf: f64,
}

impl SimulationInput {
    /// Same request with a different terminal body-fat target
    pub fn with_target(&self, target_bf: f64) -> Self {
        Self {
            target_bf,
            ..self.clone()
        }
    }
}

/// Body composition at a point in time (pounds, percent)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BodyState {
    pub total_weight: f64,
    pub fat_mass: f64,
    pub lean_mass: f64,
    pub body_fat_percent: f64,
}

impl BodyState {
    /// Split a total weight into fat and lean mass at the given body fat
    pub fn from_weight(total_weight: f64, body_fat_pct: f64) -> Self {
        let fat_mass = total_weight * body_fat_pct / 100.0;
        let lean_mass = total_weight - fat_mass;
        Self {
            total_weight: fat_mass + lean_mass,
            fat_mass,
            lean_mass,
            body_fat_percent: body_fat_pct,
        }
    }

    /// Remove tissue and re-derive total weight and body fat
    pub fn lose(&mut self, fat_loss: f64, lean_loss: f64) {
        self.fat_mass -= fat_loss;
        self.lean_mass -= lean_loss;
        self.total_weight = self.fat_mass + self.lean_mass;
        self.body_fat_percent = self.fat_mass / self.total_weight * 100.0;
    }
}

// ============================================================================
// Simulation output
// ============================================================================

/// One simulated week
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeeklyDataPoint {
    pub week: u32,
    pub total_weight: f64,
    pub lean_mass: f64,
    pub fat_mass: f64,
    pub body_fat_percent: f64,
    pub rmr: f64,
    pub tdee: f64,
    pub target_calories: f64,
    pub macros: Macros,
    pub fat_loss: f64,
    pub lean_loss: f64,
    pub weekly_weight_loss: f64,
    pub week_date: NaiveDate,
}

impl WeeklyDataPoint {
    pub fn body_state(&self) -> BodyState {
        BodyState {
            total_weight: self.total_weight,
            fat_mass: self.fat_mass,
            lean_mass: self.lean_mass,
            body_fat_percent: self.body_fat_percent,
        }
    }
}

/// Outcome of one scalar-target simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationResult {
    pub initial_stats: BodyState,
    pub weekly_data: Vec<WeeklyDataPoint>,
    pub baseline_rmr: f64,
    pub baseline_tdee: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Target as requested
    pub target_bf: f64,
    /// Target after the gender safety floor was applied
    pub effective_target_bf: f64,
    pub goal_reached: bool,
    /// The week cap stopped the run before the goal was reached
    pub truncated: bool,
}

impl SimulationResult {
    /// Composition after the last simulated week (or week 0 if none ran)
    pub fn final_state(&self) -> BodyState {
        self.weekly_data
            .last()
            .map(WeeklyDataPoint::body_state)
            .unwrap_or(self.initial_stats)
    }

    pub fn weeks(&self) -> u32 {
        self.weekly_data.last().map(|p| p.week).unwrap_or(0)
    }

    pub fn total_weight_loss(&self) -> f64 {
        self.initial_stats.total_weight - self.final_state().total_weight
    }
}

/// A target body-fat percentage range, e.g. 14–17%
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct GoalRange {
    pub min: f64,
    pub max: f64,
}

impl GoalRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for GoalRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}%", self.min, self.max)
    }
}

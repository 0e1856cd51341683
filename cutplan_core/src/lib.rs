#![forbid(unsafe_code)]

//! Body-composition forecasting for calorie-deficit planning.
//!
//! This crate provides:
//! - Energy model (Mifflin–St Jeor RMR, TDEE, macro split, calorie floors)
//! - Weekly metabolic-adaptation forecast engine
//! - Goal-range forecasting over a pair of body-fat targets
//! - Model configuration, unit conversion, goal presets and CSV export

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod units;
pub mod validation;
pub mod energy;
pub mod engine;
pub mod range;
pub mod goals;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, EnergyDensity, ModelConfig, PartitionConfig};
pub use units::WeightUnit;
pub use engine::{simulate, simulate_from};
pub use range::{simulate_goal_range, simulate_goal_range_from, GoalSummary, RangeForecast, Span};
pub use goals::GoalPreset;
pub use export::write_weekly_csv;

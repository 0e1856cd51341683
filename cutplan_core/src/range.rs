//! Goal-range forecasting.
//!
//! A goal such as "General Fitness 14–17%" is forecast by running the engine
//! once per bound of the range and pairing the two results.

use crate::engine::simulate_from;
use crate::{GoalRange, ModelConfig, Result, SimulationInput, SimulationResult};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Two forecasts for the bounds of a body-fat goal range
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RangeForecast {
    pub range: GoalRange,
    /// Run with `target_bf = range.min`
    pub lower: SimulationResult,
    /// Run with `target_bf = range.max`
    pub upper: SimulationResult,
}

/// Inclusive span of a derived value across the two range runs
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Span<T> {
    fn of(a: T, b: T) -> Self {
        if a <= b {
            Span { min: a, max: b }
        } else {
            Span { min: b, max: a }
        }
    }
}

/// Goal values derived from the final week of each range run
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GoalSummary {
    pub goal_weight: Span<f64>,
    pub weeks_to_goal: Span<u32>,
    pub lean_mass: Span<f64>,
    pub fat_mass: Span<f64>,
    pub body_fat_percent: Span<f64>,
    pub end_date: Span<NaiveDate>,
    /// At least one of the two runs hit the week cap
    pub any_truncated: bool,
}

impl RangeForecast {
    pub fn summary(&self) -> GoalSummary {
        let lower = self.lower.final_state();
        let upper = self.upper.final_state();

        GoalSummary {
            goal_weight: Span::of(lower.total_weight, upper.total_weight),
            weeks_to_goal: Span::of(self.lower.weeks(), self.upper.weeks()),
            lean_mass: Span::of(lower.lean_mass, upper.lean_mass),
            fat_mass: Span::of(lower.fat_mass, upper.fat_mass),
            body_fat_percent: Span::of(lower.body_fat_percent, upper.body_fat_percent),
            end_date: Span::of(self.lower.end_date, self.upper.end_date),
            any_truncated: self.lower.truncated || self.upper.truncated,
        }
    }
}

/// Forecast both bounds of `range` starting today
pub fn simulate_goal_range(
    input: &SimulationInput,
    range: GoalRange,
    model: &ModelConfig,
) -> Result<RangeForecast> {
    simulate_goal_range_from(input, range, model, Local::now().date_naive())
}

/// Forecast both bounds of `range` from a fixed start date.
///
/// Always issues exactly two scalar simulations; they share nothing but the
/// start date and run on separate threads.
pub fn simulate_goal_range_from(
    input: &SimulationInput,
    range: GoalRange,
    model: &ModelConfig,
    start_date: NaiveDate,
) -> Result<RangeForecast> {
    range.validate()?;

    let lower_input = input.with_target(range.min);
    let upper_input = input.with_target(range.max);
    lower_input.validate()?;

    tracing::info!("Forecasting goal range {}", range);

    let (lower, upper) = std::thread::scope(|s| {
        let lower = s.spawn(|| simulate_from(&lower_input, model, start_date));
        let upper = simulate_from(&upper_input, model, start_date);
        let lower = lower
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        (lower, upper)
    });

    Ok(RangeForecast {
        range,
        lower: lower?,
        upper: upper?,
    })
}

//! Weekly metabolic-adaptation forecast.
//!
//! Each simulated week:
//! - Discounts the nominal deficit by the adaptive thermogenesis factor
//! - Converts the remaining deficit into pounds of mixed tissue
//! - Splits that loss into fat and lean mass by the current body fat tier
//! - Recomputes RMR/TDEE for the lighter body and derives the next
//!   calorie and macro targets
//!
//! The run stops once body fat reaches the effective target (the requested
//! target raised to the gender safety floor), the week cap is hit, or the
//! next week's loss would use up the remaining fat or lean mass.

use crate::energy::{macro_split, resting_metabolic_rate, total_daily_expenditure};
use crate::units::lbs_to_kg;
use crate::{BodyState, ModelConfig, Result, SimulationInput, SimulationResult, WeeklyDataPoint};
use chrono::{Duration, Local, NaiveDate};

/// Run a forecast starting today
pub fn simulate(input: &SimulationInput, model: &ModelConfig) -> Result<SimulationResult> {
    simulate_from(input, model, Local::now().date_naive())
}

/// Fat and lean pounds lost in one week at `body_fat_percent`.
///
/// The nominal weekly deficit is discounted by `beta` and converted to
/// pounds at the energy density for this week's partition ratio.
pub(crate) fn weekly_loss(
    model: &ModelConfig,
    deficit_value: i32,
    body_fat_percent: f64,
) -> (f64, f64) {
    let weekly_deficit = f64::from(deficit_value).abs() * 7.0;
    let effective_deficit = weekly_deficit - model.beta * weekly_deficit;

    let fat_ratio = model.partition.fat_ratio(body_fat_percent);
    let delta_weight = effective_deficit / model.energy_density.kcal_per_lb(fat_ratio);
    let fat_loss = delta_weight * fat_ratio;
    (fat_loss, delta_weight - fat_loss)
}

/// Run a forecast whose week 0 falls on `start_date`
pub fn simulate_from(
    input: &SimulationInput,
    model: &ModelConfig,
    start_date: NaiveDate,
) -> Result<SimulationResult> {
    input.validate()?;
    model.validate()?;
    input.validate_against(model)?;

    let effective_target_bf = input.target_bf.max(model.safe_floor.get(input.gender));
    let mut state = BodyState::from_weight(input.initial_weight, input.body_fat_pct);
    let initial_stats = state;

    let (baseline_rmr, baseline_tdee) = expenditure(input, state.total_weight)?;

    tracing::info!(
        "Simulating {} lbs at {:.1}% body fat toward {:.1}% (requested {:.1}%), {} kcal/day",
        input.initial_weight,
        input.body_fat_pct,
        effective_target_bf,
        input.target_bf,
        input.deficit_value
    );

    let daily_deficit = f64::from(input.deficit_value);
    let calorie_floor = model.calorie_floor.get(input.gender);

    let mut weekly_data = Vec::new();
    let mut week: u32 = 0;

    while state.body_fat_percent > effective_target_bf && week < model.max_weeks {
        let (fat_loss, lean_loss) =
            weekly_loss(model, input.deficit_value, state.body_fat_percent);

        // Tissue stores never go to zero or below
        if fat_loss >= state.fat_mass || lean_loss >= state.lean_mass {
            tracing::warn!(
                "Week {} would remove {:.2} lbs fat / {:.2} lbs lean from {:.2} / {:.2}; stopping",
                week + 1,
                fat_loss,
                lean_loss,
                state.fat_mass,
                state.lean_mass
            );
            break;
        }

        week += 1;
        let delta_weight = fat_loss + lean_loss;
        state.lose(fat_loss, lean_loss);

        let (rmr, tdee) = expenditure(input, state.total_weight)?;
        let target_calories = (tdee + daily_deficit).max(calorie_floor);

        tracing::debug!(
            "Week {}: {:.2} lbs, {:.2}% body fat, {:.0} kcal target",
            week,
            state.total_weight,
            state.body_fat_percent,
            target_calories
        );

        weekly_data.push(WeeklyDataPoint {
            week,
            total_weight: state.total_weight,
            lean_mass: state.lean_mass,
            fat_mass: state.fat_mass,
            body_fat_percent: state.body_fat_percent,
            rmr,
            tdee,
            target_calories,
            macros: macro_split(target_calories, input.dietary_approach),
            fat_loss,
            lean_loss,
            weekly_weight_loss: delta_weight,
            week_date: start_date + Duration::days(7 * i64::from(week)),
        });
    }

    let goal_reached = state.body_fat_percent <= effective_target_bf;
    if goal_reached {
        tracing::info!(
            "Reached {:.1}% body fat after {} weeks at {:.1} lbs",
            state.body_fat_percent,
            week,
            state.total_weight
        );
    } else {
        tracing::warn!(
            "Stopped after {} weeks at {:.1}% body fat without reaching {:.1}%",
            week,
            state.body_fat_percent,
            effective_target_bf
        );
    }

    let end_date = weekly_data
        .last()
        .map(|p| p.week_date)
        .unwrap_or(start_date);

    Ok(SimulationResult {
        initial_stats,
        weekly_data,
        baseline_rmr,
        baseline_tdee,
        start_date,
        end_date,
        target_bf: input.target_bf,
        effective_target_bf,
        goal_reached,
        truncated: !goal_reached,
    })
}

/// RMR and TDEE for the request's demographics at the given weight in pounds
fn expenditure(input: &SimulationInput, weight_lbs: f64) -> Result<(f64, f64)> {
    let rmr = resting_metabolic_rate(
        lbs_to_kg(weight_lbs),
        input.height_cm,
        input.age,
        input.gender,
    )?;
    Ok((rmr, total_daily_expenditure(rmr, input.activity_multiplier)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::calorie_floor;
    use crate::{DietaryApproach, EnergyDensity, Error, Gender};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn reference_input() -> SimulationInput {
        SimulationInput {
            initial_weight: 287.5,
            body_fat_pct: 35.7,
            age: 62,
            gender: Gender::Male,
            activity_multiplier: 1.55,
            height_cm: 180.0,
            dietary_approach: DietaryApproach::LowCarb,
            deficit_value: -500,
            target_bf: 15.0,
        }
    }

    fn run(input: &SimulationInput) -> SimulationResult {
        simulate_from(input, &ModelConfig::default(), start()).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        crate::logging::init_test();
        let input = reference_input();
        let result = run(&input);

        let expected_rmr =
            resting_metabolic_rate(lbs_to_kg(287.5), 180.0, 62, Gender::Male).unwrap();
        assert!((result.baseline_rmr - expected_rmr).abs() < 1e-9);
        assert!((result.baseline_tdee - expected_rmr * 1.55).abs() < 1e-9);

        // One week's loss is under 0.8 lbs, worth under 4 kcal of RMR
        let first = &result.weekly_data[0];
        assert!((first.rmr - expected_rmr).abs() < 5.0);
        assert!(first.rmr < expected_rmr);

        assert!(result.goal_reached);
        assert!(!result.truncated);
        assert!(result.final_state().body_fat_percent <= 15.0);
        assert!(result.weekly_data.len() <= 500);

        for pair in result.weekly_data.windows(2) {
            assert!(pair[1].body_fat_percent < pair[0].body_fat_percent);
        }
    }

    #[test]
    fn test_first_week_deltas() {
        let result = run(&reference_input());
        let first = &result.weekly_data[0];

        // 500 × 7 × 0.9 / 4000 = 0.7875 lbs, 90% fat above 30% body fat
        assert!((first.weekly_weight_loss - 0.7875).abs() < 1e-9);
        assert!((first.fat_loss - 0.7875 * 0.9).abs() < 1e-9);
        assert!((first.lean_loss - 0.7875 * 0.1).abs() < 1e-9);
        assert!((first.total_weight - (287.5 - 0.7875)).abs() < 1e-9);
        assert_eq!(first.week, 1);
        assert_eq!(first.week_date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(first.macros, macro_split(first.target_calories, DietaryApproach::LowCarb));
    }

    #[test]
    fn test_mass_conservation() {
        let result = run(&reference_input());
        for point in &result.weekly_data {
            assert!((point.fat_mass + point.lean_mass - point.total_weight).abs() < 1e-6);
            assert!(
                (point.fat_mass / point.total_weight * 100.0 - point.body_fat_percent).abs()
                    < 1e-9
            );
        }
    }

    #[test]
    fn test_weeks_and_dates_are_sequential() {
        let result = run(&reference_input());
        for (i, point) in result.weekly_data.iter().enumerate() {
            let week = i as u32 + 1;
            assert_eq!(point.week, week);
            assert_eq!(point.week_date, start() + Duration::days(7 * i64::from(week)));
        }
        assert_eq!(result.end_date, result.weekly_data.last().unwrap().week_date);
        assert_eq!(result.weeks() as usize, result.weekly_data.len());
    }

    #[test]
    fn test_calorie_floor_respected() {
        let input = SimulationInput {
            initial_weight: 120.0,
            body_fat_pct: 30.0,
            age: 60,
            gender: Gender::Female,
            activity_multiplier: 1.2,
            height_cm: 155.0,
            dietary_approach: DietaryApproach::Balanced,
            deficit_value: -1000,
            target_bf: 20.0,
        };
        let result = run(&input);

        assert!(!result.weekly_data.is_empty());
        for point in &result.weekly_data {
            assert!(point.target_calories >= calorie_floor(Gender::Female));
        }
        // TDEE here is far below 2200, so the floor is what is prescribed
        assert_eq!(result.weekly_data[0].target_calories, 1200.0);
    }

    #[test]
    fn test_target_below_safe_floor_is_clamped() {
        let input = SimulationInput {
            initial_weight: 180.0,
            body_fat_pct: 20.0,
            age: 30,
            target_bf: 5.0,
            ..reference_input()
        };
        let result = run(&input);

        assert_eq!(result.target_bf, 5.0);
        assert_eq!(result.effective_target_bf, 10.0);
        assert!(result.goal_reached);
        let last = result.final_state().body_fat_percent;
        assert!(last <= 10.0 && last > 9.0);
    }

    #[test]
    fn test_female_safe_floor() {
        let input = SimulationInput {
            initial_weight: 150.0,
            body_fat_pct: 25.0,
            age: 30,
            gender: Gender::Female,
            activity_multiplier: 1.2,
            height_cm: 165.0,
            dietary_approach: DietaryApproach::HighProtein,
            deficit_value: -300,
            target_bf: 12.0,
        };
        let result = run(&input);

        assert_eq!(result.effective_target_bf, 15.0);
        assert!(result.goal_reached);
        assert!(result.final_state().body_fat_percent <= 15.0);
        assert!(result.final_state().body_fat_percent > 14.5);
    }

    #[test]
    fn test_already_at_target_yields_empty_series() {
        let input = SimulationInput {
            body_fat_pct: 14.0,
            target_bf: 17.0,
            ..reference_input()
        };
        let result = run(&input);

        assert!(result.weekly_data.is_empty());
        assert!(result.goal_reached);
        assert!(!result.truncated);
        assert_eq!(result.end_date, result.start_date);
        assert_eq!(result.final_state(), result.initial_stats);
    }

    #[test]
    fn test_tiny_deficit_truncates_at_week_cap() {
        let input = SimulationInput {
            initial_weight: 200.0,
            body_fat_pct: 30.0,
            age: 40,
            activity_multiplier: 1.2,
            deficit_value: -1,
            target_bf: 10.0,
            ..reference_input()
        };
        let result = run(&input);

        assert!(result.truncated);
        assert!(!result.goal_reached);
        assert_eq!(result.weekly_data.len(), 500);
        assert!(result.final_state().body_fat_percent > 10.0);
    }

    #[test]
    fn test_configurable_week_cap() {
        let model = ModelConfig {
            max_weeks: 10,
            ..ModelConfig::default()
        };
        let result = simulate_from(&reference_input(), &model, start()).unwrap();

        assert_eq!(result.weekly_data.len(), 10);
        assert!(result.truncated);
    }

    #[test]
    fn test_zero_deficit_fails_fast() {
        let input = SimulationInput {
            deficit_value: 0,
            ..reference_input()
        };
        let err = simulate_from(&input, &ModelConfig::default(), start()).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "deficit_value", .. }));
    }

    fn small_female() -> SimulationInput {
        SimulationInput {
            initial_weight: 100.0,
            body_fat_pct: 40.0,
            age: 30,
            gender: Gender::Female,
            activity_multiplier: 1.2,
            height_cm: 155.0,
            dietary_approach: DietaryApproach::Balanced,
            deficit_value: -500,
            target_bf: 20.0,
        }
    }

    #[test]
    fn test_deficit_exceeding_fat_mass_fails_fast() {
        // 30000 kcal/day removes 42.5 lbs of fat from a 40 lb store in week 1
        for deficit in [-30_000, -100_000] {
            let input = SimulationInput {
                deficit_value: deficit,
                ..small_female()
            };
            let err = simulate_from(&input, &ModelConfig::default(), start()).unwrap_err();
            assert!(
                matches!(err, Error::Validation { field: "deficit_value", .. }),
                "{} -> {:?}",
                deficit,
                err
            );
        }
    }

    #[test]
    fn test_run_stops_before_exhausting_fat() {
        // Week 1 leaves 10.2 lbs of fat at 15.3%; week 2 would take 19.8 lbs
        let input = SimulationInput {
            deficit_value: -21_000,
            target_bf: 10.0,
            ..small_female()
        };
        let result = run(&input);

        assert_eq!(result.weekly_data.len(), 1);
        assert!(!result.goal_reached);
        assert!(result.truncated);

        let last = result.final_state();
        assert!(last.fat_mass > 0.0);
        assert!(last.lean_mass > 0.0);
        assert!(last.body_fat_percent > result.effective_target_bf);
    }

    #[test]
    fn test_invalid_body_fat_fails_before_simulating() {
        for bf in [7.0, 41.0] {
            let input = SimulationInput {
                body_fat_pct: bf,
                ..reference_input()
            };
            assert!(simulate_from(&input, &ModelConfig::default(), start()).is_err());
        }
        for bf in [8.0, 40.0] {
            let input = SimulationInput {
                body_fat_pct: bf,
                ..reference_input()
            };
            assert!(simulate_from(&input, &ModelConfig::default(), start()).is_ok());
        }
    }

    #[test]
    fn test_tissue_weighted_variant_loses_faster_when_lean() {
        let input = SimulationInput {
            initial_weight: 180.0,
            body_fat_pct: 18.0,
            age: 30,
            target_bf: 12.0,
            ..reference_input()
        };
        let blended = run(&input);
        let model = ModelConfig {
            energy_density: EnergyDensity::tissue_weighted(),
            ..ModelConfig::default()
        };
        let weighted = simulate_from(&input, &model, start()).unwrap();

        // 0.6 × 3500 + 0.4 × 760 = 2404 kcal/lb, denser loss than 4000 kcal/lb
        let first = &weighted.weekly_data[0];
        assert!((first.weekly_weight_loss - 3150.0 / 2404.0).abs() < 1e-9);
        assert!(weighted.weeks() < blended.weeks());
    }

    #[test]
    fn test_no_adaptation_loses_more_per_week() {
        let model = ModelConfig {
            beta: 0.0,
            ..ModelConfig::default()
        };
        let result = simulate_from(&reference_input(), &model, start()).unwrap();
        assert!((result.weekly_data[0].weekly_weight_loss - 0.875).abs() < 1e-9);
    }

    #[test]
    fn test_simulate_uses_today() {
        let result = simulate(&reference_input(), &ModelConfig::default()).unwrap();
        let today = Local::now().date_naive();
        assert!((result.start_date - today).num_days().abs() <= 1);
    }
}

//! CSV export of the weekly forecast series.

use crate::units::WeightUnit;
use crate::{Result, SimulationResult, WeeklyDataPoint};
use std::io::Write;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    week: u32,
    date: String,
    unit: &'static str,
    total_weight: f64,
    lean_mass: f64,
    fat_mass: f64,
    body_fat_percent: f64,
    rmr: f64,
    tdee: f64,
    target_calories: f64,
    protein_g: u32,
    carbs_g: u32,
    fat_g: u32,
    fat_loss: f64,
    lean_loss: f64,
    weekly_weight_loss: f64,
}

impl CsvRow {
    fn new(point: &WeeklyDataPoint, unit: WeightUnit) -> Self {
        let w = |lbs: f64| round_to(unit.from_lbs(lbs), 2);
        CsvRow {
            week: point.week,
            date: point.week_date.format("%Y-%m-%d").to_string(),
            unit: unit.abbreviation(),
            total_weight: w(point.total_weight),
            lean_mass: w(point.lean_mass),
            fat_mass: w(point.fat_mass),
            body_fat_percent: round_to(point.body_fat_percent, 2),
            rmr: point.rmr.round(),
            tdee: point.tdee.round(),
            target_calories: point.target_calories.round(),
            protein_g: point.macros.protein,
            carbs_g: point.macros.carbs,
            fat_g: point.macros.fat,
            fat_loss: w(point.fat_loss),
            lean_loss: w(point.lean_loss),
            weekly_weight_loss: w(point.weekly_weight_loss),
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Write one CSV row per simulated week, weights in `unit`.
///
/// Returns the number of rows written.
pub fn write_weekly_csv<W: Write>(
    result: &SimulationResult,
    writer: W,
    unit: WeightUnit,
) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for point in &result.weekly_data {
        csv_writer.serialize(CsvRow::new(point, unit))?;
    }
    csv_writer.flush()?;

    tracing::debug!("Wrote {} weekly rows to CSV", result.weekly_data.len());
    Ok(result.weekly_data.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::simulate_from;
    use crate::{DietaryApproach, Gender, ModelConfig, SimulationInput};
    use chrono::NaiveDate;

    fn result() -> SimulationResult {
        let input = SimulationInput {
            initial_weight: 200.0,
            body_fat_pct: 22.0,
            age: 35,
            gender: Gender::Male,
            activity_multiplier: 1.375,
            height_cm: 178.0,
            dietary_approach: DietaryApproach::Balanced,
            deficit_value: -500,
            target_bf: 18.0,
        };
        simulate_from(
            &input,
            &ModelConfig::default(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_week() {
        let result = result();
        let mut buf = Vec::new();
        let rows = write_weekly_csv(&result, &mut buf, WeightUnit::Lbs).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(rows, result.weekly_data.len());
        assert_eq!(lines.len(), rows + 1);
        assert!(lines[0].starts_with("week,date,unit,total_weight"));
        assert!(lines[1].starts_with("1,2024-01-08,lbs,"));
    }

    #[test]
    fn test_csv_converts_weights() {
        let result = result();
        let mut buf = Vec::new();
        write_weekly_csv(&result, &mut buf, WeightUnit::Kg).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let first = reader.records().next().unwrap().unwrap();
        let weight: f64 = first[3].parse().unwrap();
        let expected = result.weekly_data[0].total_weight / crate::units::LBS_PER_KG;
        assert_eq!(&first[2], "kg");
        assert!((weight - expected).abs() < 0.01);
    }
}

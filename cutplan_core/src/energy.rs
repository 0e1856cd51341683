//! Energy model: resting and total expenditure, macro split, calorie floor.
//!
//! All functions are pure. Weight enters the RMR formula in kilograms.

use crate::{DietaryApproach, Error, Gender, Macros, Result};

/// kcal per gram of protein or carbohydrate
pub const KCAL_PER_GRAM_PROTEIN_CARB: f64 = 4.0;

/// kcal per gram of fat
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Mifflin–St Jeor coefficients
mod mifflin {
    pub const WEIGHT: f64 = 10.0;
    pub const HEIGHT: f64 = 6.25;
    pub const AGE: f64 = 5.0;
    pub const MALE: f64 = 5.0;
    pub const FEMALE: f64 = -161.0;
}

/// Default minimum daily intake for men
pub const MALE_CALORIE_FLOOR: f64 = 1500.0;

/// Default minimum daily intake for women
pub const FEMALE_CALORIE_FLOOR: f64 = 1200.0;

/// Resting metabolic rate in kcal/day (Mifflin–St Jeor).
///
/// ```text
/// RMR = 10 × kg + 6.25 × cm − 5 × age + 5    (male)
/// RMR = 10 × kg + 6.25 × cm − 5 × age − 161  (female)
/// ```
///
/// Returns `Error::InvalidInput` if `weight_kg` is not a positive number.
pub fn resting_metabolic_rate(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
) -> Result<f64> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "weight must be positive, got {} kg",
            weight_kg
        )));
    }

    let constant = match gender {
        Gender::Male => mifflin::MALE,
        Gender::Female => mifflin::FEMALE,
    };

    Ok(mifflin::WEIGHT * weight_kg + mifflin::HEIGHT * height_cm
        - mifflin::AGE * f64::from(age)
        + constant)
}

/// Total daily energy expenditure: RMR scaled by the activity multiplier
pub fn total_daily_expenditure(rmr: f64, activity_multiplier: f64) -> f64 {
    rmr * activity_multiplier
}

/// Split daily calories into protein/carb/fat grams for the given approach.
///
/// Each macro is rounded to whole grams independently, so the energy of the
/// result can differ from `calories` by up to 2 + 2 + 4.5 kcal.
pub fn macro_split(calories: f64, approach: DietaryApproach) -> Macros {
    let calories = calories.max(0.0);
    let (carbs_pct, protein_pct, fat_pct) = approach.split();

    Macros {
        protein: grams(calories * protein_pct, KCAL_PER_GRAM_PROTEIN_CARB),
        carbs: grams(calories * carbs_pct, KCAL_PER_GRAM_PROTEIN_CARB),
        fat: grams(calories * fat_pct, KCAL_PER_GRAM_FAT),
    }
}

fn grams(kcal: f64, kcal_per_gram: f64) -> u32 {
    (kcal / kcal_per_gram).round() as u32
}

/// Default hard minimum for daily target calories
pub fn calorie_floor(gender: Gender) -> f64 {
    match gender {
        Gender::Male => MALE_CALORIE_FLOOR,
        Gender::Female => FEMALE_CALORIE_FLOOR,
    }
}

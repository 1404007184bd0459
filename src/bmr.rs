use serde::Serialize;

use crate::{
    error::{DashboardError, Result},
    resolver::ResolvedAnthropometrics,
    selection::Gender,
};

/// BMR wg wzoru Mifflina–St Jeora, kcal/dzień. Bez walidacji wejścia.
pub fn mifflin_st_jeor(height_cm: f64, weight_kg: f64, age_years: f64, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BmrEstimate {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: u32,
    pub kcal_per_day: f64,
}

fn physiological(what: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DashboardError::InvalidMeasurement { what, value })
    }
}

/// Odrzuca wartości <= 0 zanim trafią do wzoru.
pub fn estimate(resolved: ResolvedAnthropometrics, age: u32, gender: Gender) -> Result<BmrEstimate> {
    let height_cm = physiological("height", resolved.height_cm)?;
    let weight_kg = physiological("weight", resolved.weight_kg)?;
    let age_years = physiological("age", f64::from(age))?;
    Ok(BmrEstimate {
        height_cm,
        weight_kg,
        age,
        kcal_per_day: mifflin_st_jeor(height_cm, weight_kg, age_years, gender),
    })
}

//! Yield scaling
//!
//! Multiplies every ingredient by desired / original yield. Units are never
//! converted while scaling.

use serde::Serialize;

use crate::conversion::{format_amount, format_number, round_half_up, round_to};
use crate::error::{CalcError, CalcResult};
use crate::models::{Ingredient, ScaledIngredient};

/// Yield assumed when the caller leaves one blank or non-positive
pub const DEFAULT_YIELD: f64 = 1.0;

/// Ratio of desired to original yield
pub fn scale_factor(original_yield: f64, desired_yield: f64) -> CalcResult<f64> {
    if !original_yield.is_finite() || original_yield <= 0.0 {
        return Err(CalcError::InvalidYield(original_yield));
    }
    if !desired_yield.is_finite() || desired_yield < 0.0 {
        return Err(CalcError::InvalidYield(desired_yield));
    }
    Ok(desired_yield / original_yield)
}

/// Caller-side fallback for a raw yield value: missing, non-finite, or
/// non-positive yields become [`DEFAULT_YIELD`]
pub fn normalize_yield(raw: Option<f64>) -> f64 {
    match raw {
        Some(value) if value.is_finite() && value > 0.0 => value,
        Some(value) => {
            tracing::warn!("Yield {} is not a positive number, using {}", value, DEFAULT_YIELD);
            DEFAULT_YIELD
        }
        None => DEFAULT_YIELD,
    }
}

/// Scale each ingredient by `factor`, keeping its unit
pub fn scale_ingredients(ingredients: &[Ingredient], factor: f64) -> Vec<ScaledIngredient> {
    ingredients
        .iter()
        .map(|ingredient| {
            let scaled_amount = ingredient.amount * factor;
            ScaledIngredient {
                name: ingredient.name.clone(),
                amount: ingredient.amount,
                unit: ingredient.unit,
                scaled_amount,
                display_amount: format_amount(scaled_amount, ingredient.unit),
            }
        })
        .collect()
}

/// Desired yield produced by a quick-scale multiplier (x0.5, x2, x3 ...)
pub fn quick_scale(original_yield: f64, factor: f64) -> f64 {
    original_yield * factor
}

/// Human-facing description of a scale factor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleSummary {
    /// Factor rounded to 2 decimals
    pub factor: f64,
    /// Factor as a whole percentage
    pub percentage: f64,
    pub label: String,
}

impl ScaleSummary {
    pub fn new(factor: f64) -> Self {
        let rounded = round_to(factor, 2);
        let percentage = round_half_up(factor * 100.0);
        Self {
            factor: rounded,
            percentage,
            label: format!(
                "Scale Factor: {}x ({}%)",
                format_number(rounded),
                format_number(percentage)
            ),
        }
    }
}

//! Recipe scaling module
//!
//! Yield scaling, baker's percentages, and unit suggestions.

pub mod bakers;
pub mod scaler;
pub mod unit_defaults;

pub use bakers::{
    compute_bakers_percentages, is_hydrating, BakersEntry, BakersResult, PercentageEntry,
    DEFAULT_FLOUR_GRAMS,
};
pub use scaler::{
    normalize_yield, quick_scale, scale_factor, scale_ingredients, ScaleSummary, DEFAULT_YIELD,
};
pub use unit_defaults::suggest_unit;

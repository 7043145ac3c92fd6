//! Unit conversion module
//!
//! Volume, weight, and density-based conversions plus amount formatting.

pub mod converter;
pub mod density;
pub mod format;
pub mod units;

pub use converter::{
    can_convert, convert, convert_volume, convert_weight, convert_with, is_volume_unit,
    is_weight_unit, volume_to_weight, weight_to_volume,
};
pub use density::{DensityEntry, DensityTable, DEFAULT_GRAMS_PER_CUP};
pub use format::{format_amount, format_number, round_for_display, round_half_up, round_to};
pub use units::{Unit, UnitFamily};

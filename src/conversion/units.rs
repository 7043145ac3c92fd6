//! Unit types and conversion constants
//!
//! The fixed set of kitchen units and their factors relative to the base unit
//! of each family (milliliters for volume, grams for weight).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Family a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    Volume,
    Weight,
    /// Discrete items; never converted
    Count,
}

/// A measurement unit accepted by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Milliliters,
    Cups,
    Teaspoons,
    Tablespoons,
    Grams,
    Ounces,
    Pounds,
    Pieces,
}

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per teaspoon
pub const ML_PER_TSP: f64 = 4.92892;
/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 14.7868;
/// Milliliters per cup (US)
pub const ML_PER_CUP: f64 = 236.588;

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per ounce
pub const G_PER_OZ: f64 = 28.3495;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;

impl Unit {
    /// Every unit, in the order the calculator lists them
    pub const ALL: [Unit; 8] = [
        Unit::Grams,
        Unit::Cups,
        Unit::Ounces,
        Unit::Pounds,
        Unit::Milliliters,
        Unit::Teaspoons,
        Unit::Tablespoons,
        Unit::Pieces,
    ];

    pub fn family(&self) -> UnitFamily {
        match self {
            Unit::Milliliters | Unit::Cups | Unit::Teaspoons | Unit::Tablespoons => {
                UnitFamily::Volume
            }
            Unit::Grams | Unit::Ounces | Unit::Pounds => UnitFamily::Weight,
            Unit::Pieces => UnitFamily::Count,
        }
    }

    /// Factor to the family's base unit (ml or g); `None` for pieces
    pub fn base_factor(&self) -> Option<f64> {
        match self {
            Unit::Milliliters => Some(1.0),
            Unit::Cups => Some(ML_PER_CUP),
            Unit::Teaspoons => Some(ML_PER_TSP),
            Unit::Tablespoons => Some(ML_PER_TBSP),
            Unit::Grams => Some(1.0),
            Unit::Ounces => Some(G_PER_OZ),
            Unit::Pounds => Some(G_PER_LB),
            Unit::Pieces => None,
        }
    }

    /// Short label used in formatted amounts
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Unit::Grams => "g",
            Unit::Ounces => "oz",
            Unit::Pounds => "lbs",
            Unit::Milliliters => "ml",
            Unit::Cups => "cups",
            Unit::Teaspoons => "tsp",
            Unit::Tablespoons => "tbsp",
            Unit::Pieces => "pieces",
        }
    }

    /// Canonical name, as accepted by `FromStr`
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Milliliters => "milliliters",
            Unit::Cups => "cups",
            Unit::Teaspoons => "teaspoons",
            Unit::Tablespoons => "tablespoons",
            Unit::Grams => "grams",
            Unit::Ounces => "ounces",
            Unit::Pounds => "pounds",
            Unit::Pieces => "pieces",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = CalcError;

    /// Exact match on the canonical names; anything else is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "milliliters" => Ok(Unit::Milliliters),
            "cups" => Ok(Unit::Cups),
            "teaspoons" => Ok(Unit::Teaspoons),
            "tablespoons" => Ok(Unit::Tablespoons),
            "grams" => Ok(Unit::Grams),
            "ounces" => Ok(Unit::Ounces),
            "pounds" => Ok(Unit::Pounds),
            "pieces" => Ok(Unit::Pieces),
            other => Err(CalcError::InvalidUnit(other.to_string())),
        }
    }
}

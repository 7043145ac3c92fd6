//! Ingredient models
//!
//! Plain ingredient rows and their scaled counterparts.

use serde::{Deserialize, Serialize};

use crate::conversion::Unit;

/// An ingredient line: what, how much, in which unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: f64,
    pub unit: Unit,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: f64, unit: Unit) -> Self {
        Self {
            name: name.into(),
            amount,
            unit,
        }
    }

    /// A usable line has a non-blank name and a finite, positive amount
    pub fn is_usable(&self) -> bool {
        !self.name.trim().is_empty() && self.amount.is_finite() && self.amount > 0.0
    }
}

/// An ingredient after scaling, with its display string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledIngredient {
    pub name: String,
    pub amount: f64,
    pub unit: Unit,
    pub scaled_amount: f64,
    pub display_amount: String,
}

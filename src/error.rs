//! Calculation errors
//!
//! Failures signalled by the conversion and scaling engine.

use thiserror::Error;

use crate::conversion::Unit;

/// Errors from unit conversion and recipe scaling
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    #[error("Cannot convert from {from} to {to}")]
    UnsupportedConversion { from: Unit, to: Unit },

    #[error("Invalid yield: {0} (must be a positive number)")]
    InvalidYield(f64),
}

/// Result type for calculation operations
pub type CalcResult<T> = Result<T, CalcError>;

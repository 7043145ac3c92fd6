//! Unit conversion functions
//!
//! Same-family conversions go through the family's base unit. Volume and
//! weight meet through cups and the ingredient density table.

use super::density::DensityTable;
use super::units::{Unit, UnitFamily};
use crate::error::{CalcError, CalcResult};

pub fn is_volume_unit(unit: Unit) -> bool {
    unit.family() == UnitFamily::Volume
}

pub fn is_weight_unit(unit: Unit) -> bool {
    unit.family() == UnitFamily::Weight
}

/// Factor to the base unit, provided the unit belongs to `family`
fn factor_in(unit: Unit, family: UnitFamily) -> CalcResult<f64> {
    if unit.family() != family {
        return Err(CalcError::InvalidUnit(format!(
            "{} is not a {} unit",
            unit,
            family_name(family)
        )));
    }
    unit.base_factor()
        .ok_or_else(|| CalcError::InvalidUnit(unit.to_string()))
}

fn family_name(family: UnitFamily) -> &'static str {
    match family {
        UnitFamily::Volume => "volume",
        UnitFamily::Weight => "weight",
        UnitFamily::Count => "count",
    }
}

/// Convert between two volume units
pub fn convert_volume(amount: f64, from: Unit, to: Unit) -> CalcResult<f64> {
    let from_ml = factor_in(from, UnitFamily::Volume)?;
    let to_ml = factor_in(to, UnitFamily::Volume)?;
    if from == to {
        return Ok(amount);
    }
    Ok(amount * from_ml / to_ml)
}

/// Convert between two weight units
pub fn convert_weight(amount: f64, from: Unit, to: Unit) -> CalcResult<f64> {
    let from_g = factor_in(from, UnitFamily::Weight)?;
    let to_g = factor_in(to, UnitFamily::Weight)?;
    if from == to {
        return Ok(amount);
    }
    Ok(amount * from_g / to_g)
}

/// Whether both units share a convertible family (pieces never do)
pub fn can_convert(from: Unit, to: Unit) -> bool {
    (is_volume_unit(from) && is_volume_unit(to)) || (is_weight_unit(from) && is_weight_unit(to))
}

/// Convert an amount, using the ingredient's density when crossing between
/// volume and weight
///
/// An empty ingredient name is allowed and resolves to the default density.
pub fn convert(amount: f64, from: Unit, to: Unit, ingredient_name: &str) -> CalcResult<f64> {
    convert_with(&DensityTable::standard(), amount, from, to, ingredient_name)
}

/// `convert` against an explicit density table
pub fn convert_with(
    table: &DensityTable,
    amount: f64,
    from: Unit,
    to: Unit,
    ingredient_name: &str,
) -> CalcResult<f64> {
    if can_convert(from, to) {
        return if is_volume_unit(from) {
            convert_volume(amount, from, to)
        } else {
            convert_weight(amount, from, to)
        };
    }

    match (from.family(), to.family()) {
        (UnitFamily::Volume, UnitFamily::Weight) => {
            volume_to_weight_with(table, amount, from, to, ingredient_name)
        }
        (UnitFamily::Weight, UnitFamily::Volume) => {
            weight_to_volume_with(table, amount, from, to, ingredient_name)
        }
        _ => Err(CalcError::UnsupportedConversion { from, to }),
    }
}

/// Convert a volume of an ingredient to a weight
pub fn volume_to_weight(amount: f64, from: Unit, to: Unit, ingredient_name: &str) -> CalcResult<f64> {
    volume_to_weight_with(&DensityTable::standard(), amount, from, to, ingredient_name)
}

/// Convert a weight of an ingredient to a volume
pub fn weight_to_volume(amount: f64, from: Unit, to: Unit, ingredient_name: &str) -> CalcResult<f64> {
    weight_to_volume_with(&DensityTable::standard(), amount, from, to, ingredient_name)
}

fn volume_to_weight_with(
    table: &DensityTable,
    amount: f64,
    from: Unit,
    to: Unit,
    ingredient_name: &str,
) -> CalcResult<f64> {
    let density = table.grams_per_cup(ingredient_name);
    let cups = convert_volume(amount, from, Unit::Cups)?;
    let grams = cups * density;
    tracing::debug!(
        "{} {} of '{}' -> {} g at {} g/cup",
        amount,
        from,
        ingredient_name,
        grams,
        density
    );
    convert_weight(grams, Unit::Grams, to)
}

fn weight_to_volume_with(
    table: &DensityTable,
    amount: f64,
    from: Unit,
    to: Unit,
    ingredient_name: &str,
) -> CalcResult<f64> {
    let density = table.grams_per_cup(ingredient_name);
    let grams = convert_weight(amount, from, Unit::Grams)?;
    let cups = grams / density;
    tracing::debug!(
        "{} {} of '{}' -> {} cups at {} g/cup",
        amount,
        from,
        ingredient_name,
        cups,
        density
    );
    convert_volume(cups, Unit::Cups, to)
}

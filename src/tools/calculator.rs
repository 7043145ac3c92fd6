//! Calculator MCP Tools
//!
//! Recipe scaling, unit conversion, baker's percentages, and unit hints.
//! Raw form-style input is cleaned up here before it reaches the core.

use rmcp::schemars;
use serde::{Deserialize, Serialize};

use crate::conversion::{
    can_convert, convert, format_number, round_for_display, DensityEntry, DensityTable, Unit,
    UnitFamily,
};
use crate::models::{Ingredient, ScaledIngredient};
use crate::scaling::{
    compute_bakers_percentages, normalize_yield, quick_scale, scale_factor, scale_ingredients,
    BakersEntry, BakersResult, ScaleSummary, DEFAULT_FLOUR_GRAMS,
};

/// One ingredient row as entered by the user
#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
pub struct IngredientRow {
    /// Ingredient name (rows with a blank name are skipped)
    pub name: String,
    /// Amount in `unit` (rows without a positive amount are skipped)
    pub amount: Option<f64>,
    /// One of: milliliters, cups, teaspoons, tablespoons, grams, ounces, pounds, pieces
    pub unit: String,
}

/// One baker's percentage row
#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
pub struct BakersRow {
    pub name: String,
    /// Weight in grams (missing counts as 0)
    pub grams: Option<f64>,
}

/// Response for scale_recipe
#[derive(Debug, Serialize)]
pub struct ScaleRecipeResponse {
    pub original_yield: f64,
    pub desired_yield: f64,
    pub scale: ScaleSummary,
    pub ingredients: Vec<ScaledIngredient>,
    pub skipped_rows: usize,
}

/// Response for convert_units
#[derive(Debug, Serialize)]
pub struct ConvertUnitsResponse {
    pub amount: f64,
    pub from: Unit,
    pub to: Unit,
    pub result: f64,
    pub display_result: f64,
    pub display: String,
    /// Density used for a volume/weight conversion
    pub grams_per_cup: Option<f64>,
}

/// Response for suggest_unit
#[derive(Debug, Serialize)]
pub struct SuggestUnitResponse {
    pub ingredient_name: String,
    pub unit: Option<Unit>,
    pub abbreviation: Option<&'static str>,
}

/// Response for list_densities
#[derive(Debug, Serialize)]
pub struct ListDensitiesResponse {
    pub entries: &'static [DensityEntry],
    pub default_grams_per_cup: f64,
}

/// One accepted unit
#[derive(Debug, Serialize)]
pub struct UnitInfo {
    pub unit: Unit,
    pub family: UnitFamily,
    pub abbreviation: &'static str,
}

/// Response for list_units
#[derive(Debug, Serialize)]
pub struct ListUnitsResponse {
    pub units: Vec<UnitInfo>,
}

/// Parse a unit name, rejecting anything outside the eight canonical names
pub fn parse_unit(raw: &str) -> Result<Unit, String> {
    raw.parse::<Unit>().map_err(|e| e.to_string())
}

/// Turn raw rows into ingredients
///
/// Rows with a blank name or a missing, non-finite, or non-positive amount
/// are dropped; returns the ingredients and the number of dropped rows.
pub fn parse_rows(rows: &[IngredientRow]) -> Result<(Vec<Ingredient>, usize), String> {
    let mut ingredients = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for row in rows {
        let name = row.name.trim();
        let amount = match row.amount {
            Some(a) if a.is_finite() && a > 0.0 => a,
            _ => {
                skipped += 1;
                tracing::warn!("Skipping ingredient row '{}' without a positive amount", name);
                continue;
            }
        };
        if name.is_empty() {
            skipped += 1;
            tracing::warn!("Skipping ingredient row without a name");
            continue;
        }

        let unit = parse_unit(&row.unit).map_err(|e| format!("Ingredient '{}': {}", name, e))?;
        ingredients.push(Ingredient::new(name, amount, unit));
    }

    Ok((ingredients, skipped))
}

/// Scale a list of ingredient rows from one yield to another
///
/// `multiplier`, when given, sets the desired yield to original * multiplier.
pub fn scale_recipe(
    rows: &[IngredientRow],
    original_yield: Option<f64>,
    desired_yield: Option<f64>,
    multiplier: Option<f64>,
) -> Result<ScaleRecipeResponse, String> {
    let (ingredients, skipped_rows) = parse_rows(rows)?;

    let original_yield = normalize_yield(original_yield);
    let desired_yield = match multiplier {
        Some(m) => normalize_yield(Some(quick_scale(original_yield, m))),
        None => normalize_yield(desired_yield),
    };

    let factor = scale_factor(original_yield, desired_yield)
        .map_err(|e| format!("Failed to compute scale factor: {}", e))?;

    tracing::debug!(
        "Scaling {} ingredients by {} ({} -> {})",
        ingredients.len(),
        factor,
        original_yield,
        desired_yield
    );

    Ok(ScaleRecipeResponse {
        original_yield,
        desired_yield,
        scale: ScaleSummary::new(factor),
        ingredients: scale_ingredients(&ingredients, factor),
        skipped_rows,
    })
}

/// Convert an amount between two units, using the ingredient's density
/// when crossing between volume and weight
pub fn convert_units(
    amount: f64,
    from: &str,
    to: &str,
    ingredient_name: Option<&str>,
) -> Result<ConvertUnitsResponse, String> {
    let from = parse_unit(from)?;
    let to = parse_unit(to)?;
    let name = ingredient_name.unwrap_or("");

    if !amount.is_finite() {
        return Err(format!("Amount must be a finite number, got {}", amount));
    }

    let cross_family = !can_convert(from, to);
    let result = if amount == 0.0 {
        0.0
    } else {
        convert(amount, from, to, name).map_err(|e| format!("Failed to convert: {}", e))?
    };

    let grams_per_cup = if cross_family && amount != 0.0 {
        Some(DensityTable::standard().grams_per_cup(name))
    } else {
        None
    };

    let display_result = round_for_display(result);

    Ok(ConvertUnitsResponse {
        amount,
        from,
        to,
        result,
        display_result,
        display: format!("{} {}", format_number(display_result), to.abbreviation()),
        grams_per_cup,
    })
}

/// Compute baker's percentages; flour defaults to 1000 g when missing or
/// not positive
pub fn bakers_percentages(flour_grams: Option<f64>, rows: &[BakersRow]) -> BakersResult {
    let flour = match flour_grams {
        Some(f) if f.is_finite() && f > 0.0 => f,
        Some(f) => {
            tracing::warn!("Flour weight {} is not positive, using {} g", f, DEFAULT_FLOUR_GRAMS);
            DEFAULT_FLOUR_GRAMS
        }
        None => DEFAULT_FLOUR_GRAMS,
    };

    let entries: Vec<BakersEntry> = rows
        .iter()
        .map(|row| {
            let grams = row.grams.filter(|g| g.is_finite()).unwrap_or(0.0);
            BakersEntry::new(row.name.trim(), grams)
        })
        .collect();

    compute_bakers_percentages(flour, &entries)
}

/// Suggest a unit for an ingredient name
pub fn suggest_unit(ingredient_name: &str) -> SuggestUnitResponse {
    let unit = crate::scaling::suggest_unit(ingredient_name);
    SuggestUnitResponse {
        ingredient_name: ingredient_name.to_string(),
        unit,
        abbreviation: unit.map(|u| u.abbreviation()),
    }
}

/// The density catalog, in lookup order
pub fn list_densities() -> ListDensitiesResponse {
    let table = DensityTable::standard();
    ListDensitiesResponse {
        entries: table.entries(),
        default_grams_per_cup: table.default_grams_per_cup(),
    }
}

/// Every accepted unit with its family and display abbreviation
pub fn list_units() -> ListUnitsResponse {
    let units = Unit::ALL
        .iter()
        .map(|&unit| UnitInfo {
            unit,
            family: unit.family(),
            abbreviation: unit.abbreviation(),
        })
        .collect();
    ListUnitsResponse { units }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, amount: Option<f64>, unit: &str) -> IngredientRow {
        IngredientRow {
            name: name.to_string(),
            amount,
            unit: unit.to_string(),
        }
    }

    #[test]
    fn test_scale_recipe_skips_incomplete_rows() {
        let rows = vec![
            row("flour", Some(500.0), "grams"),
            row("  ", Some(3.0), "pieces"),
            row("eggs", Some(0.0), "pieces"),
            row("sugar", None, "cups"),
            row("milk", Some(1.0), "cups"),
        ];
        let resp = scale_recipe(&rows, Some(4.0), Some(8.0), None).unwrap();
        assert_eq!(resp.skipped_rows, 3);
        assert_eq!(resp.ingredients.len(), 2);
        assert_eq!(resp.scale.label, "Scale Factor: 2x (200%)");
        assert_eq!(resp.ingredients[0].display_amount, "1000 g (2.2 lbs)");
        assert_eq!(resp.ingredients[1].scaled_amount, 2.0);
        assert_eq!(resp.ingredients[1].display_amount, "2 cups");
    }

    #[test]
    fn test_scale_recipe_defaults_bad_yields() {
        let rows = vec![row("butter", Some(2.0), "tablespoons")];
        let resp = scale_recipe(&rows, Some(0.0), None, None).unwrap();
        assert_eq!(resp.original_yield, 1.0);
        assert_eq!(resp.desired_yield, 1.0);
        assert_eq!(resp.ingredients[0].scaled_amount, 2.0);
    }

    #[test]
    fn test_scale_recipe_multiplier() {
        let rows = vec![row("eggs", Some(3.0), "pieces")];
        let resp = scale_recipe(&rows, Some(12.0), Some(100.0), Some(0.5)).unwrap();
        assert_eq!(resp.desired_yield, 6.0);
        assert_eq!(resp.scale.factor, 0.5);
        assert_eq!(resp.ingredients[0].display_amount, "2 pieces");
    }

    #[test]
    fn test_scale_recipe_rejects_unknown_unit() {
        let rows = vec![row("flour", Some(1.0), "liters")];
        let err = scale_recipe(&rows, Some(1.0), Some(2.0), None).unwrap_err();
        assert!(err.contains("flour"));
        assert!(err.contains("Invalid unit: liters"));
    }

    #[test]
    fn test_convert_units_within_family() {
        let resp = convert_units(1.0, "cups", "milliliters", None).unwrap();
        assert!((resp.result - 236.588).abs() < 1e-9);
        assert_eq!(resp.display_result, 237.0);
        assert_eq!(resp.display, "237 ml");
        assert_eq!(resp.grams_per_cup, None);
    }

    #[test]
    fn test_convert_units_with_density() {
        let resp = convert_units(1.0, "cups", "grams", Some("All-Purpose Flour")).unwrap();
        assert!((resp.result - 120.0).abs() < 1e-9);
        assert_eq!(resp.grams_per_cup, Some(120.0));

        let resp = convert_units(100.0, "grams", "cups", Some("honey")).unwrap();
        assert_eq!(resp.display_result, 0.294);
        assert_eq!(resp.grams_per_cup, Some(340.0));
    }

    #[test]
    fn test_convert_units_zero_and_errors() {
        let resp = convert_units(0.0, "pieces", "cups", None).unwrap();
        assert_eq!(resp.result, 0.0);
        assert_eq!(resp.display, "0 cups");

        let err = convert_units(2.0, "grams", "pieces", None).unwrap_err();
        assert!(err.contains("Cannot convert from grams to pieces"));
        assert!(convert_units(2.0, "g", "ounces", None).is_err());
        assert!(convert_units(f64::NAN, "grams", "ounces", None).is_err());
    }

    #[test]
    fn test_bakers_percentages_defaults_flour() {
        let rows = vec![
            BakersRow { name: "Water".to_string(), grams: Some(700.0) },
            BakersRow { name: "salt".to_string(), grams: None },
        ];
        let result = bakers_percentages(None, &rows);
        assert_eq!(result.flour_grams, 1000.0);
        // salt has no weight, so it is not listed
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].percentage, 70.0);
        assert_eq!(result.hydration, 70.0);
        assert_eq!(result.total_weight, 1700.0);

        let result = bakers_percentages(Some(-5.0), &rows);
        assert_eq!(result.flour_grams, 1000.0);
    }

    #[test]
    fn test_suggest_unit_and_densities() {
        let resp = suggest_unit("Eggs");
        assert_eq!(resp.unit, Some(Unit::Pieces));
        assert_eq!(resp.abbreviation, Some("pieces"));
        assert_eq!(suggest_unit("").unit, None);

        let densities = list_densities();
        assert_eq!(densities.entries.len(), 14);
        assert_eq!(densities.entries[0].key, "all-purpose flour");
        assert_eq!(densities.default_grams_per_cup, 120.0);
    }

    #[test]
    fn test_list_units() {
        let resp = list_units();
        assert_eq!(resp.units.len(), 8);
        assert_eq!(resp.units[0].unit, Unit::Grams);
        assert_eq!(resp.units[0].abbreviation, "g");

        let volume: Vec<Unit> = resp
            .units
            .iter()
            .filter(|u| u.family == UnitFamily::Volume)
            .map(|u| u.unit)
            .collect();
        assert_eq!(volume, vec![Unit::Cups, Unit::Milliliters, Unit::Teaspoons, Unit::Tablespoons]);

        // every listed name parses back
        for info in &resp.units {
            assert_eq!(parse_unit(info.unit.as_str()), Ok(info.unit));
        }
    }
}

//! Default units by ingredient
//!
//! Suggests the unit a baker would normally measure an ingredient in, so a new
//! ingredient line can be pre-filled.

use crate::conversion::Unit;

/// Known ingredient names and their usual unit, in match-priority order
static INGREDIENT_DEFAULTS: &[(&str, Unit)] = &[
    ("flour", Unit::Grams),
    ("bread flour", Unit::Grams),
    ("all-purpose flour", Unit::Grams),
    ("whole wheat flour", Unit::Grams),
    ("sugar", Unit::Tablespoons),
    ("brown sugar", Unit::Tablespoons),
    ("white sugar", Unit::Tablespoons),
    ("powdered sugar", Unit::Tablespoons),
    ("eggs", Unit::Pieces),
    ("egg", Unit::Pieces),
    ("egg yolk", Unit::Pieces),
    ("egg white", Unit::Pieces),
    ("milk", Unit::Milliliters),
    ("whole milk", Unit::Milliliters),
    ("buttermilk", Unit::Milliliters),
    ("water", Unit::Milliliters),
    ("butter", Unit::Tablespoons),
    ("unsalted butter", Unit::Tablespoons),
    ("salted butter", Unit::Tablespoons),
    ("salt", Unit::Teaspoons),
    ("sea salt", Unit::Teaspoons),
    ("vanilla", Unit::Teaspoons),
    ("vanilla extract", Unit::Teaspoons),
    ("baking powder", Unit::Teaspoons),
    ("baking soda", Unit::Teaspoons),
    ("yeast", Unit::Teaspoons),
    ("active dry yeast", Unit::Teaspoons),
    ("instant yeast", Unit::Teaspoons),
    ("oil", Unit::Milliliters),
    ("olive oil", Unit::Milliliters),
    ("vegetable oil", Unit::Milliliters),
    ("honey", Unit::Grams),
    ("maple syrup", Unit::Milliliters),
    ("cream", Unit::Milliliters),
    ("heavy cream", Unit::Milliliters),
    ("sour cream", Unit::Grams),
    ("yogurt", Unit::Grams),
    ("cheese", Unit::Grams),
    ("cocoa powder", Unit::Grams),
    ("chocolate", Unit::Grams),
    ("nuts", Unit::Grams),
    ("almonds", Unit::Grams),
    ("walnuts", Unit::Grams),
];

/// Last-resort keyword rules, checked in order
static KEYWORD_FALLBACKS: &[(&[&str], Unit)] = &[
    (&["flour"], Unit::Grams),
    (&["sugar"], Unit::Tablespoons),
    (&["milk"], Unit::Milliliters),
    (&["water"], Unit::Milliliters),
    (&["oil"], Unit::Milliliters),
    (&["butter"], Unit::Tablespoons),
    (&["egg"], Unit::Pieces),
    (&["yeast"], Unit::Teaspoons),
    (&["salt"], Unit::Teaspoons),
    (&["vanilla"], Unit::Teaspoons),
    (&["baking"], Unit::Teaspoons),
    (&["powder"], Unit::Teaspoons),
    (&["spice", "cinnamon", "nutmeg"], Unit::Teaspoons),
];

/// Suggest a unit for an ingredient name
///
/// Exact table names win, then the first table entry where either name
/// contains the other, then the keyword rules.
pub fn suggest_unit(ingredient_name: &str) -> Option<Unit> {
    let name = ingredient_name.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }

    if let Some((_, unit)) = INGREDIENT_DEFAULTS.iter().find(|(key, _)| *key == name) {
        return Some(*unit);
    }

    if let Some((_, unit)) = INGREDIENT_DEFAULTS
        .iter()
        .find(|(key, _)| name.contains(key) || key.contains(name.as_str()))
    {
        return Some(*unit);
    }

    KEYWORD_FALLBACKS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| name.contains(k)))
        .map(|(_, unit)| *unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matches() {
        assert_eq!(suggest_unit("bread flour"), Some(Unit::Grams));
        assert_eq!(suggest_unit("Eggs"), Some(Unit::Pieces));
        assert_eq!(suggest_unit("  buttermilk "), Some(Unit::Milliliters));
        assert_eq!(suggest_unit("sour cream"), Some(Unit::Grams));
    }

    #[test]
    fn test_exact_beats_partial() {
        // "sour cream" would partially match "cream" (ml) first, but it is an
        // exact table entry
        assert_eq!(suggest_unit("sour cream"), Some(Unit::Grams));
        assert_eq!(suggest_unit("buttermilk"), Some(Unit::Milliliters));
    }

    #[test]
    fn test_partial_matches() {
        assert_eq!(suggest_unit("rye flour"), Some(Unit::Grams));
        assert_eq!(suggest_unit("dark chocolate chips"), Some(Unit::Grams));
        assert_eq!(suggest_unit("large eggs"), Some(Unit::Pieces));
        // table order: "milk" comes before "butter" in the partial scan
        assert_eq!(suggest_unit("butter milk powder"), Some(Unit::Milliliters));
        // the typed name can also be a fragment of a table key
        assert_eq!(suggest_unit("walnut"), Some(Unit::Grams));
    }

    #[test]
    fn test_keyword_fallbacks() {
        assert_eq!(suggest_unit("ground cinnamon"), Some(Unit::Teaspoons));
        assert_eq!(suggest_unit("nutmeg"), Some(Unit::Teaspoons));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(suggest_unit(""), None);
        assert_eq!(suggest_unit("   "), None);
        assert_eq!(suggest_unit("zucchini"), None);
    }
}

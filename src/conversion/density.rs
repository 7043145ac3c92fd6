//! Ingredient densities
//!
//! Grams-per-cup figures for common baking ingredients, used to cross between
//! volume and weight.

use serde::Serialize;

/// Density used when no catalog key matches (all-purpose flour)
pub const DEFAULT_GRAMS_PER_CUP: f64 = 120.0;

/// One catalog row
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityEntry {
    /// Substring matched against the lowercased ingredient name
    pub key: &'static str,
    pub grams_per_cup: f64,
}

const fn entry(key: &'static str, grams_per_cup: f64) -> DensityEntry {
    DensityEntry { key, grams_per_cup }
}

/// Specific variants precede their generic key so "brown sugar" never
/// resolves to plain "sugar".
static STANDARD_ENTRIES: [DensityEntry; 14] = [
    entry("all-purpose flour", 120.0),
    entry("bread flour", 120.0),
    entry("whole wheat flour", 113.0),
    entry("cake flour", 114.0),
    entry("flour", 120.0),
    entry("granulated sugar", 200.0),
    entry("brown sugar", 213.0),
    entry("powdered sugar", 120.0),
    entry("sugar", 200.0),
    entry("butter", 227.0),
    entry("oil", 218.0),
    entry("honey", 340.0),
    entry("milk", 245.0),
    entry("water", 236.588),
];

/// Ordered, immutable ingredient density catalog
#[derive(Debug, Clone, Copy)]
pub struct DensityTable {
    entries: &'static [DensityEntry],
    default_grams_per_cup: f64,
}

impl DensityTable {
    /// The built-in baking catalog
    pub fn standard() -> Self {
        Self {
            entries: &STANDARD_ENTRIES,
            default_grams_per_cup: DEFAULT_GRAMS_PER_CUP,
        }
    }

    pub fn entries(&self) -> &'static [DensityEntry] {
        self.entries
    }

    pub fn default_grams_per_cup(&self) -> f64 {
        self.default_grams_per_cup
    }

    /// First catalog entry whose key occurs in the ingredient name
    pub fn find(&self, ingredient_name: &str) -> Option<&'static DensityEntry> {
        let lower = ingredient_name.to_lowercase();
        self.entries.iter().find(|e| lower.contains(e.key))
    }

    /// Grams per cup for an ingredient, falling back to the default density
    pub fn grams_per_cup(&self, ingredient_name: &str) -> f64 {
        match self.find(ingredient_name) {
            Some(found) => found.grams_per_cup,
            None => {
                tracing::debug!(
                    "No density for '{}', using default {} g/cup",
                    ingredient_name,
                    self.default_grams_per_cup
                );
                self.default_grams_per_cup
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_keys() {
        let table = DensityTable::standard();
        assert_eq!(table.grams_per_cup("honey"), 340.0);
        assert_eq!(table.grams_per_cup("butter"), 227.0);
        assert_eq!(table.grams_per_cup("whole wheat flour"), 113.0);
    }

    #[test]
    fn test_substring_case_insensitive() {
        let table = DensityTable::standard();
        assert_eq!(table.grams_per_cup("Light Brown Sugar, packed"), 213.0);
        assert_eq!(table.grams_per_cup("Cake Flour (sifted)"), 114.0);
        assert_eq!(table.grams_per_cup("Olive OIL"), 218.0);
    }

    #[test]
    fn test_first_match_wins() {
        let table = DensityTable::standard();
        // "butter" is declared before "milk"
        assert_eq!(table.find("buttermilk").map(|e| e.key), Some("butter"));
        // generic "flour" only after the specific variants
        assert_eq!(table.find("rye flour").map(|e| e.key), Some("flour"));
    }

    #[test]
    fn test_default_density() {
        let table = DensityTable::standard();
        assert!(table.find("cocoa powder").is_none());
        assert_eq!(table.grams_per_cup("cocoa powder"), DEFAULT_GRAMS_PER_CUP);
        assert_eq!(table.grams_per_cup(""), DEFAULT_GRAMS_PER_CUP);
    }
}

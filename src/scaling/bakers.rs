//! Baker's percentages
//!
//! Every ingredient is expressed relative to the flour weight, which is the
//! fixed 100% baseline.

use serde::{Deserialize, Serialize};

use crate::conversion::{round_half_up, round_to};

/// Flour weight assumed when none is given
pub const DEFAULT_FLOUR_GRAMS: f64 = 1000.0;

/// Name fragments that count toward hydration
pub const HYDRATION_KEYWORDS: [&str; 3] = ["water", "milk", "liquid"];

/// A weighed ingredient going into the percentage table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakersEntry {
    pub name: String,
    pub grams: f64,
}

impl BakersEntry {
    pub fn new(name: impl Into<String>, grams: f64) -> Self {
        Self {
            name: name.into(),
            grams,
        }
    }
}

/// One row of the percentage table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageEntry {
    pub name: String,
    pub grams: f64,
    /// Rounded to one decimal place
    pub percentage: f64,
}

/// Full baker's percentage breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakersResult {
    pub flour_grams: f64,
    pub entries: Vec<PercentageEntry>,
    /// Flour plus every entry, whole grams
    pub total_weight: f64,
    /// 100 plus every entry's percentage, whole percent
    pub total_percentage: f64,
    /// Percent of water-like ingredients, whole percent
    pub hydration: f64,
}

/// Percentage of flour weight; zero when there is no flour
pub fn percentage_of_flour(grams: f64, flour_grams: f64) -> f64 {
    if flour_grams > 0.0 {
        grams / flour_grams * 100.0
    } else {
        0.0
    }
}

/// Whether an ingredient name counts toward hydration
pub fn is_hydrating(name: &str) -> bool {
    let lower = name.to_lowercase();
    HYDRATION_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Compute per-ingredient percentages, totals, and hydration
///
/// Totals and hydration are summed from the unrounded percentages and only
/// rounded at the end. Entries with a blank name or no positive weight still
/// count toward the totals but get no row in the table.
pub fn compute_bakers_percentages(flour_grams: f64, entries: &[BakersEntry]) -> BakersResult {
    let mut total_weight = flour_grams;
    let mut total_percentage = 100.0;
    let mut hydration = 0.0;
    let mut rows = Vec::with_capacity(entries.len());

    for entry in entries {
        let percentage = percentage_of_flour(entry.grams, flour_grams);

        total_weight += entry.grams;
        total_percentage += percentage;
        if is_hydrating(&entry.name) {
            hydration += percentage;
        }

        let listed = !entry.name.trim().is_empty() && entry.grams > 0.0;
        if !listed {
            continue;
        }
        rows.push(PercentageEntry {
            name: entry.name.clone(),
            grams: entry.grams,
            percentage: round_to(percentage, 1),
        });
    }

    BakersResult {
        flour_grams,
        entries: rows,
        total_weight: round_half_up(total_weight),
        total_percentage: round_half_up(total_percentage),
        hydration: round_half_up(hydration),
    }
}

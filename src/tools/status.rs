//! Status Tool
//!
//! Provides runtime status information about the calculator service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage notes for AI assistants
pub const CALCULATOR_INSTRUCTIONS: &str = r#"
# Baker's Calculator Instructions

## Units

Exactly eight unit names are accepted, always lowercase:

| Family | Units |
|--------|-------|
| Volume | milliliters, cups, teaspoons, tablespoons |
| Weight | grams, ounces, pounds |
| Count  | pieces |

Anything else ("g", "tbsp", "liters") is rejected. `list_units` returns the
names with their family and abbreviation. Call `suggest_unit` when unsure
which unit fits an ingredient.

## Scaling

`scale_recipe` multiplies every ingredient by desired_yield / original_yield.
Units are never changed while scaling. Rows with a blank name or an amount of
zero or less are skipped. Missing or non-positive yields count as 1.

Display strings carry one hint at most:
- grams over 453 show pounds: "1000 g (2.2 lbs)"
- milliliters over 236 show cups: "500 ml (2.11 cups)"
- grams of 15 or more show approximate tablespoons: "30 g (~2 tbsp)"

## Converting

`convert_units` converts within volume or weight directly. Volume to weight
(and back) goes through cups using the ingredient's grams-per-cup density,
found by the first catalog key contained in the ingredient name (see
`list_densities`). Unknown ingredients use 120 g per cup. Pieces never
convert.

## Baker's Percentages

`bakers_percentages` expresses each ingredient as a percentage of flour
weight (flour = 100%). Hydration sums the percentages of ingredients whose
name contains water, milk, or liquid. Flour weight defaults to 1000 g. Rows
with a blank name or no weight still count toward the totals but are not
listed.

## Saved Recipes

Recipes are stored by name; saving an existing name replaces it. Loading a
recipe marks it as used, and `list_recipes` shows the most recently used
first. `export_recipes` / `import_recipes` move collections as JSON; imported
ingredients with a blank name or an amount of zero or less are dropped, and
recipes left without ingredients are skipped.
"#;

/// Runtime status of the calculator service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub version_label: String,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> ServiceStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            version_label: build_info.version_label(),
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

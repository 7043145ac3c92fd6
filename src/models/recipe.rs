//! Saved recipe model
//!
//! A named recipe with its yields and ingredient list, stored one row per
//! name. Saving under an existing name replaces that recipe.

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, types::Type, Connection, Row};
use serde::{Deserialize, Serialize};

use super::Ingredient;
use crate::db::{DbError, DbResult};

/// Stored layout, matching SQLite `strftime('%Y-%m-%d %H:%M:%f')`
const DB_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Layouts accepted when reading back, with and without fractional seconds
const DB_TIMESTAMP_LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// A saved recipe
///
/// Serializes with the camelCase keys of the calculator's storage format, so
/// exported collections can be imported back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    pub name: String,
    pub original_yield: f64,
    pub desired_yield: f64,
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub last_used: String,
}

/// Data for saving a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRecipeCreate {
    pub name: String,
    #[serde(default = "default_yield")]
    pub original_yield: f64,
    #[serde(default = "default_yield")]
    pub desired_yield: f64,
    pub ingredients: Vec<Ingredient>,
}

fn default_yield() -> f64 {
    1.0
}

impl SavedRecipe {
    /// Create a SavedRecipe from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let ingredients_json: String = row.get("ingredients")?;
        let ingredients = serde_json::from_str(&ingredients_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

        Ok(Self {
            name: row.get("name")?,
            original_yield: row.get("original_yield")?,
            desired_yield: row.get("desired_yield")?,
            ingredients,
            created_at: row.get("created_at")?,
            last_used: row.get("last_used")?,
        })
    }

    /// Insert a recipe, or replace the one with the same name
    ///
    /// Replacing keeps the original `created_at`; both paths stamp `last_used`.
    pub fn save(conn: &Connection, data: &SavedRecipeCreate) -> DbResult<Self> {
        let ingredients = serde_json::to_string(&data.ingredients)?;

        conn.execute(
            r#"
            INSERT INTO saved_recipes (name, original_yield, desired_yield, ingredients, use_seq)
            VALUES (?1, ?2, ?3, ?4, (SELECT COALESCE(MAX(use_seq), 0) + 1 FROM saved_recipes))
            ON CONFLICT(name) DO UPDATE SET
                original_yield = excluded.original_yield,
                desired_yield = excluded.desired_yield,
                ingredients = excluded.ingredients,
                last_used = strftime('%Y-%m-%d %H:%M:%f', 'now'),
                use_seq = excluded.use_seq
            "#,
            params![data.name, data.original_yield, data.desired_yield, ingredients],
        )?;

        tracing::info!(
            "Saved recipe '{}' ({} ingredients)",
            data.name,
            data.ingredients.len()
        );

        Self::get_by_name(conn, &data.name)?.ok_or_else(|| DbError::NotFound(data.name.clone()))
    }

    /// Get a recipe by name
    pub fn get_by_name(conn: &Connection, name: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM saved_recipes WHERE name = ?1")?;

        let result = stmt.query_row([name], Self::from_row);
        match result {
            Ok(recipe) => Ok(Some(recipe)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all recipes, most recently used first
    ///
    /// Uses stamped within the same millisecond fall back to save/load order.
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM saved_recipes ORDER BY last_used DESC, use_seq DESC, name ASC",
        )?;

        let recipes = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// Count saved recipes
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM saved_recipes", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Mark a recipe as just used. Returns false if it does not exist
    pub fn touch(conn: &Connection, name: &str) -> DbResult<bool> {
        let rows = conn.execute(
            r#"
            UPDATE saved_recipes SET
                last_used = strftime('%Y-%m-%d %H:%M:%f', 'now'),
                use_seq = (SELECT COALESCE(MAX(use_seq), 0) + 1 FROM saved_recipes)
            WHERE name = ?1
            "#,
            [name],
        )?;
        Ok(rows > 0)
    }

    /// Delete a recipe by name. Returns Ok(false) if not found
    pub fn delete(conn: &Connection, name: &str) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM saved_recipes WHERE name = ?1", [name])?;
        Ok(rows > 0)
    }

    /// Upsert full records, keeping their timestamps, in one transaction
    ///
    /// Missing or unreadable timestamps are stamped with the current time.
    pub fn import(conn: &mut Connection, records: &[SavedRecipe]) -> DbResult<usize> {
        let now = Utc::now().format(DB_TIMESTAMP_FORMAT).to_string();
        let tx = conn.transaction()?;

        for record in records {
            let ingredients = serde_json::to_string(&record.ingredients)?;
            let created_at = normalize_timestamp(&record.created_at).unwrap_or_else(|| now.clone());
            let last_used = normalize_timestamp(&record.last_used).unwrap_or_else(|| now.clone());

            tx.execute(
                r#"
                INSERT INTO saved_recipes
                    (name, original_yield, desired_yield, ingredients, created_at, last_used, use_seq)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6,
                    (SELECT COALESCE(MAX(use_seq), 0) + 1 FROM saved_recipes))
                ON CONFLICT(name) DO UPDATE SET
                    original_yield = excluded.original_yield,
                    desired_yield = excluded.desired_yield,
                    ingredients = excluded.ingredients,
                    created_at = excluded.created_at,
                    last_used = excluded.last_used,
                    use_seq = excluded.use_seq
                "#,
                params![
                    record.name,
                    record.original_yield,
                    record.desired_yield,
                    ingredients,
                    created_at,
                    last_used,
                ],
            )?;
        }

        tx.commit()?;
        tracing::info!("Imported {} recipes", records.len());
        Ok(records.len())
    }
}

/// Parse either an RFC 3339 timestamp or the database layout (taken as UTC)
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    DB_TIMESTAMP_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .map(|naive| naive.and_utc())
}

/// Re-render a timestamp in the database layout so rows sort chronologically
fn normalize_timestamp(value: &str) -> Option<String> {
    parse_timestamp(value).map(|t| t.format(DB_TIMESTAMP_FORMAT).to_string())
}

/// Describe how long ago a recipe was last used
///
/// Under an hour is "Just now"; then hours, days, and weeks; from 30 days on,
/// the calendar date. Unparseable input is returned as-is.
pub fn format_last_used(timestamp: &str, now: DateTime<Utc>) -> String {
    let Some(then) = parse_timestamp(timestamp) else {
        return timestamp.to_string();
    };

    let hours = (now - then).num_seconds() as f64 / 3600.0;

    if hours < 1.0 {
        "Just now".to_string()
    } else if hours < 24.0 {
        plural(hours.floor() as i64, "hour")
    } else if hours < 168.0 {
        plural((hours / 24.0).floor() as i64, "day")
    } else if hours < 720.0 {
        plural((hours / 168.0).floor() as i64, "week")
    } else {
        then.format("%Y-%m-%d").to_string()
    }
}

fn plural(count: i64, noun: &str) -> String {
    if count == 1 {
        format!("1 {} ago", noun)
    } else {
        format!("{} {}s ago", count, noun)
    }
}

//! Saved Recipe MCP Tools
//!
//! Tools for saving, loading, listing, and moving recipes between stores.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use super::calculator::{parse_rows, IngredientRow};
use crate::db::Database;
use crate::models::{
    format_last_used, parse_timestamp, Ingredient, SavedRecipe, SavedRecipeCreate, ScaledIngredient,
};
use crate::scaling::{normalize_yield, scale_factor, scale_ingredients, ScaleSummary};

/// Response for save_recipe
#[derive(Debug, Serialize)]
pub struct SaveRecipeResponse {
    pub name: String,
    pub ingredient_count: usize,
    pub skipped_rows: usize,
    /// True when an existing recipe with this name was replaced
    pub replaced: bool,
    pub created_at: String,
    pub last_used: String,
}

/// Full recipe with its scaled view
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    pub recipe: SavedRecipe,
    pub scale: ScaleSummary,
    pub scaled_ingredients: Vec<ScaledIngredient>,
}

/// Recipe summary for listing
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub name: String,
    pub original_yield: f64,
    pub desired_yield: f64,
    pub ingredient_count: usize,
    pub last_used: String,
    pub last_used_display: String,
}

/// Response for list_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub count: usize,
}

/// Response for delete_recipe
#[derive(Debug, Serialize)]
pub struct DeleteRecipeResponse {
    pub success: bool,
    pub name: String,
}

/// Response for import_recipes
#[derive(Debug, Serialize)]
pub struct ImportRecipesResponse {
    pub imported: usize,
    /// Records without a name or without a usable ingredient
    pub skipped: usize,
    pub skipped_ingredients: usize,
    pub total: i64,
}

/// Save a recipe under its name, replacing any recipe with the same name
pub fn save_recipe(
    db: &Database,
    name: &str,
    original_yield: Option<f64>,
    desired_yield: Option<f64>,
    rows: &[IngredientRow],
) -> Result<SaveRecipeResponse, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Recipe name is required".to_string());
    }

    let (ingredients, skipped_rows) = parse_rows(rows)?;
    if ingredients.is_empty() {
        return Err("No ingredients found".to_string());
    }

    let data = SavedRecipeCreate {
        name: name.to_string(),
        original_yield: normalize_yield(original_yield),
        desired_yield: normalize_yield(desired_yield),
        ingredients,
    };

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let replaced = SavedRecipe::get_by_name(&conn, name)
        .map_err(|e| format!("Failed to check recipe: {}", e))?
        .is_some();

    let recipe =
        SavedRecipe::save(&conn, &data).map_err(|e| format!("Failed to save recipe: {}", e))?;

    Ok(SaveRecipeResponse {
        name: recipe.name,
        ingredient_count: recipe.ingredients.len(),
        skipped_rows,
        replaced,
        created_at: recipe.created_at,
        last_used: recipe.last_used,
    })
}

/// Load a recipe by name and mark it as used
pub fn load_recipe(db: &Database, name: &str) -> Result<Option<RecipeDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let found = SavedRecipe::touch(&conn, name)
        .map_err(|e| format!("Failed to update recipe: {}", e))?;
    if !found {
        return Ok(None);
    }

    let recipe = match SavedRecipe::get_by_name(&conn, name)
        .map_err(|e| format!("Failed to load recipe: {}", e))?
    {
        Some(r) => r,
        None => return Ok(None),
    };

    let factor = scale_factor(
        normalize_yield(Some(recipe.original_yield)),
        normalize_yield(Some(recipe.desired_yield)),
    )
    .map_err(|e| format!("Failed to scale recipe: {}", e))?;

    Ok(Some(RecipeDetail {
        scale: ScaleSummary::new(factor),
        scaled_ingredients: scale_ingredients(&recipe.ingredients, factor),
        recipe,
    }))
}

/// List saved recipes, most recently used first
pub fn list_recipes(db: &Database) -> Result<ListRecipesResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipes =
        SavedRecipe::list(&conn).map_err(|e| format!("Failed to list recipes: {}", e))?;

    let now = Utc::now();
    let summaries: Vec<RecipeSummary> = recipes
        .into_iter()
        .map(|r| RecipeSummary {
            last_used_display: format_last_used(&r.last_used, now),
            name: r.name,
            original_yield: r.original_yield,
            desired_yield: r.desired_yield,
            ingredient_count: r.ingredients.len(),
            last_used: r.last_used,
        })
        .collect();

    Ok(ListRecipesResponse {
        count: summaries.len(),
        recipes: summaries,
    })
}

/// Delete a recipe by name
pub fn delete_recipe(db: &Database, name: &str) -> Result<DeleteRecipeResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let success =
        SavedRecipe::delete(&conn, name).map_err(|e| format!("Failed to delete recipe: {}", e))?;

    if success {
        tracing::info!("Deleted recipe '{}'", name);
    }

    Ok(DeleteRecipeResponse {
        success,
        name: name.to_string(),
    })
}

/// Export all recipes as a JSON array in the storage format
///
/// Timestamps are written as RFC 3339 UTC with milliseconds.
pub fn export_recipes(db: &Database) -> Result<String, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let recipes: Vec<SavedRecipe> = SavedRecipe::list(&conn)
        .map_err(|e| format!("Failed to list recipes: {}", e))?
        .into_iter()
        .map(|mut r| {
            r.created_at = to_rfc3339(&r.created_at);
            r.last_used = to_rfc3339(&r.last_used);
            r
        })
        .collect();

    serde_json::to_string_pretty(&recipes).map_err(|e| format!("Failed to export recipes: {}", e))
}

fn to_rfc3339(timestamp: &str) -> String {
    parse_timestamp(timestamp)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| timestamp.to_string())
}

/// Import recipes from a JSON array in the storage format
///
/// Ingredients with a blank name or a non-positive amount are dropped the
/// same way saving drops them. Records left without a name or without any
/// ingredient are skipped; existing names are replaced.
pub fn import_recipes(db: &Database, json: &str) -> Result<ImportRecipesResponse, String> {
    let records: Vec<SavedRecipe> =
        serde_json::from_str(json).map_err(|e| format!("Invalid recipe data: {}", e))?;

    let total_records = records.len();
    let mut dropped_ingredients = 0;
    let valid: Vec<SavedRecipe> = records
        .into_iter()
        .filter_map(|mut r| {
            r.name = r.name.trim().to_string();
            if r.name.is_empty() {
                tracing::warn!("Skipping imported recipe without a name");
                return None;
            }

            let before = r.ingredients.len();
            r.ingredients.retain(Ingredient::is_usable);
            for ingredient in &mut r.ingredients {
                ingredient.name = ingredient.name.trim().to_string();
            }
            dropped_ingredients += before - r.ingredients.len();
            if r.ingredients.is_empty() {
                tracing::warn!("Skipping imported recipe '{}' without ingredients", r.name);
                return None;
            }

            r.original_yield = normalize_yield(Some(r.original_yield));
            r.desired_yield = normalize_yield(Some(r.desired_yield));
            Some(r)
        })
        .collect();
    let skipped = total_records - valid.len();
    if dropped_ingredients > 0 {
        tracing::warn!("Dropped {} unusable imported ingredients", dropped_ingredients);
    }

    let (imported, total) = db
        .with_conn_mut(|conn| {
            let imported = SavedRecipe::import(conn, &valid)?;
            let total = SavedRecipe::count(conn)?;
            Ok((imported, total))
        })
        .map_err(|e| format!("Failed to import recipes: {}", e))?;

    Ok(ImportRecipesResponse {
        imported,
        skipped,
        skipped_ingredients: dropped_ingredients,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::Unit;
    use crate::db::migrations::run_migrations;

    fn setup() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| run_migrations(conn)).unwrap();
        db
    }

    fn rows() -> Vec<IngredientRow> {
        vec![
            IngredientRow { name: "flour".to_string(), amount: Some(250.0), unit: "grams".to_string() },
            IngredientRow { name: "milk".to_string(), amount: Some(1.0), unit: "cups".to_string() },
            IngredientRow { name: "".to_string(), amount: Some(1.0), unit: "cups".to_string() },
        ]
    }

    #[test]
    fn test_save_recipe_validation() {
        let db = setup();
        assert_eq!(
            save_recipe(&db, "   ", Some(1.0), Some(2.0), &rows()).unwrap_err(),
            "Recipe name is required"
        );
        let empty = vec![IngredientRow { name: "salt".to_string(), amount: None, unit: "teaspoons".to_string() }];
        assert_eq!(
            save_recipe(&db, "Pancakes", Some(1.0), Some(2.0), &empty).unwrap_err(),
            "No ingredients found"
        );
    }

    #[test]
    fn test_save_and_load_recipe() {
        let db = setup();
        let saved = save_recipe(&db, " Pancakes ", Some(4.0), Some(8.0), &rows()).unwrap();
        assert_eq!(saved.name, "Pancakes");
        assert_eq!(saved.ingredient_count, 2);
        assert_eq!(saved.skipped_rows, 1);
        assert!(!saved.replaced);

        let again = save_recipe(&db, "Pancakes", Some(4.0), Some(12.0), &rows()).unwrap();
        assert!(again.replaced);

        let detail = load_recipe(&db, "Pancakes").unwrap().unwrap();
        assert_eq!(detail.recipe.desired_yield, 12.0);
        assert_eq!(detail.scale.factor, 3.0);
        assert_eq!(detail.scaled_ingredients[0].scaled_amount, 750.0);
        assert_eq!(detail.scaled_ingredients[0].display_amount, "750 g (1.65 lbs)");
        assert_eq!(detail.scaled_ingredients[1].unit, Unit::Cups);

        assert!(load_recipe(&db, "Waffles").unwrap().is_none());
    }

    #[test]
    fn test_list_and_delete_recipes() {
        let db = setup();
        save_recipe(&db, "Pancakes", None, None, &rows()).unwrap();
        save_recipe(&db, "Waffles", None, None, &rows()).unwrap();

        let list = list_recipes(&db).unwrap();
        assert_eq!(list.count, 2);
        assert!(list.recipes.iter().all(|r| r.last_used_display == "Just now"));

        assert!(delete_recipe(&db, "Pancakes").unwrap().success);
        assert!(!delete_recipe(&db, "Pancakes").unwrap().success);
        assert_eq!(list_recipes(&db).unwrap().count, 1);
    }

    #[test]
    fn test_export_then_import_into_fresh_store() {
        let db = setup();
        save_recipe(&db, "Pancakes", Some(2.0), Some(6.0), &rows()).unwrap();

        let json = export_recipes(&db).unwrap();
        assert!(json.contains("\"originalYield\""));
        assert!(json.contains("\"lastUsed\""));

        let other = setup();
        let resp = import_recipes(&other, &json).unwrap();
        assert_eq!(resp.imported, 1);
        assert_eq!(resp.skipped, 0);
        assert_eq!(resp.total, 1);

        let detail = load_recipe(&other, "Pancakes").unwrap().unwrap();
        assert_eq!(detail.scale.factor, 3.0);
        assert_eq!(detail.recipe.ingredients.len(), 2);
    }

    #[test]
    fn test_import_rfc3339_records() {
        let db = setup();
        let json = r#"[
            {"name": "Bagels", "originalYield": 8, "desiredYield": 16,
             "ingredients": [{"name": "bread flour", "amount": 500, "unit": "grams"}],
             "createdAt": "2024-11-02T09:15:00.000Z", "lastUsed": "2024-12-24T18:00:00.000Z"},
            {"name": "", "originalYield": 1, "desiredYield": 1, "ingredients": []}
        ]"#;
        let resp = import_recipes(&db, json).unwrap();
        assert_eq!(resp.imported, 1);
        assert_eq!(resp.skipped, 1);

        let list = list_recipes(&db).unwrap();
        assert_eq!(list.recipes[0].last_used, "2024-12-24 18:00:00.000");
        assert_eq!(list.recipes[0].last_used_display, "2024-12-24");

        assert!(import_recipes(&db, "not json").unwrap_err().starts_with("Invalid recipe data"));
    }

    #[test]
    fn test_import_drops_unusable_ingredients() {
        let db = setup();
        let json = r#"[
            {"name": "Scones", "originalYield": 8, "desiredYield": 8,
             "ingredients": [
                {"name": " flour ", "amount": 300, "unit": "grams"},
                {"name": "butter", "amount": -5, "unit": "grams"},
                {"name": "", "amount": 2, "unit": "teaspoons"},
                {"name": "milk", "amount": 0, "unit": "cups"}
             ]},
            {"name": "Air", "originalYield": 1, "desiredYield": 1, "ingredients": []},
            {"name": "Nothing", "originalYield": 1, "desiredYield": 1,
             "ingredients": [{"name": "sugar", "amount": 0, "unit": "cups"}]}
        ]"#;
        let resp = import_recipes(&db, json).unwrap();
        assert_eq!(resp.imported, 1);
        assert_eq!(resp.skipped, 2);
        assert_eq!(resp.skipped_ingredients, 4);
        assert_eq!(resp.total, 1);

        let detail = load_recipe(&db, "Scones").unwrap().unwrap();
        assert_eq!(detail.recipe.ingredients, vec![Ingredient::new("flour", 300.0, Unit::Grams)]);
        assert!(load_recipe(&db, "Air").unwrap().is_none());
        assert!(load_recipe(&db, "Nothing").unwrap().is_none());
    }

    #[test]
    fn test_loaded_recipe_lists_first() {
        let db = setup();
        save_recipe(&db, "Zebra Cake", None, None, &rows()).unwrap();
        save_recipe(&db, "Apple Pie", None, None, &rows()).unwrap();
        assert_eq!(list_recipes(&db).unwrap().recipes[0].name, "Apple Pie");

        load_recipe(&db, "Zebra Cake").unwrap().unwrap();
        let names: Vec<String> = list_recipes(&db).unwrap().recipes.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Zebra Cake", "Apple Pie"]);
    }
}

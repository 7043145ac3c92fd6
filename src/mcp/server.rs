//! Baker's Calculator MCP Server Implementation
//!
//! Implements the MCP server with all calculator and recipe tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::tools::calculator::{self, BakersRow, IngredientRow};
use crate::tools::recipes;
use crate::tools::status::StatusTracker;

/// Baker's Calculator MCP Service
#[derive(Clone)]
pub struct BakerscaleService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<BakerscaleService>,
}

impl BakerscaleService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Calculator Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScaleRecipeParams {
    /// Ingredient rows; rows with a blank name or no positive amount are skipped
    pub ingredients: Vec<IngredientRow>,
    /// Yield the recipe was written for (default 1)
    pub original_yield: Option<f64>,
    /// Yield wanted (default 1)
    pub desired_yield: Option<f64>,
    /// Quick-scale multiplier (e.g. 0.5, 2, 3); overrides desired_yield
    pub multiplier: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertUnitsParams {
    pub amount: f64,
    /// Source unit (milliliters, cups, teaspoons, tablespoons, grams, ounces, pounds)
    pub from: String,
    /// Target unit
    pub to: String,
    /// Ingredient name, used for the density when converting between volume and weight
    pub ingredient_name: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BakersPercentagesParams {
    /// Flour weight in grams (default 1000)
    pub flour_grams: Option<f64>,
    /// Other ingredients with their weights in grams
    pub ingredients: Vec<BakersRow>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SuggestUnitParams {
    pub ingredient_name: String,
}

// ============================================================================
// Saved Recipe Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveRecipeParams {
    /// Recipe name; saving an existing name replaces that recipe
    pub name: String,
    pub original_yield: Option<f64>,
    pub desired_yield: Option<f64>,
    pub ingredients: Vec<IngredientRow>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecipeNameParams {
    /// Recipe name (exact match)
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ImportRecipesParams {
    /// JSON array of recipes as produced by export_recipes
    pub json: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl BakerscaleService {
    // --- Status ---

    #[tool(description = "Get the current status of the calculator service including build info, database status, and process information")]
    async fn bakerscale_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get instructions for the calculator tools: accepted units, scaling rules, density conversions, and baker's percentages. Call this when unsure how to use the tools.")]
    fn calculator_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CALCULATOR_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CALCULATOR_INSTRUCTIONS)]))
    }

    // --- Calculator ---

    #[tool(description = "Scale recipe ingredients from an original yield to a desired yield. Units are kept; each result carries a display string with pound, cup, or tablespoon hints.")]
    fn scale_recipe(&self, Parameters(p): Parameters<ScaleRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = calculator::scale_recipe(&p.ingredients, p.original_yield, p.desired_yield, p.multiplier)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Convert an amount between cooking units. Volume and weight convert through the ingredient's density (grams per cup); pieces never convert.")]
    fn convert_units(&self, Parameters(p): Parameters<ConvertUnitsParams>) -> Result<CallToolResult, McpError> {
        let result = calculator::convert_units(p.amount, &p.from, &p.to, p.ingredient_name.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Compute baker's percentages relative to flour weight, with total dough weight, total percentage, and hydration")]
    fn bakers_percentages(&self, Parameters(p): Parameters<BakersPercentagesParams>) -> Result<CallToolResult, McpError> {
        to_json(&calculator::bakers_percentages(p.flour_grams, &p.ingredients))
    }

    #[tool(description = "Suggest the usual unit for an ingredient name (e.g. flour -> grams, eggs -> pieces)")]
    fn suggest_unit(&self, Parameters(p): Parameters<SuggestUnitParams>) -> Result<CallToolResult, McpError> {
        to_json(&calculator::suggest_unit(&p.ingredient_name))
    }

    #[tool(description = "List the ingredient density catalog (grams per cup) in lookup order")]
    fn list_densities(&self) -> Result<CallToolResult, McpError> {
        to_json(&calculator::list_densities())
    }

    #[tool(description = "List the accepted unit names with their family (volume, weight, count) and display abbreviation")]
    fn list_units(&self) -> Result<CallToolResult, McpError> {
        to_json(&calculator::list_units())
    }

    // --- Saved Recipes ---

    #[tool(description = "Save a recipe by name. Saving an existing name replaces it.")]
    fn save_recipe(&self, Parameters(p): Parameters<SaveRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::save_recipe(&self.database, &p.name, p.original_yield, p.desired_yield, &p.ingredients)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Load a saved recipe with its scaled ingredients. Marks the recipe as recently used.")]
    fn load_recipe(&self, Parameters(p): Parameters<RecipeNameParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::load_recipe(&self.database, &p.name).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(detail) => to_json(&detail),
            None => to_json(&serde_json::json!({ "error": "Recipe not found", "name": p.name })),
        }
    }

    #[tool(description = "List saved recipes, most recently used first")]
    fn list_recipes(&self) -> Result<CallToolResult, McpError> {
        let result = recipes::list_recipes(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Delete a saved recipe by name")]
    fn delete_recipe(&self, Parameters(p): Parameters<RecipeNameParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::delete_recipe(&self.database, &p.name).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Export all saved recipes as a JSON array")]
    fn export_recipes(&self) -> Result<CallToolResult, McpError> {
        let json = recipes::export_recipes(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Import recipes from a JSON array produced by export_recipes. Recipes with existing names are replaced.")]
    fn import_recipes(&self, Parameters(p): Parameters<ImportRecipesParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::import_recipes(&self.database, &p.json).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for BakerscaleService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bakerscale".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Baker's Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Baker's Calculator - recipe scaling, unit conversion, and baker's percentages. \
                 Call calculator_instructions for the unit names and rules. \
                 Calculator: scale_recipe, convert_units, bakers_percentages, suggest_unit, list_densities, list_units. \
                 Saved recipes: save/load/list/delete_recipe, export_recipes, import_recipes. \
                 Status: bakerscale_status."
                    .into(),
            ),
        }
    }
}

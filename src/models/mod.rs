//! Data models
//!
//! Ingredient rows and the saved recipe store.

mod ingredient;
mod recipe;

pub use ingredient::{Ingredient, ScaledIngredient};
pub use recipe::{format_last_used, parse_timestamp, SavedRecipe, SavedRecipeCreate};

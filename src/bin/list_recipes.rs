//! Utility to print saved recipes, or export them as JSON with `--json`

use bakerscale::{config, db, tools};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let export = std::env::args().skip(1).any(|a| a == "--json");

    let db_path = config::database_path();
    if !db_path.exists() {
        eprintln!("No database at {}", db_path.display());
        return Ok(());
    }

    let database = db::Database::new(&db_path)?;
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        Ok(())
    })?;

    if export {
        let json = tools::recipes::export_recipes(&database)?;
        println!("{}", json);
        return Ok(());
    }

    eprintln!("Database path: {}", db_path.display());
    let list = tools::recipes::list_recipes(&database)?;
    if list.recipes.is_empty() {
        println!("No saved recipes");
        return Ok(());
    }

    println!("{} saved recipes:", list.count);
    for recipe in &list.recipes {
        println!(
            "  {:<30} {:>3} ingredients  yield {} -> {}  ({})",
            recipe.name,
            recipe.ingredient_count,
            recipe.original_yield,
            recipe.desired_yield,
            recipe.last_used_display
        );
    }

    Ok(())
}

//! Landing feed usage
//!
//! Loads the landing bundle (categories, a random recipe batch, and a
//! featured recipe) in one shot, then browses a category.
//!
//! Run with RUST_LOG=debug to watch the fetch fan-out.

use mealdb_engine::{CategoryBrowser, EngineConfig, FeedAggregator, MealDbClient};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Landing Feed ===");
    let feed = mealdb_engine::load_feed().await?;

    println!("Categories ({}):", feed.categories.len());
    for category in &feed.categories {
        println!("  {} {}", category.id, category.name);
    }

    println!("\nRecipes ({}):", feed.recipes.len());
    for recipe in &feed.recipes {
        println!(
            "  {} ({}, serves {})",
            recipe.title, recipe.cook_time, recipe.servings
        );
    }

    if let Some(featured) = &feed.featured {
        println!("\nFeatured: {}", featured.title);
    }

    println!("\n=== Browse a Category ===");
    let config = EngineConfig::load()?;
    let client = Arc::new(MealDbClient::new(&config)?);
    let mut browser = CategoryBrowser::new(FeedAggregator::new(client, &config));

    browser.apply_feed(&feed);
    println!(
        "Default selection: {}",
        browser.selected_category().unwrap_or("none")
    );

    browser.select_category("Seafood").await;
    println!(
        "{} recipes in {}:",
        browser.recipes().len(),
        browser.selected_category().unwrap_or("none")
    );
    for recipe in browser.recipes().iter().take(5) {
        println!("  {}", recipe.title);
    }

    Ok(())
}

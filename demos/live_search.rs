//! Debounced live search
//!
//! Simulates a user typing into a search box: keystrokes stream into the
//! orchestrator, which debounces them, runs the name-then-ingredient
//! cascade, and publishes state snapshots. Only the last burst of typing
//! produces a request.
//!
//! Run with RUST_LOG=debug to watch generations being issued and stale
//! ones discarded.

use mealdb_engine::SearchPhase;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let handle = mealdb_engine::spawn_search()?;
    let mut rx = handle.subscribe();

    // wait for the initial random batch
    while rx.borrow().phase != SearchPhase::Settled {
        rx.changed().await?;
    }
    println!("=== Initial Feed ===");
    for recipe in &rx.borrow().results {
        println!("  {}", recipe.title);
    }

    println!("\n=== Typing \"chicken\" ===");
    for text in ["c", "chi", "chick", "chicken"] {
        handle.input(text);
        sleep(Duration::from_millis(150)).await;
    }

    loop {
        rx.changed().await?;
        let state = rx.borrow().clone();
        if state.active_generation == 1 && state.phase == SearchPhase::Settled {
            println!("Results for '{}':", state.query);
            for recipe in &state.results {
                println!("  {}", recipe.title);
            }
            if let Some(error) = &state.error {
                println!("  (failed: {error})");
            }
            break;
        }
    }

    Ok(())
}

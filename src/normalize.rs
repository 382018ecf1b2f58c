//! Conversion from raw wire records to canonical entities.
//!
//! Normalization is pure and total over malformed input: optional fields
//! degrade field by field, and the only outcome besides a [`Recipe`] is
//! `None` for a record missing its identifier or title.

use crate::model::{Category, Ingredient, Recipe};
use crate::remote::{CategoryRecord, MealRecord, INGREDIENT_SLOTS};

/// Display values for the cook-time affordance, selected per id.
const COOK_TIMES: [&str; 6] = [
    "15 minutes",
    "20 minutes",
    "25 minutes",
    "30 minutes",
    "45 minutes",
    "1 hour",
];

/// Display values for the servings affordance, selected per id.
const SERVINGS: [&str; 4] = ["2", "3", "4", "6"];

/// Normalize one raw meal record into a [`Recipe`], or `None` when the
/// record is unusable.
///
/// Unusable means a missing or blank identifier or title; every other
/// field tolerates absence. Repeated normalization of the same record
/// yields the same `Recipe`, including the derived display fields.
pub fn normalize_meal(raw: &MealRecord) -> Option<Recipe> {
    let id = non_blank(raw.id.as_deref())?;
    let title = non_blank(raw.name.as_deref())?;

    let hash = stable_hash(id);
    let cook_time = COOK_TIMES[(hash % COOK_TIMES.len() as u64) as usize];
    let servings = SERVINGS[((hash >> 8) % SERVINGS.len() as u64) as usize];

    Some(Recipe {
        id: id.to_string(),
        title: title.to_string(),
        image: raw.thumbnail.clone().unwrap_or_default(),
        category: passthrough(raw.category.as_deref()),
        area: passthrough(raw.area.as_deref()),
        instructions: split_instructions(raw.instructions.as_deref()),
        ingredients: collect_ingredients(raw),
        cook_time: cook_time.to_string(),
        servings: servings.to_string(),
    })
}

/// Normalize one raw category record. `position` is the record's 1-based
/// place in the fetched list and becomes the derived id.
pub fn normalize_category(position: usize, raw: &CategoryRecord) -> Category {
    Category {
        id: position as u32,
        name: raw.name.clone().unwrap_or_default(),
        image: raw.thumbnail.clone().unwrap_or_default(),
        description: raw.description.clone().unwrap_or_default(),
    }
}

fn non_blank(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}

/// Verbatim pass-through; trimming is only the presence check, a
/// whitespace-only value counts as absent.
fn passthrough(field: Option<&str>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty()).map(String::from)
}

/// Walk the numbered ingredient slots in ascending order. The source
/// packs them densely from index 1, so the first blank slot ends the
/// scan; later populated slots are never read.
fn collect_ingredients(raw: &MealRecord) -> Vec<Ingredient> {
    let mut ingredients = Vec::new();
    for index in 1..=INGREDIENT_SLOTS {
        let name = match raw.ingredient_slot(index).map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => break,
        };
        let measure = raw.measure_slot(index).map(str::trim).unwrap_or_default();
        ingredients.push(Ingredient {
            name: name.to_string(),
            measure: measure.to_string(),
        });
    }
    ingredients
}

fn split_instructions(text: Option<&str>) -> Vec<String> {
    text.map(|t| {
        t.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// FNV-1a over the id bytes. The derived display fields must come out
/// identical in every process, which rules out the std hasher's
/// per-platform seeding.
fn stable_hash(id: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in id.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

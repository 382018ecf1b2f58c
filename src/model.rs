use serde::Serialize;

/// Canonical recipe shape handed to the UI, independent of the wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub image: String,
    pub category: Option<String>,
    pub area: Option<String>,
    /// Instruction lines in source order, trimmed, empties dropped
    pub instructions: Vec<String>,
    /// Ingredient slots in source order, empty slots omitted
    pub ingredients: Vec<Ingredient>,
    /// Display value derived from the id; the source carries no such field
    pub cook_time: String,
    /// Display value derived from the id; the source carries no such field
    pub servings: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    pub name: String,
    /// Empty string when the source provides no measure for the slot
    pub measure: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    /// 1-based position in the fetched list; not source-supplied
    pub id: u32,
    pub name: String,
    pub image: String,
    pub description: String,
}

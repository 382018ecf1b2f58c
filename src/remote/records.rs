use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Highest ingredient/measure slot index the source populates.
pub const INGREDIENT_SLOTS: usize = 20;

/// Raw meal record as served by the API.
///
/// Every field is optional: an absent or `null` field is a data condition
/// for the normalizer to handle, never a parse failure. The numbered
/// `strIngredient1..20` / `strMeasure1..20` slots land in `extra` along
/// with any fields this crate does not know about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id: Option<String>,
    #[serde(rename = "strMeal")]
    pub name: Option<String>,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory")]
    pub category: Option<String>,
    #[serde(rename = "strArea")]
    pub area: Option<String>,
    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl MealRecord {
    fn slot(&self, prefix: &str, index: usize) -> Option<&str> {
        self.extra
            .get(&format!("{prefix}{index}"))
            .and_then(Value::as_str)
    }

    /// Ingredient name at 1-based slot `index`, if the field is present
    /// and holds a string.
    pub fn ingredient_slot(&self, index: usize) -> Option<&str> {
        self.slot("strIngredient", index)
    }

    /// Measure at 1-based slot `index`, if the field is present and holds
    /// a string.
    pub fn measure_slot(&self, index: usize) -> Option<&str> {
        self.slot("strMeasure", index)
    }
}

/// Raw category record as served by the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryRecord {
    #[serde(rename = "strCategory")]
    pub name: Option<String>,
    #[serde(rename = "strCategoryThumb")]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategoryDescription")]
    pub description: Option<String>,
}

/// Envelope around meal endpoints. The source answers `{"meals": null}`
/// when nothing matched, so the array is optional and `null` decodes to
/// an empty list.
#[derive(Debug, Deserialize)]
pub(crate) struct MealsEnvelope {
    #[serde(default)]
    pub meals: Option<Vec<MealRecord>>,
}

impl MealsEnvelope {
    pub fn into_records(self) -> Vec<MealRecord> {
        self.meals.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesEnvelope {
    #[serde(default)]
    pub categories: Option<Vec<CategoryRecord>>,
}

impl CategoriesEnvelope {
    pub fn into_records(self) -> Vec<CategoryRecord> {
        self.categories.unwrap_or_default()
    }
}

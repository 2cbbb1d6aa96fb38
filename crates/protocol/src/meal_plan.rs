use serde::{Deserialize, Serialize};

/// Daily macro targets in grams; calories are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroGoals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fats: f64,
    pub fiber: f64,
}

/// A meal-plan generation request. Every field except `macro_goals`
/// defaults when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    pub macro_goals: MacroGoals,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub favorite_cuisines: Vec<String>,
    #[serde(default)]
    pub specific_meals: Vec<String>,
    #[serde(default)]
    pub exclude_previous_week_meals: bool,
    #[serde(default)]
    pub previous_week_meals: Vec<String>,
    #[serde(default)]
    pub additional_context: String,
}

/// Grocery aisle used to group shopping-list items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroceryCategory {
    Produce,
    Dairy,
    #[serde(rename = "Meat & Seafood")]
    MeatAndSeafood,
    Bakery,
    Frozen,
    Pantry,
    Beverages,
    #[serde(rename = "Spices & Seasonings")]
    SpicesAndSeasonings,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub category: GroceryCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub macros: MacroGoals,
    pub prep_time: String,
}

/// One day of the weekly plan: five meal slots plus daily totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: String,
    pub breakfast: Meal,
    pub morning_snack: Meal,
    pub lunch: Meal,
    pub afternoon_snack: Meal,
    pub dinner: Meal,
    pub daily_totals: MacroGoals,
}

/// A shopping-list line with quantities aggregated across the week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub name: String,
    pub total_quantity: String,
    pub unit: String,
    pub category: GroceryCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub items: Vec<ShoppingListItem>,
}

/// The full generation result. `generated_at` is an RFC 3339 timestamp
/// stamped server-side, not by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    pub week_plan: Vec<DayPlan>,
    pub shopping_list: ShoppingList,
    #[serde(default)]
    pub generated_at: String,
}

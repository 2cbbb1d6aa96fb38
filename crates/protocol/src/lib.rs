//! Shared wire types for the PlatePilot API.
//!
//! All types serialize as camelCase JSON, byte-compatible with the web
//! client (pinned by the `wire-compat` fixture tests).

mod meal_plan;
mod recipe;
mod validate;

pub use meal_plan::{
    DayPlan, GroceryCategory, Ingredient, MacroGoals, Meal, MealPlanRequest, MealPlanResponse,
    ShoppingList, ShoppingListItem,
};
pub use recipe::{RecipeIngredient, RecipeRequest, RecipeResponse};
pub use validate::FieldError;

//! Deterministic prompt assembly.

use platepilot_protocol::{MealPlanRequest, RecipeRequest};

pub(crate) fn meal_plan_instructions() -> &'static str {
    "You are a professional nutritionist and meal planner. Generate a complete 7-day meal plan with exact macros and a consolidated shopping list.\n\n\
IMPORTANT RULES:\n\
- Every day MUST include: breakfast, morningSnack, lunch, afternoonSnack, dinner\n\
- Daily macros should be as close as possible to the user's targets\n\
- The shopping list MUST aggregate identical ingredients across all meals\n\
- Categorize shopping list items into: Produce, Dairy, Meat & Seafood, Bakery, Frozen, Pantry, Beverages, Spices & Seasonings, Other"
}

/// Builds the user input block from a request; sections for empty fields
/// are omitted entirely.
pub(crate) fn build_meal_plan_input(request: &MealPlanRequest) -> String {
    let goals = &request.macro_goals;
    let mut parts = vec![
        "Daily Macro Goals:".to_owned(),
        format!("- Protein: {}g", goals.protein),
        format!("- Carbohydrates: {}g", goals.carbohydrates),
        format!("- Fats: {}g", goals.fats),
        format!("- Fiber: {}g", goals.fiber),
    ];
    if let Some(calories) = goals.calories {
        parts.push(format!("- Calories: {calories}"));
    }

    if !request.dietary_restrictions.is_empty() {
        parts.push(format!(
            "\nDietary Restrictions: {}",
            request.dietary_restrictions.join(", ")
        ));
    }

    if !request.favorite_cuisines.is_empty() {
        parts.push(format!(
            "\nPreferred Cuisines: {}",
            request.favorite_cuisines.join(", ")
        ));
    }

    if !request.specific_meals.is_empty() {
        parts.push(format!(
            "\nSpecific Meals to Include: {}",
            request.specific_meals.join(", ")
        ));
    }

    if request.exclude_previous_week_meals && !request.previous_week_meals.is_empty() {
        parts.push(format!(
            "\nDo NOT include these meals from last week: {}",
            request.previous_week_meals.join(", ")
        ));
    }

    if !request.additional_context.is_empty() {
        parts.push(format!("\nAdditional Context: {}", request.additional_context));
    }

    parts.join("\n")
}

pub(crate) fn recipe_instructions() -> &'static str {
    "You are a professional chef. Write a complete home-kitchen recipe for the requested meal.\n\n\
IMPORTANT RULES:\n\
- List every ingredient with quantity and unit\n\
- Instructions are ordered, concrete steps\n\
- Respect every stated dietary restriction"
}

pub(crate) fn build_recipe_input(request: &RecipeRequest) -> String {
    let mut parts = vec![format!("Meal: {}", request.meal_name)];

    if !request.description.is_empty() {
        parts.push(format!("Description: {}", request.description));
    }

    if !request.dietary_restrictions.is_empty() {
        parts.push(format!(
            "Dietary Restrictions: {}",
            request.dietary_restrictions.join(", ")
        ));
    }

    parts.join("\n")
}

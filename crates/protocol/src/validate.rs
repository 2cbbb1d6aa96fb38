//! Request validation.
//!
//! Validation collects every offending field rather than stopping at the
//! first, so API clients can surface the complete list.

use serde::{Deserialize, Serialize};

use crate::meal_plan::MealPlanRequest;
use crate::recipe::RecipeRequest;

/// A single field-level validation failure. `path` uses the wire-side
/// camelCase field names, dot separated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    fn non_negative(path: &str) -> Self {
        Self {
            path: path.to_owned(),
            message: "must be greater than or equal to 0".to_owned(),
        }
    }
}

impl MealPlanRequest {
    /// Checks that every macro target is non-negative.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let goals = &self.macro_goals;
        let mut errors = Vec::new();

        for (path, value) in [
            ("macroGoals.protein", goals.protein),
            ("macroGoals.carbohydrates", goals.carbohydrates),
            ("macroGoals.fats", goals.fats),
            ("macroGoals.fiber", goals.fiber),
        ] {
            if value < 0.0 {
                errors.push(FieldError::non_negative(path));
            }
        }
        if goals.calories.is_some_and(|calories| calories < 0.0) {
            errors.push(FieldError::non_negative("macroGoals.calories"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl RecipeRequest {
    /// Checks that the meal name is non-empty.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        if self.meal_name.trim().is_empty() {
            return Err(vec![FieldError {
                path: "mealName".to_owned(),
                message: "must not be empty".to_owned(),
            }]);
        }
        Ok(())
    }
}

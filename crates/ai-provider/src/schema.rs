//! Strict JSON schemas for structured model output.

use serde_json::{Value, json};

/// Schema forcing the meal-plan response shape, used with the Responses
/// API `json_schema` text format.
pub(crate) fn meal_plan_schema() -> Value {
    json!({
        "name": "meal_plan",
        "strict": true,
        "schema": {
            "type": "object",
            "properties": {
                "weekPlan": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "day": { "type": "string" },
                            "breakfast": { "$ref": "#/$defs/meal" },
                            "morningSnack": { "$ref": "#/$defs/meal" },
                            "lunch": { "$ref": "#/$defs/meal" },
                            "afternoonSnack": { "$ref": "#/$defs/meal" },
                            "dinner": { "$ref": "#/$defs/meal" },
                            "dailyTotals": { "$ref": "#/$defs/macros" }
                        },
                        "required": [
                            "day", "breakfast", "morningSnack", "lunch",
                            "afternoonSnack", "dinner", "dailyTotals"
                        ],
                        "additionalProperties": false
                    }
                },
                "shoppingList": {
                    "type": "object",
                    "properties": {
                        "items": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "name": { "type": "string" },
                                    "totalQuantity": { "type": "string" },
                                    "unit": { "type": "string" },
                                    "category": {
                                        "type": "string",
                                        "enum": [
                                            "Produce", "Dairy", "Meat & Seafood", "Bakery",
                                            "Frozen", "Pantry", "Beverages",
                                            "Spices & Seasonings", "Other"
                                        ]
                                    }
                                },
                                "required": ["name", "totalQuantity", "unit", "category"],
                                "additionalProperties": false
                            }
                        }
                    },
                    "required": ["items"],
                    "additionalProperties": false
                }
            },
            "required": ["weekPlan", "shoppingList"],
            "additionalProperties": false,
            "$defs": {
                "macros": {
                    "type": "object",
                    "properties": {
                        "calories": { "type": "number" },
                        "protein": { "type": "number" },
                        "carbohydrates": { "type": "number" },
                        "fats": { "type": "number" },
                        "fiber": { "type": "number" }
                    },
                    "required": ["calories", "protein", "carbohydrates", "fats", "fiber"],
                    "additionalProperties": false
                },
                "ingredient": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "quantity": { "type": "string" },
                        "unit": { "type": "string" },
                        "category": { "type": "string" }
                    },
                    "required": ["name", "quantity", "unit", "category"],
                    "additionalProperties": false
                },
                "meal": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "description": { "type": "string" },
                        "ingredients": {
                            "type": "array",
                            "items": { "$ref": "#/$defs/ingredient" }
                        },
                        "macros": { "$ref": "#/$defs/macros" },
                        "prepTime": { "type": "string" }
                    },
                    "required": ["name", "description", "ingredients", "macros", "prepTime"],
                    "additionalProperties": false
                }
            }
        }
    })
}

/// Schema forcing the recipe response shape.
pub(crate) fn recipe_schema() -> Value {
    json!({
        "name": "recipe",
        "strict": true,
        "schema": {
            "type": "object",
            "properties": {
                "mealName": { "type": "string" },
                "ingredients": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "quantity": { "type": "string" },
                            "unit": { "type": "string" },
                            "notes": { "type": ["string", "null"] }
                        },
                        "required": ["name", "quantity", "unit", "notes"],
                        "additionalProperties": false
                    }
                },
                "instructions": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "tips": { "type": ["string", "null"] }
            },
            "required": ["mealName", "ingredients", "instructions", "tips"],
            "additionalProperties": false
        }
    })
}

//! AI provider boundary.
//!
//! The server talks to the model backend only through [`AiProvider`];
//! [`OpenAiProvider`] is the hosted implementation. The backend is a black
//! box that either returns a schema-conforming JSON payload or fails.

mod error;
mod openai;
mod prompt;
mod schema;

use async_trait::async_trait;

use platepilot_protocol::{MealPlanRequest, MealPlanResponse, RecipeRequest, RecipeResponse};

pub use error::AiError;
pub use openai::OpenAiProvider;

/// Generates meal plans and recipes from validated requests.
#[async_trait]
pub trait AiProvider: Send + Sync {
    async fn generate_meal_plan(
        &self,
        request: &MealPlanRequest,
    ) -> Result<MealPlanResponse, AiError>;

    async fn generate_recipe(&self, request: &RecipeRequest) -> Result<RecipeResponse, AiError>;
}

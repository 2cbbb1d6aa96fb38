use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use platepilot_ai::AiProvider;
use platepilot_protocol::{MealPlanRequest, MealPlanResponse, RecipeRequest, RecipeResponse};

use crate::error::ApiError;

/// Builds the API router.
///
/// Routes:
/// - POST /api/meal-plan/generate - Generate a weekly meal plan
/// - POST /api/meal-plan/recipe - Generate a recipe for one meal
/// - GET /api/health, /api/meal-plan/health - Liveness checks
pub fn router(provider: Arc<dyn AiProvider>) -> Router {
    Router::new()
        .route("/api/meal-plan/generate", post(generate_meal_plan))
        .route("/api/meal-plan/recipe", post(generate_recipe))
        .route("/api/meal-plan/health", get(health))
        .route("/api/health", get(health))
        .with_state(provider)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}

async fn generate_meal_plan(
    State(provider): State<Arc<dyn AiProvider>>,
    body: Result<Json<MealPlanRequest>, JsonRejection>,
) -> Result<Json<MealPlanResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::Malformed(rejection.body_text()))?;
    request.validate().map_err(ApiError::Validation)?;

    let request_id = Uuid::new_v4();
    let plan = provider
        .generate_meal_plan(&request)
        .instrument(tracing::info_span!("generate_meal_plan", %request_id))
        .await
        .map_err(|e| ApiError::provider("meal plan", e))?;

    Ok(Json(plan))
}

async fn generate_recipe(
    State(provider): State<Arc<dyn AiProvider>>,
    body: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::Malformed(rejection.body_text()))?;
    request.validate().map_err(ApiError::Validation)?;

    let request_id = Uuid::new_v4();
    let recipe = provider
        .generate_recipe(&request)
        .instrument(tracing::info_span!("generate_recipe", %request_id))
        .await
        .map_err(|e| ApiError::provider("recipe", e))?;

    Ok(Json(recipe))
}

//! HTTP client for the PlatePilot API.
//!
//! Every request is narrated through the dev console (`[API] ...` lines),
//! so an installed log capture observes live traffic exactly as the
//! debugging panel expects.

use std::sync::Arc;

use serde_json::Value;

use platepilot_dev_log::{Console, ConsoleValue, console_args};
use platepilot_protocol::{MealPlanRequest, MealPlanResponse, RecipeRequest, RecipeResponse};

/// Errors from the API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },
}

/// PlatePilot API client.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    console: Arc<Console>,
}

impl Client {
    /// Creates a client for `base_url` (e.g. `http://localhost:3001/api`)
    /// narrating through `console`.
    pub fn new(base_url: impl Into<String>, console: Arc<Console>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            console,
        }
    }

    /// Requests a weekly meal plan.
    pub async fn generate_meal_plan(
        &self,
        request: &MealPlanRequest,
    ) -> Result<MealPlanResponse, ClientError> {
        let url = format!("{}/meal-plan/generate", self.base_url);
        self.console.info(&console_args![format!("[API] POST {url}")]);
        self.console.log(&console_args![
            "[API] Request payload:",
            ConsoleValue::data(request)
        ]);

        let response = self.http.post(&url).json(request).send().await?;
        let response = self.check(response).await?;

        let plan: MealPlanResponse = response.json().await?;
        self.console.info(&console_args![format!(
            "[API] Meal plan generated successfully ({} days)",
            plan.week_plan.len()
        )]);
        Ok(plan)
    }

    /// Requests a recipe for one meal.
    pub async fn generate_recipe(
        &self,
        request: &RecipeRequest,
    ) -> Result<RecipeResponse, ClientError> {
        let url = format!("{}/meal-plan/recipe", self.base_url);
        self.console.info(&console_args![format!("[API] POST {url}")]);
        self.console.log(&console_args![
            "[API] Request payload:",
            ConsoleValue::data(request)
        ]);

        let response = self.http.post(&url).json(request).send().await?;
        let response = self.check(response).await?;

        let recipe: RecipeResponse = response.json().await?;
        self.console.info(&console_args![format!(
            "[API] Recipe generated for \"{}\"",
            recipe.meal_name
        )]);
        Ok(recipe)
    }

    /// Liveness probe.
    pub async fn health_check(&self) -> Result<Value, ClientError> {
        let url = format!("{}/health", self.base_url);
        self.console.info(&console_args![format!("[API] GET {url}")]);

        let response = self.http.get(&url).send().await?;
        let response = self.check(response).await?;

        let body: Value = response.json().await?;
        self.console
            .log(&console_args!["[API] Health check result:", body.clone()]);
        Ok(body)
    }

    /// Turns a non-success response into a narrated [`ClientError::Api`].
    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: Value = response
            .json()
            .await
            .unwrap_or_else(|_| serde_json::json!({ "error": "Unknown error" }));
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("Request failed with status {status}"));

        self.console.error(&console_args![
            format!("[API] Error {}:", status.as_u16()),
            message.clone(),
            body.get("details").cloned().unwrap_or(Value::Null),
        ]);

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use platepilot_ai::{AiError, AiProvider};
    use platepilot_dev_log::{LogCapture, LogLevel};
    use platepilot_protocol::ShoppingList;

    use super::*;

    struct MockProvider {
        fail: bool,
    }

    #[async_trait]
    impl AiProvider for MockProvider {
        async fn generate_meal_plan(
            &self,
            _request: &MealPlanRequest,
        ) -> Result<MealPlanResponse, AiError> {
            if self.fail {
                return Err(AiError::EmptyResponse);
            }
            Ok(MealPlanResponse {
                week_plan: vec![],
                shopping_list: ShoppingList { items: vec![] },
                generated_at: "2025-01-06T12:00:00Z".into(),
            })
        }

        async fn generate_recipe(
            &self,
            request: &RecipeRequest,
        ) -> Result<RecipeResponse, AiError> {
            if self.fail {
                return Err(AiError::EmptyResponse);
            }
            Ok(RecipeResponse {
                meal_name: request.meal_name.clone(),
                ingredients: vec![],
                instructions: vec!["Serve.".into()],
                tips: None,
            })
        }
    }

    /// Serves the real router on an ephemeral port.
    async fn serve(fail: bool) -> String {
        let app = platepilot_server::router(Arc::new(MockProvider { fail }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api")
    }

    fn silent_console() -> Arc<Console> {
        let console = Arc::new(Console::new());
        for level in LogLevel::ALL {
            console.replace_sink(level, Arc::new(|_| {}));
        }
        console
    }

    fn sample_request() -> MealPlanRequest {
        serde_json::from_value(serde_json::json!({
            "macroGoals": {
                "protein": 150,
                "carbohydrates": 200,
                "fats": 65,
                "fiber": 30
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn meal_plan_request_is_narrated_through_the_capture() {
        let base_url = serve(false).await;
        let console = silent_console();
        let capture = LogCapture::new(Arc::clone(&console));
        capture.install();

        let client = Client::new(base_url, console);
        let plan = client.generate_meal_plan(&sample_request()).await.unwrap();
        assert_eq!(plan.generated_at, "2025-01-06T12:00:00Z");

        let entries = capture.entries();
        assert!(
            entries
                .iter()
                .any(|e| e.level == LogLevel::Info && e.message.contains("[API] POST"))
        );
        assert!(
            entries
                .iter()
                .any(|e| e.level == LogLevel::Log && e.message.contains("Request payload"))
        );
        assert!(
            entries
                .iter()
                .any(|e| e.message.contains("generated successfully (0 days)"))
        );

        capture.uninstall();
    }

    #[tokio::test]
    async fn server_errors_surface_the_wire_message() {
        let base_url = serve(true).await;
        let console = silent_console();
        let capture = LogCapture::new(Arc::clone(&console));
        capture.install();

        let client = Client::new(base_url, console);
        let err = client
            .generate_meal_plan(&sample_request())
            .await
            .unwrap_err();

        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to generate meal plan. Please try again.");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(
            capture
                .entries()
                .iter()
                .any(|e| e.level == LogLevel::Error && e.message.contains("[API] Error 500:"))
        );

        capture.uninstall();
    }

    #[tokio::test]
    async fn health_check_logs_the_result() {
        let base_url = serve(false).await;
        let console = silent_console();
        let capture = LogCapture::new(Arc::clone(&console));
        capture.install();

        let client = Client::new(base_url, console);
        let body = client.health_check().await.unwrap();
        assert_eq!(body["status"], "ok");

        assert!(
            capture
                .entries()
                .iter()
                .any(|e| e.message.contains("Health check result"))
        );

        capture.uninstall();
    }

    #[tokio::test]
    async fn recipe_request_roundtrip() {
        let base_url = serve(false).await;
        let console = silent_console();

        let client = Client::new(base_url, console);
        let recipe = client
            .generate_recipe(&RecipeRequest {
                meal_name: "Greek Salad".into(),
                description: String::new(),
                dietary_restrictions: vec![],
            })
            .await
            .unwrap();

        assert_eq!(recipe.meal_name, "Greek Salad");
    }
}

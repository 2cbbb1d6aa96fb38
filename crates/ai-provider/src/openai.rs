//! OpenAI-backed provider.
//!
//! Talks to the Responses API with a strict `json_schema` output format,
//! so the model either returns a payload matching the wire types or the
//! call fails.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::{Value, json};

use platepilot_protocol::{MealPlanRequest, MealPlanResponse, RecipeRequest, RecipeResponse};

use crate::error::AiError;
use crate::prompt;
use crate::schema;
use crate::AiProvider;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Hosted model client.
pub struct OpenAiProvider {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OpenAiProvider {
    /// Creates a provider with the given API key and model name.
    pub fn new(api_key: &str, model: impl Into<String>) -> Result<Self, AiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|_| AiError::InvalidKey)?,
        );

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: model.into(),
        })
    }

    /// Sets a custom base URL (for testing).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Runs one structured-output request and returns the model's text.
    async fn respond(
        &self,
        instructions: &str,
        input: String,
        format: Value,
    ) -> Result<String, AiError> {
        let mut text_format = json!({ "type": "json_schema" });
        merge(&mut text_format, format);

        let body = json!({
            "model": self.model,
            "instructions": instructions,
            "input": input,
            "temperature": 0.7,
            "text": { "format": text_format },
            "store": false,
        });

        tracing::debug!(model = %self.model, "dispatching generation request");

        let resp = self
            .http
            .post(format!("{}/responses", self.base_url))
            .json(&body)
            .send()
            .await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = resp.json().await?;
        extract_output_text(&payload).ok_or(AiError::EmptyResponse)
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn generate_meal_plan(
        &self,
        request: &MealPlanRequest,
    ) -> Result<MealPlanResponse, AiError> {
        let input = prompt::build_meal_plan_input(request);
        let text = self
            .respond(
                prompt::meal_plan_instructions(),
                input,
                schema::meal_plan_schema(),
            )
            .await?;
        parse_meal_plan(&text)
    }

    async fn generate_recipe(&self, request: &RecipeRequest) -> Result<RecipeResponse, AiError> {
        let input = prompt::build_recipe_input(request);
        let text = self
            .respond(prompt::recipe_instructions(), input, schema::recipe_schema())
            .await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Parses the model's meal-plan JSON and stamps the generation time.
fn parse_meal_plan(text: &str) -> Result<MealPlanResponse, AiError> {
    let mut plan: MealPlanResponse = serde_json::from_str(text)?;
    plan.generated_at = Utc::now().to_rfc3339();
    Ok(plan)
}

/// Pulls the concatenated output text out of a Responses API payload.
///
/// Prefers the `output_text` convenience field when present; otherwise
/// walks `output[].content[]` for `output_text` items. Returns `None`
/// when no text was produced.
fn extract_output_text(payload: &Value) -> Option<String> {
    if let Some(text) = payload.get("output_text").and_then(Value::as_str) {
        return (!text.is_empty()).then(|| text.to_owned());
    }

    let mut text = String::new();
    for item in payload.get("output")?.as_array()? {
        if item.get("type").and_then(Value::as_str) != Some("message") {
            continue;
        }
        let Some(content) = item.get("content").and_then(Value::as_array) else {
            continue;
        };
        for part in content {
            if part.get("type").and_then(Value::as_str) != Some("output_text") {
                continue;
            }
            if let Some(chunk) = part.get("text").and_then(Value::as_str) {
                text.push_str(chunk);
            }
        }
    }

    (!text.is_empty()).then_some(text)
}

/// Merges `extra`'s top-level keys into `target`.
fn merge(target: &mut Value, extra: Value) {
    if let (Value::Object(target), Value::Object(extra)) = (target, extra) {
        for (key, value) in extra {
            target.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_is_instantiable() {
        let provider = OpenAiProvider::new("sk-test", "gpt-5.2").unwrap();
        assert_eq!(provider.model, "gpt-5.2");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
        let _local = provider.with_base_url("http://127.0.0.1:9".into());
    }

    #[test]
    fn extracts_convenience_output_text() {
        let payload = json!({ "output_text": "{\"ok\": true}" });
        assert_eq!(
            extract_output_text(&payload).as_deref(),
            Some("{\"ok\": true}")
        );
    }

    #[test]
    fn walks_message_content_items() {
        let payload = json!({
            "output": [
                { "type": "reasoning", "summary": [] },
                {
                    "type": "message",
                    "content": [
                        { "type": "output_text", "text": "{\"a\":" },
                        { "type": "output_text", "text": "1}" }
                    ]
                }
            ]
        });
        assert_eq!(extract_output_text(&payload).as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn empty_output_yields_none() {
        assert_eq!(extract_output_text(&json!({ "output": [] })), None);
        assert_eq!(extract_output_text(&json!({ "output_text": "" })), None);
        assert_eq!(extract_output_text(&json!({})), None);
    }

    #[test]
    fn parse_meal_plan_stamps_generated_at() {
        let text = json!({
            "weekPlan": [],
            "shoppingList": { "items": [] }
        })
        .to_string();

        let plan = parse_meal_plan(&text).unwrap();
        assert!(plan.week_plan.is_empty());
        assert!(!plan.generated_at.is_empty());
        assert!(plan.generated_at.contains('T'));
    }

    #[test]
    fn parse_meal_plan_rejects_malformed_payloads() {
        assert!(matches!(
            parse_meal_plan("not json"),
            Err(AiError::Json(_))
        ));
    }

    #[test]
    fn text_format_carries_the_schema() {
        let mut format = json!({ "type": "json_schema" });
        merge(&mut format, schema::meal_plan_schema());

        assert_eq!(format["type"], "json_schema");
        assert_eq!(format["name"], "meal_plan");
        assert_eq!(format["strict"], true);
    }
}

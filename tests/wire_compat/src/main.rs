//! Wire compatibility tests.
//!
//! The fixtures under `fixtures/` are JSON payloads in the exact shape the
//! web client sends and receives. Each test deserializes a fixture into
//! the Rust types and re-serializes it, asserting nothing is lost or
//! renamed along the way.

fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Normalizes JSON values so that integer-valued floats compare equal.
    ///
    /// The TypeScript client serializes `150` where Rust serializes
    /// `150.0`; both are semantically identical.
    fn normalize_value(v: &serde_json::Value) -> serde_json::Value {
        match v {
            serde_json::Value::Number(n) => {
                if let Some(f) = n.as_f64() {
                    serde_json::json!(f)
                } else {
                    v.clone()
                }
            }
            serde_json::Value::Object(map) => {
                let normalized: serde_json::Map<String, serde_json::Value> = map
                    .iter()
                    .map(|(k, v)| (k.clone(), normalize_value(v)))
                    .collect();
                serde_json::Value::Object(normalized)
            }
            serde_json::Value::Array(arr) => {
                serde_json::Value::Array(arr.iter().map(normalize_value).collect())
            }
            _ => v.clone(),
        }
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and
    /// compares the JSON values (order-independent, float-normalized).
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        let norm_fixture = normalize_value(&fixture);
        let norm_reserialized = normalize_value(&reserialized);
        assert_eq!(
            norm_fixture, norm_reserialized,
            "roundtrip mismatch for {name}:\n  client: {fixture}\n  rust:   {reserialized}"
        );
    }

    // --- Meal plan types ---

    #[test]
    fn fixture_meal_plan_request() {
        roundtrip_test::<platepilot_protocol::MealPlanRequest>("meal_plan_request.json");
    }

    #[test]
    fn fixture_meal_plan_response() {
        roundtrip_test::<platepilot_protocol::MealPlanResponse>("meal_plan_response.json");
    }

    #[test]
    fn fixture_shopping_list() {
        roundtrip_test::<platepilot_protocol::ShoppingList>("shopping_list.json");
    }

    // --- Recipe types ---

    #[test]
    fn fixture_recipe_request() {
        roundtrip_test::<platepilot_protocol::RecipeRequest>("recipe_request.json");
    }

    #[test]
    fn fixture_recipe_response() {
        roundtrip_test::<platepilot_protocol::RecipeResponse>("recipe_response.json");
    }

    // --- Log pipeline types ---

    #[test]
    fn fixture_log_entry() {
        roundtrip_test::<platepilot_dev_log::LogEntry>("log_entry.json");
    }

    #[test]
    fn fixture_log_entry_with_details() {
        roundtrip_test::<platepilot_dev_log::LogEntry>("log_entry_details.json");
    }
}

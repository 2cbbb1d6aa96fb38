//! Server configuration from the environment.

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MODEL: &str = "gpt-5.2";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Errors while assembling the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub openai_api_key: String,
    pub model: String,
    pub cors_origin: String,
}

impl ServerConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let openai_api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingVar("OPENAI_API_KEY"))?;

        Ok(Self {
            port,
            openai_api_key,
            model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            cors_origin: lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars = env(pairs);
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[("OPENAI_API_KEY", "sk-test")]).unwrap();

        assert_eq!(config.port, 3001);
        assert_eq!(config.model, "gpt-5.2");
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert_eq!(config.openai_api_key, "sk-test");
    }

    #[test]
    fn explicit_values_win() {
        let config = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "8080"),
            ("OPENAI_MODEL", "gpt-5.2-mini"),
            ("CORS_ORIGIN", "https://planner.example"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.model, "gpt-5.2-mini");
        assert_eq!(config.cors_origin, "https://planner.example");
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("OPENAI_API_KEY")));

        let err = load(&[("OPENAI_API_KEY", "")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("OPENAI_API_KEY")));
    }

    #[test]
    fn unparseable_port_is_an_error() {
        let err = load(&[("OPENAI_API_KEY", "sk-test"), ("PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: "PORT", .. }));
    }
}

//! PlatePilot API server daemon.
//!
//! Wires configuration, the AI provider, the HTTP router, and the
//! diagnostic log capture together, then serves until ctrl-c.

use std::sync::Arc;

use axum::http::HeaderValue;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use platepilot_ai::OpenAiProvider;
use platepilot_dev_log::{Console, LogCapture, console_args};
use platepilot_server::{ServerConfig, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,platepilot=debug")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let console = Console::global();
    let capture = LogCapture::new(console.clone());
    capture.install();

    let provider = Arc::new(OpenAiProvider::new(&config.openai_api_key, &config.model)?);

    let cors = match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            tracing::warn!(origin = %config.cors_origin, "unparseable CORS origin, allowing any");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = router(provider)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.cancel();
        }
    });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    console.info(&console_args![format!(
        "PlatePilot server running on port {}",
        config.port
    )]);
    console.info(&console_args![format!("AI model: {}", config.model)]);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await?;

    capture.uninstall();
    Ok(())
}

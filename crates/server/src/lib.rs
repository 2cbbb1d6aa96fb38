//! PlatePilot HTTP API.
//!
//! A thin axum layer: validate the request, forward it to the AI
//! provider, and translate failures into the fixed wire-level error
//! shapes. No menu intelligence lives here.

mod config;
mod error;
mod routes;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use routes::router;

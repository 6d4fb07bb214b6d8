//! HTTP API for Principia.
//!
//! Maps requests onto `principia_core` services and translates outcomes
//! into status codes and JSON bodies.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

pub use api::build_router;
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use state::AppState;

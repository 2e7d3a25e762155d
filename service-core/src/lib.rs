//! service-core: shared infrastructure for the workspace services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

pub use axum;
pub use secrecy;
pub use serde_json;
pub use tracing;

//! # Axum Helpers
//!
//! A small collection of utilities and middleware for building Axum web
//! applications.
//!
//! ## Modules
//!
//! - **[`auth`]**: static shared-secret Basic Auth gate middleware
//! - **[`server`]**: server setup with request tracing and graceful shutdown
//! - **[`health`]**: liveness endpoint

pub mod auth;
pub mod health;
pub mod server;

// Re-export auth types
pub use auth::{BasicAuthConfig, basic_auth_middleware};

// Re-export server types
pub use server::{create_app, shutdown_signal};

// Re-export health types
pub use health::{HealthResponse, health_router};

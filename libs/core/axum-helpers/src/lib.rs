//! # Axum Helpers
//!
//! Shared HTTP plumbing for the product service.
//!
//! - **[`response`]**: the `{success, message, count, data}` JSON envelope
//! - **[`errors`]**: `AppError` and its mapping onto failure envelopes
//! - **[`extractors`]**: numeric id path and JSON body extractors with envelope rejections
//! - **[`http`]**: CORS and security header middleware
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(Router::new())?;
//! create_production_app(router, &ServerConfig::default(), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

pub use errors::{AppError, RouteFailure};
pub use extractors::{IdPath, JsonBody};
pub use http::{cors_layer_from_env, security_headers};
pub use response::ApiResponse;
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

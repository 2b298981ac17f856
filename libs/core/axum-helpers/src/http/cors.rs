use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

const METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Build the CORS layer from `CORS_ALLOWED_ORIGIN`.
///
/// Unset or `*` allows any origin. Otherwise the value is a comma-separated
/// origin list and credentials are allowed for those origins.
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let origins = core_config::env_or_default("CORS_ALLOWED_ORIGIN", "*");
    cors_layer(&origins)
}

fn cors_layer(origins: &str) -> io::Result<CorsLayer> {
    let base = CorsLayer::new()
        .allow_methods(METHODS)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    if origins.trim() == "*" {
        info!("CORS configured to allow any origin");
        return Ok(base.allow_origin(Any));
    }

    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<_, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if allowed.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    info!("CORS configured with allowed origins: {}", origins);
    Ok(base
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true))
}

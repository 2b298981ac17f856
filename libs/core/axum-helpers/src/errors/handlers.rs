use axum::{
    http::Uri,
    response::{IntoResponse, Response},
};

use super::AppError;

/// Fallback for unmatched paths: 404 failure envelope.
pub async fn not_found(uri: Uri) -> Response {
    AppError::NotFound(format!("No route found for {}", uri.path())).into_response()
}

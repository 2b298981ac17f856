pub mod handlers;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::response::ApiResponse;

/// Application error type that can be converted to HTTP responses.
///
/// The `Display` text is what clients see in the failure envelope's `message`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InternalServerError(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Malformed JSON body: {}", .0.body_text())]
    JsonRejection(#[from] JsonRejection),

    #[error("Invalid query parameters: {}", .0.body_text())]
    QueryRejection(#[from] QueryRejection),

    #[error("Invalid path parameter: {}", .0.body_text())]
    PathRejection(#[from] PathRejection),
}

impl AppError {
    /// Status used when the error is returned without a route-specific status.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::JsonRejection(_)
            | AppError::QueryRejection(_)
            | AppError::PathRejection(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Pin the response status regardless of the error kind.
    ///
    /// Product routes declare a single failure status each, so an update on a
    /// missing id still answers 400.
    pub fn with_status(self, status: StatusCode) -> RouteFailure {
        RouteFailure {
            status,
            error: self,
        }
    }

    fn log(&self) {
        match self {
            AppError::NotFound(msg) => tracing::info!("Not found: {}", msg),
            AppError::BadRequest(msg) => tracing::info!("Bad request: {}", msg),
            AppError::JsonRejection(e) => tracing::warn!("JSON extraction error: {:?}", e),
            AppError::QueryRejection(e) => tracing::warn!("Query extraction error: {:?}", e),
            AppError::PathRejection(e) => tracing::warn!("Path extraction error: {:?}", e),
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::InternalServerError(msg) => tracing::error!("Internal server error: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        self.with_status(status).into_response()
    }
}

/// An [`AppError`] bound to the status its route declares.
#[derive(Debug)]
pub struct RouteFailure {
    pub status: StatusCode,
    pub error: AppError,
}

impl IntoResponse for RouteFailure {
    fn into_response(self) -> Response {
        self.error.log();
        let body = Json(ApiResponse::failure(self.error.to_string()));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_uses_natural_status() {
        let response = AppError::NotFound("Product not found with id: 9".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Product not found with id: 9");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_with_status_overrides_kind() {
        let response = AppError::NotFound("Product not found with id: 9".into())
            .with_status(StatusCode::BAD_REQUEST)
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Product not found with id: 9");
    }

    #[tokio::test]
    async fn test_database_error_message() {
        let response = AppError::Database(DbErr::Custom("pool timed out".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("Database error:"));
        assert!(message.contains("pool timed out"));
    }
}

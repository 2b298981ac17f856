use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found with id: {0}")]
    NotFound(i64),

    #[error("Product not found with code: {0}")]
    CodeNotFound(String),

    /// One or more field messages joined with `"; "`
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}

/// Field messages ordered by field name, so the text is stable across runs.
impl From<ValidationErrors> for ProductError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));

        let messages: Vec<String> = fields
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .map(|e| match &e.message {
                Some(message) => message.to_string(),
                None => e.code.to_string(),
            })
            .collect();

        ProductError::Validation(messages.join("; "))
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        let message = err.to_string();
        match err {
            ProductError::NotFound(_) | ProductError::CodeNotFound(_) => AppError::NotFound(message),
            ProductError::Validation(_) => AppError::BadRequest(message),
            ProductError::Database(_) => AppError::InternalServerError(message),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

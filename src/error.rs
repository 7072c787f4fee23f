use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Malformed identifier or mutation body.
    #[error("Invalid query")]
    InvalidQuery,

    #[error("Invalid sort_by query")]
    InvalidSortBy,

    #[error("Invalid order query")]
    InvalidOrder,

    /// Vote change would drive the stored count negative.
    #[error("Change would result in invalid value")]
    InvalidVoteChange,

    /// Identifier was well-formed but no matching row exists.
    #[error("{0} not found")]
    NotFound(String),

    /// A referenced value (e.g. a category slug) does not exist.
    #[error("value not found")]
    ValueNotFound,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl utoipa::ToSchema for AppError {
    fn name() -> std::borrow::Cow<'static, str> {
        "ErrorResponse".into()
    }
}

impl utoipa::PartialSchema for AppError {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        ErrorResponse::schema()
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidQuery
            | AppError::InvalidSortBy
            | AppError::InvalidOrder
            | AppError::InvalidVoteChange => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::ValueNotFound => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error_message = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "error": error_message,
        });

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

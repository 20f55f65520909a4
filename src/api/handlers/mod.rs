//! HTTP handlers for the users API.
//!
//! Every failure is answered with a JSON body of the form `{"error": "..."}`.

pub mod health;
pub mod users;

use crate::api::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

pub const INVALID_ID: &str = "Invalid ID format";
pub const NOT_FOUND: &str = "User not found";
pub const EMAIL_EXISTS: &str = crate::users::validation::EMAIL_EXISTS;
pub const INTERNAL: &str = "Internal server error";

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("User not found")]
    NotFound,

    #[error("Email already exists")]
    Conflict,

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            StoreError::DuplicateEmail => Self::Conflict,
            StoreError::Database(err) => Self::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND.to_string()),
            Self::Conflict => (StatusCode::CONFLICT, EMAIL_EXISTS.to_string()),
            Self::Database(err) => {
                error!("Failed to handle user request: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

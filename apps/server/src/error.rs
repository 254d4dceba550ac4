use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use coinfolio_core::errors::{Error as CoreError, SourceError};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Auth(#[from] AuthError),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

/// An unconfigured exchange is our problem (503); anything else the
/// exchange did is a bad gateway.
fn source_status(error: &SourceError) -> StatusCode {
    if error.unconfigured {
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    tracing::warn!(
        upstream_status = ?error.status,
        retryable = error.retryable,
        "{} source failed: {}",
        error.kind,
        error.message
    );
    StatusCode::BAD_GATEWAY
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(CoreError::Source(e)) => source_status(e),
            ApiError::Auth(AuthError::NotConfigured) => StatusCode::NOT_FOUND,
            ApiError::Auth(AuthError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

//! Error responses for HTTP handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cardswap_core::{CardswapError, ErrorResponse};

pub type ApiResult<T> = Result<T, ApiError>;

/// A domain error on its way out as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub CardswapError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CardswapError::Unauthorized => StatusCode::UNAUTHORIZED,
            CardswapError::AlreadyExists(_) | CardswapError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            CardswapError::UserNotFound(_) | CardswapError::CardNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            CardswapError::ConstraintViolation(_) => StatusCode::CONFLICT,
            CardswapError::Database(_) | CardswapError::PasswordHash(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<CardswapError> for ApiError {
    fn from(e: CardswapError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_internal() {
            tracing::error!("Request failed: {}", self.0);
        }

        let body = Json(ErrorResponse {
            detail: self.0.detail(),
            code: self.0.code().to_string(),
        });
        (self.status(), body).into_response()
    }
}

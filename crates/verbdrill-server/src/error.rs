//! API error types.
//!
//! Every error is rendered as `{"data": "<code>"}` with a matching status, the
//! same envelope successful responses use.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use verbdrill_core::RoundError;

use crate::routes::ApiResponse;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A round engine condition (unknown round, inactive session, ...).
    #[error(transparent)]
    Round(#[from] RoundError),

    /// Login for an account that does not exist.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A token-protected read with no active session.
    #[error("unauthorized")]
    Unauthorized,

    /// `test-login` was called while disabled in the config.
    #[error("test login is disabled")]
    TestLoginDisabled,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Round(RoundError::Unauthorized) => StatusCode::UNAUTHORIZED,
            ApiError::Round(RoundError::RoundNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Round(RoundError::RoundComplete(_)) => StatusCode::CONFLICT,
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::TestLoginDisabled => StatusCode::NOT_FOUND,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Round(e) => e.code(),
            ApiError::InvalidCredentials => "invalid_credentials",
            ApiError::Unauthorized => "unauthorized",
            ApiError::TestLoginDisabled => "test_login_disabled",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(status = %self.status(), error = %self, "request failed");
        (self.status(), Json(ApiResponse::new(self.code()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_errors_map_to_statuses() {
        let cases = [
            (RoundError::Unauthorized, StatusCode::UNAUTHORIZED, "unauthorized"),
            (
                RoundError::RoundNotFound("r".into()),
                StatusCode::NOT_FOUND,
                "round_not_found",
            ),
            (
                RoundError::RoundComplete("r".into()),
                StatusCode::CONFLICT,
                "round_complete",
            ),
        ];
        for (err, status, code) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status(), status);
            assert_eq!(api.code(), code);
        }
    }

    #[test]
    fn auth_errors_map_to_statuses() {
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidCredentials.code(), "invalid_credentials");
        assert_eq!(ApiError::TestLoginDisabled.status(), StatusCode::NOT_FOUND);
    }
}

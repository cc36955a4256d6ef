//! Request-boundary error type. Every failure leaves as `{ "message": ... }`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domains::auth::AuthError;
use crate::domains::notes::NoteError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn internal(err: anyhow::Error) -> Self {
        error!(error = %err, "Request failed with internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(MessageResponse::new(self.message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::Validation(_)
            | AuthError::OtpNotFound
            | AuthError::OtpExpired
            | AuthError::OtpMismatch => StatusCode::BAD_REQUEST,
            AuthError::Conflict => StatusCode::CONFLICT,
            AuthError::UnknownUser => StatusCode::NOT_FOUND,
            AuthError::Unauthenticated | AuthError::InvalidToken | AuthError::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::DeliveryFailure(_) => StatusCode::BAD_GATEWAY,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match err {
            AuthError::Internal(inner) => Self::internal(inner),
            // Provider detail stays in the logs
            AuthError::DeliveryFailure(_) => Self::new(status, "Failed to send OTP email"),
            other => Self::new(status, other.to_string()),
        }
    }
}

impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        let status = match &err {
            NoteError::Validation(_) => StatusCode::BAD_REQUEST,
            NoteError::Forbidden => StatusCode::FORBIDDEN,
            NoteError::NotFound | NoteError::UserNotFound => StatusCode::NOT_FOUND,
            NoteError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match err {
            NoteError::Internal(inner) => Self::internal(inner),
            other => Self::new(status, other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

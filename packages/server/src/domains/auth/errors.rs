use thiserror::Error;

use super::jwt::TokenError;

/// Failures of the OTP flow and the session gate.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("No OTP was requested for this email")]
    OtpNotFound,

    #[error("OTP has expired, please request a new one")]
    OtpExpired,

    #[error("Invalid OTP")]
    OtpMismatch,

    #[error("An account with this email already exists")]
    Conflict,

    #[error("No account found for this email, please sign up")]
    UnknownUser,

    #[error("Failed to send OTP email: {0}")]
    DeliveryFailure(String),

    #[error("No token provided")]
    Unauthenticated,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::TokenExpired,
            TokenError::Invalid => Self::InvalidToken,
        }
    }
}

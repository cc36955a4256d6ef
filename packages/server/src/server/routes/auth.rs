//! OTP signup and login endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domains::auth::actions;
use crate::server::app::AppState;
use crate::server::error::{ApiError, MessageResponse};

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
    pub dob: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
    pub name: Option<String>,
    pub dob: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub message: String,
    pub token: String,
}

/// POST /send-otp
pub async fn send_otp_handler(
    State(state): State<AppState>,
    payload: Result<Json<SendOtpRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;

    actions::send_otp(
        &request.email,
        request.name.as_deref(),
        request.dob.as_deref(),
        &state.deps,
    )
    .await?;

    Ok(Json(MessageResponse::new("OTP sent to your email")))
}

/// POST /verify-otp
pub async fn verify_otp_handler(
    State(state): State<AppState>,
    payload: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(request) = payload?;

    let verified = actions::verify_otp(
        &request.email,
        &request.otp,
        request.name.as_deref(),
        request.dob.as_deref(),
        &state.deps,
    )
    .await?;

    Ok(Json(TokenResponse {
        message: "Signup successful".to_string(),
        token: verified.token,
    }))
}

/// POST /login
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(request) = payload?;

    let verified = actions::login(&request.email, &request.otp, &state.deps).await?;

    Ok(Json(TokenResponse {
        message: "Login successful".to_string(),
        token: verified.token,
    }))
}

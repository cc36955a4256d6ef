//! Login action (existing users)

use tracing::info;

use super::verify_otp::{check_code, consume_code};
use crate::domains::auth::errors::AuthError;
use crate::domains::auth::models::parse_email;
use crate::domains::auth::types::OtpVerified;
use crate::kernel::ServerDeps;

/// Exchange a valid code for a session token of an already registered user.
pub async fn login(email: &str, otp: &str, deps: &ServerDeps) -> Result<OtpVerified, AuthError> {
    let email = parse_email(email)?;
    let record = check_code(&email, otp, deps).await?;

    let user = deps
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AuthError::UnknownUser)?;

    consume_code(&record, deps).await?;

    info!(user_id = %user.id, "User logged in");
    let token = deps.jwt_service.create_token(user.id, user.email.clone())?;

    Ok(OtpVerified {
        user_id: user.id,
        email: user.email,
        token,
        created: false,
    })
}

//! Verify OTP action (signup completion)

use chrono::Utc;
use tracing::{info, warn};

use crate::domains::auth::errors::AuthError;
use crate::domains::auth::models::{parse_date_of_birth, parse_email, PendingVerification};
use crate::domains::auth::types::OtpVerified;
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

/// Check a submitted code for `email`, leaving the record in place.
pub(super) async fn check_code(
    email: &str,
    otp: &str,
    deps: &ServerDeps,
) -> Result<PendingVerification, AuthError> {
    let otp = otp.trim();
    if otp.is_empty() {
        return Err(AuthError::validation("OTP is required"));
    }

    deps.otp_store
        .check(email, otp, Utc::now())
        .await
        .inspect_err(|e| warn!(email = %email, reason = %e, "OTP verification failed"))
}

/// Single-use guard: the winner of a concurrent race is the only one that proceeds.
pub(super) async fn consume_code(
    record: &PendingVerification,
    deps: &ServerDeps,
) -> Result<(), AuthError> {
    if deps.otp_store.consume(record).await {
        Ok(())
    } else {
        warn!(email = %record.email, "OTP consumed or replaced concurrently");
        Err(AuthError::OtpNotFound)
    }
}

/// Complete a signup: verify the code, create the user and issue a session token.
///
/// Name and date of birth come from the request and fall back to the values
/// remembered when the code was sent. An already registered email is a
/// `Conflict` and the code stays valid for a login instead.
pub async fn verify_otp(
    email: &str,
    otp: &str,
    name: Option<&str>,
    dob: Option<&str>,
    deps: &ServerDeps,
) -> Result<OtpVerified, AuthError> {
    let email = parse_email(email)?;
    let record = check_code(&email, otp, deps).await?;
    let profile = record.pending_profile.clone().unwrap_or_default();

    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .or(profile.name)
        .ok_or_else(|| AuthError::validation("Name is required"))?;
    let date_of_birth = match dob.map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => parse_date_of_birth(raw)?,
        None => profile
            .date_of_birth
            .ok_or_else(|| AuthError::validation("Date of birth is required"))?,
    };

    if deps.users.find_by_email(&email).await?.is_some() {
        info!(email = %email, "Signup attempted for registered email");
        return Err(AuthError::Conflict);
    }

    consume_code(&record, deps).await?;

    let user = User::builder()
        .name(name)
        .email(email.clone())
        .date_of_birth(date_of_birth)
        .build();
    let user = match deps.users.insert(user).await {
        Ok(Some(user)) => user,
        failed => {
            // Give the code back so the caller can retry or log in instead
            deps.otp_store.restore(record).await;
            return Err(match failed {
                Err(e) => AuthError::Internal(e),
                _ => AuthError::Conflict,
            });
        }
    };
    info!(user_id = %user.id, email = %email, "Created new user");

    let token = deps.jwt_service.create_token(user.id, user.email.clone())?;

    Ok(OtpVerified {
        user_id: user.id,
        email: user.email,
        token,
        created: true,
    })
}

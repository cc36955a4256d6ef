//! Send OTP action

use tracing::{error, info};

use crate::domains::auth::errors::AuthError;
use crate::domains::auth::models::{
    generate_code, parse_date_of_birth, parse_email, PendingProfile, PendingVerification,
};
use crate::domains::auth::types::OtpSent;
use crate::kernel::ServerDeps;

/// Issue a fresh passcode for `email` and mail it.
///
/// Any earlier code for the same email is replaced. Optional signup fields are
/// remembered so verification can fall back to them. If delivery fails the
/// record stays stored and the caller may retry.
pub async fn send_otp(
    email: &str,
    name: Option<&str>,
    dob: Option<&str>,
    deps: &ServerDeps,
) -> Result<OtpSent, AuthError> {
    let email = parse_email(email)?;

    let name = name.map(str::trim).filter(|n| !n.is_empty()).map(String::from);
    let date_of_birth = match dob.map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => Some(parse_date_of_birth(raw)?),
        None => None,
    };
    let pending_profile = (name.is_some() || date_of_birth.is_some()).then(|| PendingProfile {
        name,
        date_of_birth,
    });

    let policy = deps.otp_policy;
    let code = generate_code(policy.code_length);
    let record = PendingVerification::new(email.clone(), &code, policy.ttl, pending_profile);
    let expires_at = record.expires_at;

    if deps.otp_store.upsert(record).await.is_some() {
        info!(email = %email, "Replaced pending OTP");
    }

    deps.mailer
        .send_otp(&email, &code, policy.ttl_minutes())
        .await
        .map_err(|e| {
            error!(email = %email, error = %e, "Failed to send OTP");
            AuthError::DeliveryFailure(e.to_string())
        })?;

    info!(email = %email, "OTP sent");
    Ok(OtpSent { email, expires_at })
}

use chrono::NaiveDate;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::domains::auth::errors::AuthError;

/// Canonical form used as the key for pending codes and user lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalize and minimally validate an email address.
pub fn parse_email(email: &str) -> Result<String, AuthError> {
    let email = normalize_email(email);
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace),
        None => false,
    };
    if !valid {
        return Err(AuthError::validation("Valid email is required"));
    }
    Ok(email)
}

/// Parse a `YYYY-MM-DD` date of birth as sent by the signup form.
pub fn parse_date_of_birth(raw: &str) -> Result<NaiveDate, AuthError> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AuthError::validation("Date of birth must be formatted as YYYY-MM-DD"))?;
    if date > chrono::Utc::now().date_naive() {
        return Err(AuthError::validation("Date of birth cannot be in the future"));
    }
    Ok(date)
}

/// Random numeric passcode of `length` digits.
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// SHA256 digest of a passcode. Codes are only ever stored hashed.
pub fn hash_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.trim().as_bytes());
    hex::encode(hasher.finalize())
}

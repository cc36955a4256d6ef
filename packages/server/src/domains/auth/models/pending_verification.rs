use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::identifier::hash_code;

/// Signup fields captured when the code was requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingProfile {
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// The currently valid passcode for one email address.
#[derive(Debug, Clone)]
pub struct PendingVerification {
    pub email: String,
    pub code_hash: String,
    pub expires_at: DateTime<Utc>,
    pub pending_profile: Option<PendingProfile>,
}

impl PendingVerification {
    pub fn new(
        email: impl Into<String>,
        code: &str,
        ttl: Duration,
        pending_profile: Option<PendingProfile>,
    ) -> Self {
        Self {
            email: email.into(),
            code_hash: hash_code(code),
            expires_at: Utc::now() + ttl,
            pending_profile,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn matches(&self, code: &str) -> bool {
        self.code_hash == hash_code(code)
    }
}

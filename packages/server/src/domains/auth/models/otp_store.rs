use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::PendingVerification;
use crate::domains::auth::errors::AuthError;

/// In-memory store of pending passcodes, keyed by normalized email.
///
/// Created once at startup and shared by issuance and verification. Records
/// disappear on successful verification or a resend. Expired records stay
/// behind so late submissions still report expiry, until `purge_expired`
/// drops them after a grace period.
#[derive(Clone, Default)]
pub struct OtpStore {
    pending: Arc<RwLock<HashMap<String, PendingVerification>>>,
}

impl OtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for its email. Returns the replaced record.
    pub async fn upsert(&self, record: PendingVerification) -> Option<PendingVerification> {
        let mut pending = self.pending.write().await;
        pending.insert(record.email.clone(), record)
    }

    pub async fn get(&self, email: &str) -> Option<PendingVerification> {
        self.pending.read().await.get(email).cloned()
    }

    /// Check a submitted code without consuming it.
    ///
    /// Expired records report `OtpExpired` even when the code matches, and
    /// are kept so every later attempt does too. A wrong code leaves the
    /// record in place.
    pub async fn check(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<PendingVerification, AuthError> {
        let pending = self.pending.read().await;
        let record = pending.get(email).ok_or(AuthError::OtpNotFound)?;

        if record.is_expired_at(now) {
            return Err(AuthError::OtpExpired);
        }
        if !record.matches(code) {
            return Err(AuthError::OtpMismatch);
        }
        Ok(record.clone())
    }

    /// Remove `record` only if it is still the current one for its email.
    ///
    /// Returns false when the code was already consumed or replaced by a resend.
    pub async fn consume(&self, record: &PendingVerification) -> bool {
        let mut pending = self.pending.write().await;
        let is_current = pending.get(&record.email).is_some_and(|current| {
            current.code_hash == record.code_hash && current.expires_at == record.expires_at
        });
        if is_current {
            pending.remove(&record.email);
        }
        is_current
    }

    /// Put a consumed record back unless a resend already replaced it.
    ///
    /// Used when the step after consumption fails, so the code can be retried.
    pub async fn restore(&self, record: PendingVerification) -> bool {
        let mut pending = self.pending.write().await;
        if pending.contains_key(&record.email) {
            return false;
        }
        pending.insert(record.email.clone(), record);
        true
    }

    /// Drop records that expired more than `grace` ago, returning how many
    /// were removed.
    pub async fn purge_expired(&self, now: DateTime<Utc>, grace: Duration) -> usize {
        let mut pending = self.pending.write().await;
        let before = pending.len();
        pending.retain(|_, record| !record.is_expired_at(now - grace));
        before - pending.len()
    }

    pub async fn len(&self) -> usize {
        self.pending.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pending.read().await.is_empty()
    }
}

//! Server dependencies (using traits for testability)

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use mailer::MailerService;

use crate::domains::auth::{JwtService, OtpPolicy, OtpStore};
use crate::kernel::{BaseMailer, BaseNoteStore, BaseUserStore};

// =============================================================================
// MailerService Adapter (implements BaseMailer trait)
// =============================================================================

/// Wrapper around MailerService that implements BaseMailer trait
pub struct MailerAdapter(pub Arc<MailerService>);

impl MailerAdapter {
    pub fn new(service: Arc<MailerService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseMailer for MailerAdapter {
    async fn send_otp(&self, email: &str, code: &str, valid_for_minutes: i64) -> Result<()> {
        self.0
            .send_otp(email, code, valid_for_minutes)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
}

/// Development mailer that writes codes to the log instead of sending them
pub struct LogMailer;

#[async_trait]
impl BaseMailer for LogMailer {
    async fn send_otp(&self, email: &str, code: &str, valid_for_minutes: i64) -> Result<()> {
        warn!(
            email = %email,
            code = %code,
            valid_for_minutes,
            "MAIL_API_KEY not set: logging OTP instead of sending"
        );
        Ok(())
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Which backend holds users and notes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

/// Dependencies shared by every request handler
#[derive(Clone)]
pub struct ServerDeps {
    pub users: Arc<dyn BaseUserStore>,
    pub notes: Arc<dyn BaseNoteStore>,
    pub mailer: Arc<dyn BaseMailer>,
    /// Process-scoped pending passcodes
    pub otp_store: OtpStore,
    pub otp_policy: OtpPolicy,
    pub jwt_service: Arc<JwtService>,
    pub storage: StorageBackend,
}

impl ServerDeps {
    pub fn new(
        users: Arc<dyn BaseUserStore>,
        notes: Arc<dyn BaseNoteStore>,
        mailer: Arc<dyn BaseMailer>,
        otp_store: OtpStore,
        otp_policy: OtpPolicy,
        jwt_service: Arc<JwtService>,
        storage: StorageBackend,
    ) -> Self {
        Self {
            users,
            notes,
            mailer,
            otp_store,
            otp_policy,
            jwt_service,
            storage,
        }
    }
}

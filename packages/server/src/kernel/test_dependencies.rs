// TestDependencies - mock implementations for testing
//
// Provides mock services and in-memory storage that can be assembled into ServerDeps.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

use super::{BaseMailer, InMemoryStore, ServerDeps, StorageBackend};
use crate::domains::auth::{JwtService, OtpPolicy, OtpStore};
use crate::domains::users::models::User;

pub const TEST_JWT_SECRET: &str = "test_secret_key";
pub const TEST_JWT_ISSUER: &str = "test_issuer";

// =============================================================================
// Mock Mailer
// =============================================================================

/// Records every passcode it is asked to deliver
pub struct MockMailer {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// A mailer whose provider always rejects the message
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// All (email, code) pairs that were delivered
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// The most recent code delivered to `email`
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMailer for MockMailer {
    async fn send_otp(&self, email: &str, code: &str, _valid_for_minutes: i64) -> Result<()> {
        if self.fail {
            return Err(anyhow!("mail provider unavailable"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub mailer: Arc<MockMailer>,
    pub store: InMemoryStore,
    pub otp_store: OtpStore,
    pub otp_policy: OtpPolicy,
    pub jwt_service: Arc<JwtService>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            mailer: Arc::new(MockMailer::new()),
            store: InMemoryStore::new(),
            otp_store: OtpStore::new(),
            otp_policy: OtpPolicy::default(),
            jwt_service: Arc::new(JwtService::new(
                TEST_JWT_SECRET,
                TEST_JWT_ISSUER.to_string(),
                chrono::Duration::hours(24),
            )),
        }
    }

    /// Set a mock mailer
    pub fn mock_mailer(mut self, mailer: MockMailer) -> Self {
        self.mailer = Arc::new(mailer);
        self
    }

    /// Override the passcode policy
    pub fn otp_policy(mut self, policy: OtpPolicy) -> Self {
        self.otp_policy = policy;
        self
    }

    /// Insert a registered user directly, bypassing the OTP flow
    pub async fn seed_user(&self, name: &str, email: &str) -> User {
        let user = User::builder()
            .name(name)
            .email(email)
            .date_of_birth(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap())
            .build();
        super::BaseUserStore::insert(&self.store, user)
            .await
            .unwrap()
            .expect("seeded email must be unique")
    }

    /// Assemble ServerDeps sharing this instance's mocks and stores
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            self.mailer.clone(),
            self.otp_store.clone(),
            self.otp_policy,
            self.jwt_service.clone(),
            StorageBackend::Memory,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

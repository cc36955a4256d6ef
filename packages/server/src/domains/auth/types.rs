//! Auth domain data types

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::common::UserId;

/// How passcodes are minted.
#[derive(Debug, Clone, Copy)]
pub struct OtpPolicy {
    pub ttl: Duration,
    pub code_length: usize,
}

impl OtpPolicy {
    pub fn ttl_minutes(&self) -> i64 {
        // Round up so a 90 second window is not advertised as 1 minute
        (self.ttl.num_seconds() + 59) / 60
    }
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(5),
            code_length: 6,
        }
    }
}

/// Result of sending an OTP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpSent {
    pub email: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// Result of a successful signup or login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerified {
    pub user_id: UserId,
    pub email: String,
    pub token: String,
    pub created: bool,
}

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use mailer::DEFAULT_API_URL;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Unset selects in-memory storage
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub session_ttl_hours: i64,
    pub otp_ttl_secs: i64,
    pub otp_length: usize,
    /// Zero disables the background sweep
    pub otp_sweep_interval_secs: u64,
    /// Empty allows any origin
    pub allowed_origins: Vec<String>,
    pub mail_api_url: String,
    /// Unset logs codes instead of sending them (debug builds only)
    pub mail_api_key: Option<String>,
    pub mail_from: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            database_url: var("DATABASE_URL"),
            jwt_secret: var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: var("JWT_ISSUER").unwrap_or_else(|| "notes-app".to_string()),
            session_ttl_hours: var("SESSION_TTL_HOURS")
                .unwrap_or_else(|| "24".to_string())
                .parse()
                .context("SESSION_TTL_HOURS must be a valid number")?,
            otp_ttl_secs: var("OTP_TTL_SECS")
                .unwrap_or_else(|| "300".to_string())
                .parse()
                .context("OTP_TTL_SECS must be a valid number")?,
            otp_length: var("OTP_LENGTH")
                .unwrap_or_else(|| "6".to_string())
                .parse()
                .context("OTP_LENGTH must be a valid number")?,
            otp_sweep_interval_secs: var("OTP_SWEEP_INTERVAL_SECS")
                .unwrap_or_else(|| "60".to_string())
                .parse()
                .context("OTP_SWEEP_INTERVAL_SECS must be a valid number")?,
            allowed_origins: var("ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            mail_api_url: var("MAIL_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            mail_api_key: var("MAIL_API_KEY"),
            mail_from: var("MAIL_FROM").unwrap_or_else(|| "Note App <noreply@notes.app>".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.session_ttl_hours > 0, "SESSION_TTL_HOURS must be positive");
        anyhow::ensure!(self.otp_ttl_secs > 0, "OTP_TTL_SECS must be positive");
        anyhow::ensure!(
            (4..=10).contains(&self.otp_length),
            "OTP_LENGTH must be between 4 and 10"
        );
        if self.mail_api_key.is_none() && !cfg!(debug_assertions) {
            anyhow::bail!("MAIL_API_KEY must be set in release builds");
        }
        Ok(())
    }
}

//! Auth domain - email one-time passcodes and session tokens
//!
//! Flow:
//!   send_otp → code stored hashed in OtpStore + mailed
//!   verify_otp (signup) / login → code checked and consumed → JWT issued
//!
//! Responsibilities:
//! - Passcode issuance, expiry and single-use consumption
//! - Session/JWT token management
//! - Email normalization

pub mod actions;
pub mod errors;
pub mod jwt;
pub mod models;
pub mod types;

pub use errors::AuthError;
pub use jwt::{Claims, JwtService, TokenError};
pub use models::OtpStore;
pub use types::{OtpPolicy, OtpSent, OtpVerified};

pub mod identifier;
pub mod otp_store;
pub mod pending_verification;

pub use identifier::*;
pub use otp_store::OtpStore;
pub use pending_verification::{PendingProfile, PendingVerification};

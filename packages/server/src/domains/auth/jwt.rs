use anyhow::Result;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::UserId;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,     // Subject (user id as string)
    pub user_id: UserId, // User id
    pub email: String,   // Email (for logging/debugging)
    pub exp: i64,        // Expiration timestamp
    pub iat: i64,        // Issued at timestamp
    pub iss: String,     // Issuer
    pub jti: String,     // JWT ID (unique token identifier)
}

/// Why a presented token was refused.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is invalid")]
    Invalid,
}

/// JWT Service - creates and verifies session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: chrono::Duration,
}

impl JwtService {
    pub fn new(secret: &str, issuer: String, ttl: chrono::Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            ttl,
        }
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Create a session token for a user, valid for the configured TTL
    pub fn create_token(&self, user_id: UserId, email: String) -> Result<String> {
        self.create_token_with_ttl(user_id, email, self.ttl)
    }

    pub fn create_token_with_ttl(
        &self,
        user_id: UserId,
        email: String,
        ttl: chrono::Duration,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + ttl;

        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            email,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify signature, issuer and expiry, returning the decoded claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

//! Credential codec: password hashing and session tokens.
//!
//! Passwords are hashed with bcrypt on the blocking thread pool. Session
//! tokens are HS256 JWTs carrying the user id, email and role, verified
//! statelessly on every request.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use medjobs_models::{Role, UserId};

/// Session token lifetime (7 days).
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Longest session token lifetime accepted from configuration (1 year).
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// bcrypt work factor used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Range of work factors bcrypt accepts.
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Token lifetime out of range: {0:?}")]
    Lifetime(Duration),
}

/// The verified caller behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
}

impl From<SessionClaims> for Identity {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// bcrypt password hashing with a tunable cost.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password with a fresh random salt.
    pub async fn hash(&self, password: String) -> Result<String, CredentialError> {
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| CredentialError::Hashing(e.to_string()))?
            .map_err(|e| CredentialError::Hashing(e.to_string()))
    }

    /// Check a password against a stored hash.
    ///
    /// A malformed hash is a mismatch, not an error.
    pub async fn verify(&self, password: String, hash: String) -> bool {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
            .await
            .unwrap_or(false)
    }
}

/// Issues and verifies signed session tokens.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issue a token for the given identity, valid for the configured TTL.
    pub fn issue(&self, user_id: UserId, email: &str, role: Role) -> Result<String, CredentialError> {
        self.issue_at(user_id, email, role, Utc::now().timestamp())
    }

    fn issue_at(
        &self,
        user_id: UserId,
        email: &str,
        role: Role,
        issued_at: i64,
    ) -> Result<String, CredentialError> {
        let exp = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|ttl| issued_at.checked_add(ttl))
            .ok_or(CredentialError::Lifetime(self.ttl))?;

        let claims = SessionClaims {
            user_id,
            email: email.to_string(),
            role,
            iat: issued_at,
            exp,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Verify signature, algorithm and expiry.
    ///
    /// Every failure (expired, tampered, malformed, unknown role) yields
    /// `None`.
    pub fn verify(&self, token: &str) -> Option<Identity> {
        match decode::<SessionClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(data.claims.into()),
            Err(e) => {
                debug!("Rejected session token: {}", e);
                None
            }
        }
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(b"test-secret", DEFAULT_TOKEN_TTL)
    }

    #[tokio::test]
    async fn test_hash_is_salted_and_verifies() {
        let hasher = PasswordHasher::new(4);
        let first = hasher.hash("s3cret!".to_string()).await.unwrap();
        let second = hasher.hash("s3cret!".to_string()).await.unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("s3cret!".to_string(), first.clone()).await);
        assert!(hasher.verify("s3cret!".to_string(), second).await);
        assert!(!hasher.verify("wrong".to_string(), first).await);
    }

    #[tokio::test]
    async fn test_verify_malformed_hash_is_false() {
        let hasher = PasswordHasher::new(4);
        assert!(!hasher.verify("anything".to_string(), "not-a-hash".to_string()).await);
        assert!(!hasher.verify("anything".to_string(), String::new()).await);
    }

    #[test]
    fn test_token_round_trip() {
        let codec = codec();
        let token = codec.issue(UserId(17), "hr@mercy.org", Role::Hospital).unwrap();

        let identity = codec.verify(&token).unwrap();
        assert_eq!(identity.user_id, UserId(17));
        assert_eq!(identity.email, "hr@mercy.org");
        assert_eq!(identity.role, Role::Hospital);
    }

    #[test]
    fn test_token_expires_after_seven_days() {
        let codec = codec();
        let eight_days_ago = Utc::now().timestamp() - 8 * 24 * 60 * 60;
        let expired = codec
            .issue_at(UserId(1), "a@b.c", Role::Jobseeker, eight_days_ago)
            .unwrap();
        assert!(codec.verify(&expired).is_none());

        let six_days_ago = Utc::now().timestamp() - 6 * 24 * 60 * 60;
        let fresh = codec
            .issue_at(UserId(1), "a@b.c", Role::Jobseeker, six_days_ago)
            .unwrap();
        assert!(codec.verify(&fresh).is_some());
    }

    #[test]
    fn test_oversized_lifetime_is_an_error() {
        let codec = TokenCodec::new(b"test-secret", Duration::from_secs(u64::MAX));
        let result = codec.issue(UserId(1), "a@b.c", Role::Hospital);
        assert!(matches!(result, Err(CredentialError::Lifetime(_))));

        let codec = TokenCodec::new(b"test-secret", Duration::from_secs(i64::MAX as u64));
        let result = codec.issue(UserId(1), "a@b.c", Role::Hospital);
        assert!(matches!(result, Err(CredentialError::Lifetime(_))));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let other = TokenCodec::new(b"another-secret", DEFAULT_TOKEN_TTL);
        let token = other.issue(UserId(1), "a@b.c", Role::Hospital).unwrap();
        assert!(codec().verify(&token).is_none());
    }

    #[test]
    fn test_any_altered_byte_is_rejected() {
        let codec = codec();
        let token = codec.issue(UserId(5), "nurse@example.com", Role::Jobseeker).unwrap();

        for i in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let altered = String::from_utf8(bytes).unwrap();
            assert!(codec.verify(&altered).is_none(), "byte {i} altered but accepted");
        }
    }

    #[test]
    fn test_garbage_is_rejected() {
        let codec = codec();
        assert!(codec.verify("").is_none());
        assert!(codec.verify("not.a.jwt").is_none());
        assert!(codec.verify("a.b").is_none());
    }
}

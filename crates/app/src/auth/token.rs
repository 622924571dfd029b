//! Session token signing and verification.

use std::fmt;

use jiff::{Timestamp, ToSpan};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by an admin session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Admin username.
    pub sub: String,
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Expiry (Unix seconds).
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("failed to sign session token")]
    Sign(#[source] jsonwebtoken::errors::Error),

    #[error("session ttl out of range")]
    TtlOutOfRange,

    #[error("invalid or expired session token")]
    Invalid,
}

/// Signs and verifies admin session tokens (HS256, expiring).
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_minutes: i64,
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKeys(**redacted**)")
    }
}

impl SessionKeys {
    #[must_use]
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }

    /// Issue a token for the given admin username.
    ///
    /// # Errors
    ///
    /// Returns an error when signing fails or the TTL overflows.
    pub fn issue(&self, username: &str) -> Result<String, SessionTokenError> {
        let now = Timestamp::now();

        let expires_at = now
            .checked_add((self.ttl_minutes * 60).seconds())
            .map_err(|_error| SessionTokenError::TtlOutOfRange)?;

        let claims = SessionClaims {
            sub: username.to_owned(),
            iat: now.as_second(),
            exp: expires_at.as_second(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(SessionTokenError::Sign)
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// # Errors
    ///
    /// Any malformed, forged, or expired token is rejected uniformly.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionTokenError> {
        decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_error| SessionTokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const SECRET: &str = "test-session-secret";

    #[test]
    fn issue_and_verify_round_trip() -> TestResult {
        let keys = SessionKeys::new(SECRET, 60);

        let token = keys.issue("Jessicabat")?;
        let claims = keys.verify(&token)?;

        assert_eq!(claims.sub, "Jessicabat");
        assert!(claims.exp > claims.iat, "token must expire after issuance");

        Ok(())
    }

    #[test]
    fn verify_rejects_other_key() -> TestResult {
        let keys = SessionKeys::new(SECRET, 60);
        let other = SessionKeys::new("another-secret", 60);

        let token = keys.issue("Jessicabat")?;

        assert!(
            matches!(other.verify(&token), Err(SessionTokenError::Invalid)),
            "token signed with a different key must not verify"
        );

        Ok(())
    }

    #[test]
    fn verify_rejects_expired_token() -> TestResult {
        let keys = SessionKeys::new(SECRET, 60);
        let now = Timestamp::now().as_second();

        // Two hours stale, well past any default validation leeway.
        let claims = SessionClaims {
            sub: "Jessicabat".to_owned(),
            iat: now - 10_800,
            exp: now - 7200,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )?;

        assert!(
            matches!(keys.verify(&token), Err(SessionTokenError::Invalid)),
            "expired token must not verify"
        );

        Ok(())
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = SessionKeys::new(SECRET, 60);

        assert!(
            matches!(keys.verify("not-a-token"), Err(SessionTokenError::Invalid)),
            "garbage must not verify"
        );
    }
}

//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::token::SessionTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("too many failed login attempts")]
    RateLimited,

    #[error("invalid or expired session token")]
    InvalidToken,

    #[error("password hash error")]
    Hash(#[source] argon2::password_hash::Error),

    #[error("session token error")]
    Token(#[from] SessionTokenError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::auth::{
    AdminIdentity, AuthServiceError, LoginThrottle, SessionKeys,
    password::{hash_password, verify_password},
    repository::AuthRepository,
};

pub struct PgAuthService {
    repository: Arc<dyn AuthRepository>,
    keys: SessionKeys,
    throttle: LoginThrottle,
}

impl std::fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgAuthService").finish_non_exhaustive()
    }
}

impl PgAuthService {
    #[must_use]
    pub fn new(
        repository: Arc<dyn AuthRepository>,
        keys: SessionKeys,
        throttle: LoginThrottle,
    ) -> Self {
        Self {
            repository,
            keys,
            throttle,
        }
    }

    /// Create or update the admin credential row with a fresh hash.
    ///
    /// # Errors
    ///
    /// Returns an error when hashing or the credential upsert fails.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<(), AuthServiceError> {
        let password_hash = hash_password(password)?;

        self.repository
            .upsert_admin(username, &password_hash)
            .await
            .map_err(AuthServiceError::from)?;

        info!(%username, "admin credentials ensured");

        Ok(())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(
        &self,
        client: &str,
        username: &str,
        password: &str,
    ) -> Result<String, AuthServiceError> {
        if self.throttle.is_blocked(client).await {
            return Err(AuthServiceError::RateLimited);
        }

        let admin = self
            .repository
            .find_admin_by_username(username)
            .await
            .map_err(AuthServiceError::from)?;

        // Unknown user and wrong password share one failure path so the
        // caller cannot tell them apart.
        let verified = match &admin {
            Some(admin) => verify_password(&admin.password_hash, password)?,
            None => false,
        };

        if !verified {
            self.throttle.record_failure(client).await;

            return Err(AuthServiceError::InvalidCredentials);
        }

        Ok(self.keys.issue(username)?)
    }

    async fn authenticate_bearer(&self, token: &str) -> Result<AdminIdentity, AuthServiceError> {
        let claims = self
            .keys
            .verify(token)
            .map_err(|_error| AuthServiceError::InvalidToken)?;

        Ok(AdminIdentity {
            username: claims.sub,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and issue a session token.
    async fn login(
        &self,
        client: &str,
        username: &str,
        password: &str,
    ) -> Result<String, AuthServiceError>;

    /// Validate a bearer token, returning the authenticated identity.
    async fn authenticate_bearer(&self, token: &str) -> Result<AdminIdentity, AuthServiceError>;
}

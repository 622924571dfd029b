//! App Context

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, AuthServiceError, LoginThrottle, PgAuthRepository, PgAuthService, SessionKeys},
    catalog::{CatalogService, PgCatalogRepository, PgCatalogService},
    database,
    storage::LocalImageStore,
};

/// Configuration consumed by [`AppContext::init`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub uploads_dir: PathBuf,
    pub session_secret: String,
    pub session_ttl_minutes: i64,
    /// Seed credentials; when both are present the admin row is upserted
    /// at startup.
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to initialize database")]
    Database(#[source] sqlx::Error),

    #[error("failed to seed admin credentials")]
    Auth(#[source] AuthServiceError),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Connect, ensure the schema, and wire up the services.
    ///
    /// # Errors
    ///
    /// Returns an error when the database connection, schema setup, or
    /// admin seeding fails.
    pub async fn init(config: AppConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(&config.database_url)
            .await
            .map_err(AppInitError::Database)?;

        database::init_schema(&pool)
            .await
            .map_err(AppInitError::Database)?;

        let catalog = PgCatalogService::new(
            Arc::new(PgCatalogRepository::new(pool.clone())),
            Arc::new(LocalImageStore::new(config.uploads_dir)),
        );

        let auth = PgAuthService::new(
            Arc::new(PgAuthRepository::new(pool)),
            SessionKeys::new(&config.session_secret, config.session_ttl_minutes),
            LoginThrottle::default(),
        );

        if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password)
        {
            auth.ensure_admin(username, password)
                .await
                .map_err(AppInitError::Auth)?;
        }

        Ok(Self {
            catalog: Arc::new(catalog),
            auth: Arc::new(auth),
        })
    }
}

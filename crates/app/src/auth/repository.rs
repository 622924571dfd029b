//! Auth repository.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::auth::models::AdminUser;

const FIND_ADMIN_BY_USERNAME_SQL: &str = include_str!("sql/find_admin_by_username.sql");
const UPSERT_ADMIN_SQL: &str = include_str!("sql/upsert_admin.sql");

#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthRepository for PgAuthRepository {
    async fn find_admin_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, sqlx::Error> {
        query_as::<Postgres, AdminUser>(FIND_ADMIN_BY_USERNAME_SQL)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    async fn upsert_admin(&self, username: &str, password_hash: &str) -> Result<(), sqlx::Error> {
        query(UPSERT_ADMIN_SQL)
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map(|_result| ())
    }
}

impl<'r> FromRow<'r, PgRow> for AdminUser {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Look up the admin credential row by username.
    async fn find_admin_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, sqlx::Error>;

    /// Create or replace the admin credential row.
    async fn upsert_admin(&self, username: &str, password_hash: &str) -> Result<(), sqlx::Error>;
}

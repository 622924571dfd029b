//! Database connection management

use sqlx::PgPool;

const SCHEMA_SQL: &str = include_str!("sql/schema.sql");

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Create the tables the service needs if they do not exist yet.
///
/// # Errors
///
/// Returns an error when any of the schema statements fail.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await
        .map(|_result| ())
}

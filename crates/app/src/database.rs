//! Database connection management

use std::error::Error as StdError;

use sqlx::{PgPool, Postgres, Transaction};

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when a connection cannot be acquired or the transaction cannot start.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Begin a read-only transaction whose reads all see one snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when a connection cannot be acquired or the transaction cannot start.
    pub async fn begin_snapshot(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool
            .begin_with("BEGIN ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .await
    }

    /// Underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply pending migrations from the workspace `migrations/` directory.
///
/// # Errors
///
/// Returns an error if any migration fails.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

pub(crate) fn column_error<E>(column: &str, source: E) -> sqlx::Error
where
    E: StdError + Send + Sync + 'static,
{
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

/// Money columns are `BIGINT`; amounts are unsigned minor units.
pub(crate) fn amount_to_db(column: &str, amount: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|error| column_error(column, error))
}

pub(crate) fn amount_from_db(column: &str, amount: i64) -> Result<u64, sqlx::Error> {
    u64::try_from(amount).map_err(|error| column_error(column, error))
}

/// Counters and limits are `INTEGER`.
pub(crate) fn count_to_db(column: &str, count: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(count).map_err(|error| column_error(column, error))
}

pub(crate) fn count_from_db(column: &str, count: i32) -> Result<u32, sqlx::Error> {
    u32::try_from(count).map_err(|error| column_error(column, error))
}

/// Name of the constraint a database error tripped, if any.
pub(crate) fn violated_constraint(error: &sqlx::Error) -> Option<&str> {
    error.as_database_error().and_then(|error| error.constraint())
}

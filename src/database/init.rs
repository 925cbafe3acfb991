//! Connection pool setup and the transactional session wrapper.

use super::retry::RetryPolicy;
use crate::error::RpgResult;
use crate::settings::Settings;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres, Transaction};
use std::future::Future;
use std::time::Duration;
use tracing::info;

/// A type alias for the database connection pool (`Pool<Postgres>`).
pub type DbPool = Pool<Postgres>;
/// A transaction borrowed from the pool.
pub type DbTx = Transaction<'static, Postgres>;

/// Owns the pool and the retry policy applied to service operations.
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    retry: RetryPolicy,
}

impl Database {
    pub fn new(pool: DbPool, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    /// Connects, then applies embedded migrations.
    pub async fn connect(settings: &Settings) -> RpgResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.db_max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&settings.database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!(target = "db", max_connections = settings.db_max_connections, "database ready");
        Ok(Self::new(pool, RetryPolicy::default()))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Read-write transaction. Rolls back on drop unless committed.
    pub async fn begin(&self) -> RpgResult<DbTx> {
        Ok(self.pool.begin().await?)
    }

    /// Transaction that rejects writes; used by views.
    pub async fn begin_read_only(&self) -> RpgResult<DbTx> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    /// Runs `op` under the retry policy.
    pub async fn retrying<T, F, Fut>(&self, label: &str, op: F) -> RpgResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = RpgResult<T>>,
    {
        self.retry.run(label, op).await
    }
}

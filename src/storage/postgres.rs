//! Postgres backend: one row per key in `kv_entries`.

use sqlx::PgPool;

use super::{KvStore, StorageError};

pub struct PgKv {
    pool: PgPool,
}

impl PgKv {
    /// Connect, run migrations, and wrap the pool.
    ///
    /// # Errors
    ///
    /// Returns a database error if the connection or migrations fail.
    pub async fn open(database_url: &str) -> Result<Self, StorageError> {
        let pool = crate::db::init_pool(database_url).await?;
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool. Migrations are assumed to have run.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl KvStore for PgKv {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_entries WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO kv_entries (key, value, updated_at) VALUES ($1, $2, now())
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = now()",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv_entries WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), StorageError> {
        self.pool.close().await;
        Ok(())
    }
}

#[cfg(all(test, feature = "live-db-tests"))]
#[path = "postgres_test.rs"]
mod tests;

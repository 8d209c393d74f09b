//! Storage port: string key/value store.
//!
//! DESIGN
//! ======
//! The friend record and the session marker each live under one string key,
//! the same shape a browser `localStorage` offers. Services only see the
//! `KvStore` trait, so the backend is chosen at startup and tests inject
//! `MemoryKv`.
//!
//! LIFECYCLE
//! =========
//! Each backend has an `open` constructor. `close` releases resources; after
//! it, operations fail with [`StorageError::Closed`].

pub mod file;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use tracing::info;

use crate::config::StorageBackend;

pub use file::FileKv;
pub use memory::MemoryKv;
pub use postgres::PgKv;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("storage encode failed: {0}")]
    Encode(String),
    #[error("storage is closed")]
    Closed,
}

impl StorageError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }
}

impl crate::error::ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "E_STORAGE_IO",
            Self::Database(_) => "E_DATABASE",
            Self::Encode(_) => "E_STORAGE_ENCODE",
            Self::Closed => "E_STORAGE_CLOSED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Database(_))
    }
}

// =============================================================================
// PORT
// =============================================================================

/// Key/value storage port. Values are opaque strings.
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value under `key`, or `None` if it was never set or was removed.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value under `key`. Readers observe either the old or the
    /// new value, never a partial one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Release backend resources.
    async fn close(&self) -> Result<(), StorageError>;
}

/// Open the backend selected by configuration.
///
/// # Errors
///
/// Returns an error if the backing file cannot be read or the database
/// connection / migrations fail.
pub async fn open(backend: &StorageBackend) -> Result<Arc<dyn KvStore>, StorageError> {
    match backend {
        StorageBackend::Memory => {
            info!("storage: in-memory backend (data is lost on exit)");
            Ok(Arc::new(MemoryKv::new()))
        }
        StorageBackend::File { path } => {
            let kv = FileKv::open(path.clone()).await?;
            info!(path = %kv.path().display(), "storage: file backend");
            Ok(Arc::new(kv))
        }
        StorageBackend::Postgres { database_url } => {
            info!("storage: postgres backend");
            Ok(Arc::new(PgKv::open(database_url).await?))
        }
    }
}

//! Record store: lazy initialization, whole-record load and save.
//!
//! DESIGN
//! ======
//! The friend record is one JSON value under [`RECORD_KEY`]. Every change
//! is a read-modify-write of the whole record through [`Store::modify`];
//! there are no field-level updates.
//!
//! CONCURRENCY
//! ===========
//! An in-process writer lock serializes read-modify-write sequences, so
//! concurrent requests in one server never lose each other's updates.
//! Separate processes sharing the same backend are not coordinated: the
//! last `save` wins and the other writer's change is lost.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::ErrorCode;
use crate::model::{Record, Slot, UnknownSlot, now_ms};
use crate::storage::{KvStore, StorageError};

pub const RECORD_KEY: &str = "friendConnectData";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("corrupt data: {0}")]
    CorruptData(String),
    #[error("unknown slot: {0}")]
    UnknownSlot(String),
    #[error("status text must not be empty")]
    EmptyText,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<UnknownSlot> for StoreError {
    fn from(e: UnknownSlot) -> Self {
        Self::UnknownSlot(e.0)
    }
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CorruptData(_) => "E_CORRUPT_DATA",
            Self::UnknownSlot(_) => "E_UNKNOWN_SLOT",
            Self::EmptyText => "E_EMPTY_TEXT",
            Self::Storage(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Storage(e) if e.retryable())
    }
}

/// Handle to the persisted friend record. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    kv: Arc<dyn KvStore>,
    writer: Arc<Mutex<()>>,
}

// =============================================================================
// STORE
// =============================================================================

impl Store {
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv, writer: Arc::new(Mutex::new(())) }
    }

    /// Write the default record if none exists. Returns `true` if it did.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend read or write fails.
    pub async fn initialize(&self) -> Result<bool, StoreError> {
        let _guard = self.writer.lock().await;
        if self.kv.get(RECORD_KEY).await?.is_some() {
            return Ok(false);
        }
        self.seed_locked().await?;
        Ok(true)
    }

    /// Read the record, seeding it first if nothing was ever stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CorruptData`] if the stored value does not decode
    /// into a valid record, or a storage error.
    pub async fn load(&self) -> Result<Record, StoreError> {
        if let Some(raw) = self.kv.get(RECORD_KEY).await? {
            return decode_record(&raw);
        }
        let _guard = self.writer.lock().await;
        self.load_locked().await
    }

    /// Overwrite the stored record.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend write fails.
    pub async fn save(&self, record: &Record) -> Result<(), StoreError> {
        let _guard = self.writer.lock().await;
        self.write_locked(record).await
    }

    /// Read-modify-write under the writer lock. If `change` fails, nothing
    /// is written and the stored record is untouched.
    ///
    /// # Errors
    ///
    /// Returns the error from `change`, or a load/save error.
    pub async fn modify<T>(&self, change: impl FnOnce(&mut Record) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let _guard = self.writer.lock().await;
        let mut record = self.load_locked().await?;
        let out = change(&mut record)?;
        self.write_locked(&record).await?;
        Ok(out)
    }

    /// `getFriendsData`: the whole record as the UI renders it.
    ///
    /// # Errors
    ///
    /// Same as [`Store::load`].
    pub async fn get_friends_data(&self) -> Result<Record, StoreError> {
        self.load().await
    }

    #[cfg(test)]
    pub(crate) fn kv(&self) -> &Arc<dyn KvStore> {
        &self.kv
    }

    async fn load_locked(&self) -> Result<Record, StoreError> {
        match self.kv.get(RECORD_KEY).await? {
            Some(raw) => decode_record(&raw),
            None => self.seed_locked().await,
        }
    }

    async fn seed_locked(&self) -> Result<Record, StoreError> {
        let record = Record::seed(now_ms());
        self.write_locked(&record).await?;
        info!("store: default record created");
        Ok(record)
    }

    async fn write_locked(&self, record: &Record) -> Result<(), StoreError> {
        let raw = encode_record(record)?;
        self.kv.set(RECORD_KEY, &raw).await?;
        debug!(bytes = raw.len(), "store: record saved");
        Ok(())
    }
}

// =============================================================================
// CODEC
// =============================================================================

pub(crate) fn encode_record(record: &Record) -> Result<String, StoreError> {
    serde_json::to_string(record).map_err(|e| StoreError::Storage(StorageError::Encode(e.to_string())))
}

/// Decode and sanity-check a stored record.
pub(crate) fn decode_record(raw: &str) -> Result<Record, StoreError> {
    let record: Record = serde_json::from_str(raw).map_err(|e| StoreError::CorruptData(e.to_string()))?;
    for slot in Slot::ALL {
        let profile = record.profile(slot);
        if profile.id != slot {
            return Err(StoreError::CorruptData(format!("{slot} entry carries id {}", profile.id)));
        }
        let Some(latest) = profile.status_history.first() else {
            return Err(StoreError::CorruptData(format!("{slot} has an empty status history")));
        };
        if *latest != profile.current_status {
            return Err(StoreError::CorruptData(format!(
                "{slot} current status {} is not the newest history entry",
                profile.current_status.id
            )));
        }
    }
    Ok(record)
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

//! Current-user session marker.
//!
//! ARCHITECTURE
//! ============
//! The marker is the raw slot id stored under [`SESSION_KEY`], next to the
//! friend record in the same key/value store but with its own lifecycle: it
//! survives restarts and is only changed by login, explicit set, or logout.
//!
//! TRADE-OFFS
//! ==========
//! There is one marker per store, not per client. Whoever logs in last owns
//! the session for every client of this server.

use std::sync::Arc;

use tracing::{info, warn};

use super::status;
use super::store::{Store, StoreError};
use crate::model::{Slot, UserProfile};
use crate::storage::KvStore;

pub const SESSION_KEY: &str = "friendConnectSession";

#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KvStore>,
}

impl SessionStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// The logged-in slot, or `None` if never set or cleared.
    /// A marker that is not a known slot id reads as logged out.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend read fails.
    pub async fn get_current(&self) -> Result<Option<Slot>, StoreError> {
        let Some(raw) = self.kv.get(SESSION_KEY).await? else {
            return Ok(None);
        };
        match raw.parse::<Slot>() {
            Ok(slot) => Ok(Some(slot)),
            Err(e) => {
                warn!(error = %e, "session: ignoring unrecognized marker");
                Ok(None)
            }
        }
    }

    /// Persist `slot` as the logged-in user, replacing any previous marker.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend write fails.
    pub async fn set_current(&self, slot: Slot) -> Result<(), StoreError> {
        self.kv.set(SESSION_KEY, slot.as_str()).await?;
        info!(%slot, "session: set");
        Ok(())
    }

    /// Remove the marker.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend write fails.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.kv.remove(SESSION_KEY).await?;
        info!("session: cleared");
        Ok(())
    }
}

/// Claim `slot`: apply the profile fields, then mark it as the session.
///
/// # Errors
///
/// Returns a load/save error from the store or the session write.
pub async fn login(
    store: &Store,
    session: &SessionStore,
    slot: Slot,
    name: &str,
    avatar_url: &str,
) -> Result<UserProfile, StoreError> {
    let profile = status::update_profile(store, slot, name, avatar_url).await?;
    session.set_current(slot).await?;
    Ok(profile)
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

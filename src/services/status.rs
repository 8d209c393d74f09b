//! Profile and status updates over the friend record.
//!
//! The `apply_*` functions are the pure record transformations; the async
//! wrappers run them inside [`Store::modify`].

use tracing::info;

use super::store::{Store, StoreError};
use crate::model::{Record, Slot, StatusEntry, UserProfile, now_ms};

/// Replace name and avatar. A blank field keeps the previous value.
pub fn apply_profile(record: &mut Record, slot: Slot, name: &str, avatar_url: &str) -> UserProfile {
    let profile = record.profile_mut(slot);
    if !name.trim().is_empty() {
        profile.name = name.to_string();
    }
    if !avatar_url.trim().is_empty() {
        profile.avatar_url = avatar_url.to_string();
    }
    profile.clone()
}

/// Make `entry` the current status and prepend it to the history.
pub fn apply_status(record: &mut Record, slot: Slot, entry: StatusEntry) -> UserProfile {
    let profile = record.profile_mut(slot);
    profile.current_status = entry.clone();
    profile.status_history.insert(0, entry);
    profile.clone()
}

/// `updateProfile`: change display name and/or avatar for `slot`.
///
/// # Errors
///
/// Returns a load/save error from the store.
pub async fn update_profile(store: &Store, slot: Slot, name: &str, avatar_url: &str) -> Result<UserProfile, StoreError> {
    let profile = store
        .modify(|record| Ok(apply_profile(record, slot, name, avatar_url)))
        .await?;
    info!(%slot, name = %profile.name, "profile updated");
    Ok(profile)
}

/// `updateMyStatus`: post a new status for `slot`.
///
/// # Errors
///
/// Returns [`StoreError::EmptyText`] if `text` is blank, or a load/save error.
pub async fn update_my_status(store: &Store, slot: Slot, text: &str) -> Result<UserProfile, StoreError> {
    if text.trim().is_empty() {
        return Err(StoreError::EmptyText);
    }
    let entry = StatusEntry::new(text, now_ms());
    let profile = store
        .modify(|record| Ok(apply_status(record, slot, entry)))
        .await?;
    info!(%slot, history_len = profile.status_history.len(), "status posted");
    Ok(profile)
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;

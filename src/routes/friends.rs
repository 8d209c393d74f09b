//! Friend profile, status, history and suggestion routes.

use axum::extract::{Path, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::parse_slot;
use crate::error::ApiError;
use crate::model::{Record, UserProfile, now_ms};
use crate::services::history::{self, HistoryView};
use crate::services::status;
use crate::services::suggestion::{self, RECENT_STATUS_LIMIT, SuggestionError};
use crate::state::AppState;

/// Longest status the compose form accepts, in characters.
pub const MAX_STATUS_CHARS: usize = 50;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProfileBody {
    pub name: String,
    pub avatar_url: String,
}

#[derive(Debug, Deserialize)]
pub struct PostStatusBody {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub suggestion: String,
}

/// `GET /api/friends`: both profiles.
pub async fn list_friends(State(state): State<AppState>) -> Result<Json<Record>, ApiError> {
    Ok(Json(state.store.get_friends_data().await?))
}

/// `GET /api/friends/:slot`: one profile.
pub async fn get_friend(State(state): State<AppState>, Path(slot): Path<String>) -> Result<Json<UserProfile>, ApiError> {
    let slot = parse_slot(&slot)?;
    let record = state.store.load().await?;
    Ok(Json(record.profile(slot).clone()))
}

/// `PATCH /api/friends/:slot/profile`: change name and/or avatar.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(slot): Path<String>,
    Json(body): Json<UpdateProfileBody>,
) -> Result<Json<UserProfile>, ApiError> {
    let slot = parse_slot(&slot)?;
    let profile = status::update_profile(&state.store, slot, &body.name, &body.avatar_url).await?;
    Ok(Json(profile))
}

/// `POST /api/friends/:slot/status`: post a new status.
pub async fn post_status(
    State(state): State<AppState>,
    Path(slot): Path<String>,
    Json(body): Json<PostStatusBody>,
) -> Result<Json<UserProfile>, ApiError> {
    let slot = parse_slot(&slot)?;
    if body.text.chars().count() > MAX_STATUS_CHARS {
        return Err(ApiError::StatusTooLong { max: MAX_STATUS_CHARS });
    }
    let profile = status::update_my_status(&state.store, slot, &body.text).await?;
    Ok(Json(profile))
}

/// `GET /api/friends/:slot/history`: history with relative ages.
pub async fn history(State(state): State<AppState>, Path(slot): Path<String>) -> Result<Json<HistoryView>, ApiError> {
    let slot = parse_slot(&slot)?;
    let record = state.store.load().await?;
    Ok(Json(history::history_view(record.profile(slot), now_ms())))
}

/// `POST /api/friends/:slot/suggestion`: ask the model for a new status.
pub async fn suggest_status(
    State(state): State<AppState>,
    Path(slot): Path<String>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let slot = parse_slot(&slot)?;
    let Some(llm) = state.llm.as_deref() else {
        return Err(SuggestionError::NotConfigured.into());
    };
    let _permit = state.suggestions.try_acquire(slot)?;

    let record = state.store.load().await?;
    let recent = record.profile(slot).recent_texts(RECENT_STATUS_LIMIT);
    info!(%slot, recent = recent.len(), "suggestion requested");

    let suggestion = suggestion::suggest(llm, &recent).await?;
    Ok(Json(SuggestionResponse { suggestion }))
}

#[cfg(test)]
#[path = "friends_test.rs"]
mod tests;

//! Session, login and dashboard routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use super::parse_slot;
use crate::error::ApiError;
use crate::model::{Slot, UserProfile};
use crate::services::session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub slot: Option<Slot>,
}

#[derive(Debug, Deserialize)]
pub struct SetSessionBody {
    pub slot: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    pub slot: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// One entry in the login screen's slot picker.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOption {
    pub slot: Slot,
    pub name: String,
    pub avatar_url: String,
    /// True while the slot carries either placeholder name.
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub me: UserProfile,
    pub friend: UserProfile,
}

/// `GET /api/session`: the logged-in slot, or null.
pub async fn get_session(State(state): State<AppState>) -> Result<Json<SessionResponse>, ApiError> {
    let slot = state.session.get_current().await?;
    Ok(Json(SessionResponse { slot }))
}

/// `PUT /api/session`: set the logged-in slot.
pub async fn set_session(
    State(state): State<AppState>,
    Json(body): Json<SetSessionBody>,
) -> Result<Json<SessionResponse>, ApiError> {
    let slot = parse_slot(&body.slot)?;
    state.session.set_current(slot).await?;
    Ok(Json(SessionResponse { slot: Some(slot) }))
}

/// `DELETE /api/session`: log out.
pub async fn clear_session(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.session.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/session/login`: claim or re-enter a slot.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginBody>) -> Result<Json<UserProfile>, ApiError> {
    let slot = parse_slot(&body.slot)?;
    if body.name.trim().is_empty() {
        return Err(ApiError::EmptyName);
    }
    let profile = session::login(&state.store, &state.session, slot, &body.name, &body.avatar_url).await?;
    Ok(Json(profile))
}

/// `GET /api/login-options`: both slots with their availability.
pub async fn login_options(State(state): State<AppState>) -> Result<Json<Vec<LoginOption>>, ApiError> {
    let record = state.store.get_friends_data().await?;
    let options = Slot::ALL
        .iter()
        .map(|&slot| {
            let profile = record.profile(slot);
            LoginOption {
                slot,
                name: profile.name.clone(),
                avatar_url: profile.avatar_url.clone(),
                available: profile.is_placeholder(),
            }
        })
        .collect();
    Ok(Json(options))
}

/// `GET /api/dashboard`: the logged-in profile and the friend's.
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, ApiError> {
    let Some(slot) = state.session.get_current().await? else {
        return Err(ApiError::NotLoggedIn);
    };
    let record = state.store.load().await?;
    Ok(Json(DashboardResponse {
        me: record.profile(slot).clone(),
        friend: record.profile(slot.other()).clone(),
    }))
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use quill_types::api::FriendRequestResponse;

use crate::error::{ApiError, concept_error};
use crate::middleware::CurrentUser;
use crate::responses;
use crate::state::AppState;

/// GET /friends — usernames of everyone the caller is friends with.
pub async fn get_friends(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<String>>, ApiError> {
    let ids = state
        .friends
        .get_friends(current.id)
        .map_err(|e| concept_error(&state.users, e))?;
    let names = state
        .users
        .ids_to_usernames(&ids)
        .map_err(|e| concept_error(&state.users, e))?;
    Ok(Json(names))
}

/// DELETE /friends/{friend}
pub async fn remove_friend(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(friend): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let friend = state
        .users
        .get_by_username(&friend)
        .map_err(|e| concept_error(&state.users, e))?;
    state
        .friends
        .remove_friend(current.id, friend.id)
        .map_err(|e| concept_error(&state.users, e))?;
    Ok(Json(json!({ "msg": "Friend removed!" })))
}

/// GET /friend/requests — pending requests involving the caller, with both
/// endpoints resolved to usernames.
pub async fn get_requests(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<FriendRequestResponse>>, ApiError> {
    let requests = state
        .friends
        .get_requests(current.id)
        .map_err(|e| concept_error(&state.users, e))?;
    let formatted = responses::friend_requests(&state.users, requests)
        .map_err(|e| concept_error(&state.users, e))?;
    Ok(Json(formatted))
}

/// POST /friend/requests/{to}
pub async fn send_request(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(to): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let to = state
        .users
        .get_by_username(&to)
        .map_err(|e| concept_error(&state.users, e))?;
    state
        .friends
        .send_request(current.id, to.id)
        .map_err(|e| concept_error(&state.users, e))?;
    Ok((StatusCode::CREATED, Json(json!({ "msg": "Friend request sent!" }))))
}

/// DELETE /friend/requests/{to} — sender cancels their own pending request.
pub async fn remove_request(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(to): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let to = state
        .users
        .get_by_username(&to)
        .map_err(|e| concept_error(&state.users, e))?;
    state
        .friends
        .remove_request(current.id, to.id)
        .map_err(|e| concept_error(&state.users, e))?;
    Ok(Json(json!({ "msg": "Friend request removed!" })))
}

/// PUT /friend/accept/{from}
pub async fn accept_request(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(from): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let from = state
        .users
        .get_by_username(&from)
        .map_err(|e| concept_error(&state.users, e))?;
    state
        .friends
        .accept_request(from.id, current.id)
        .map_err(|e| concept_error(&state.users, e))?;
    Ok(Json(json!({ "msg": "Friend request accepted!" })))
}

/// PUT /friend/reject/{from}
pub async fn reject_request(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(from): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let from = state
        .users
        .get_by_username(&from)
        .map_err(|e| concept_error(&state.users, e))?;
    state
        .friends
        .reject_request(from.id, current.id)
        .map_err(|e| concept_error(&state.users, e))?;
    Ok(Json(json!({ "msg": "Friend request rejected!" })))
}

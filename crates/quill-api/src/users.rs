use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use quill_types::api::UserUpdate;
use quill_types::models::User;

use crate::error::{ApiError, concept_error};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// GET /users
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .users
        .get_users()
        .map_err(|e| concept_error(&state.users, e))?;
    Ok(Json(users))
}

/// GET /users/{username}
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .users
        .get_by_username(&username)
        .map_err(|e| concept_error(&state.users, e))?;
    Ok(Json(user))
}

/// PATCH /users — update the logged-in account (username/password only).
pub async fn update_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .users
        .update(current.id, update)
        .map_err(|e| concept_error(&state.users, e))?;
    Ok(Json(user))
}

/// DELETE /users — delete the logged-in account and all of its sessions.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .users
        .delete(current.id)
        .map_err(|e| concept_error(&state.users, e))?;
    state.sessions.end_all_for(current.id);
    Ok(Json(json!({ "msg": "Account deleted!" })))
}

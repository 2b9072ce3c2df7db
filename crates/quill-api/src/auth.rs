use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde_json::json;

use quill_concepts::ConceptError;
use quill_types::api::{LoginRequest, LoginResponse, RegisterRequest};
use quill_types::models::User;

use crate::error::{ApiError, concept_error};
use crate::middleware::{CurrentUser, bearer_token};
use crate::state::AppState;

/// POST /users — register a new account. Registration is only allowed while
/// logged out; a request carrying a live session token is rejected.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = bearer_token(&headers) {
        if state.sessions.user(token).is_some() {
            return Err(concept_error(&state.users, ConceptError::AlreadyLoggedIn));
        }
    }

    let user = state
        .users
        .create(&req.username, &req.password)
        .map_err(|e| concept_error(&state.users, e))?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /login — verify credentials and start a session.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .users
        .authenticate(&req.username, &req.password)
        .map_err(|e| concept_error(&state.users, e))?;

    let token = state.sessions.start(user.id);

    Ok(Json(LoginResponse {
        user_id: user.id,
        username: user.username,
        token,
    }))
}

/// POST /logout — end the presented session.
pub async fn logout(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> impl IntoResponse {
    state.sessions.end(&current.token);
    Json(json!({ "msg": "Logged out!" }))
}

/// GET /session — the user behind the presented session token.
pub async fn session(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .users
        .get_by_id(current.id)
        .map_err(|e| concept_error(&state.users, e))?;
    Ok(Json(user))
}

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use quill_types::api::{MessageResponse, SendMessageRequest};

use crate::error::{ApiError, concept_error};
use crate::middleware::CurrentUser;
use crate::responses;
use crate::state::AppState;

/// POST /messages — share one of your own entries with another user. The
/// sender must be the entry's author; the concept rejects self-sends.
pub async fn send_message(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let err = |e| concept_error(&state.users, e);

    let recipient = state.users.get_by_username(&req.recipient).map_err(err)?;
    state.entries.is_author(current.id, req.content).map_err(err)?;

    let message = state
        .messages
        .send(current.id, recipient.id, req.content)
        .map_err(err)?;
    let formatted =
        responses::message(&state.users, &state.entries, message).map_err(err)?;
    Ok((StatusCode::CREATED, Json(formatted)))
}

/// GET /messages/sent — most recently updated first.
pub async fn get_sent_messages(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let err = |e| concept_error(&state.users, e);

    let messages = state.messages.get_sent(current.id).map_err(err)?;
    let formatted =
        responses::messages(&state.users, &state.entries, messages).map_err(err)?;
    Ok(Json(formatted))
}

/// GET /messages/received — most recently updated first.
pub async fn get_received_messages(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let err = |e| concept_error(&state.users, e);

    let messages = state.messages.get_received(current.id).map_err(err)?;
    let formatted =
        responses::messages(&state.users, &state.entries, messages).map_err(err)?;
    Ok(Json(formatted))
}

use axum::{
    Extension, Json,
    extract::State,
    response::IntoResponse,
};
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use quill_concepts::ConceptError;
use quill_types::api::{EntryResponse, VisibilityRequest};

use crate::error::{ApiError, concept_error};
use crate::middleware::CurrentUser;
use crate::responses;
use crate::state::AppState;

/// GET /visibility — the entries currently visible to the caller.
pub async fn get_visible_content(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<EntryResponse>>, ApiError> {
    let err = |e| concept_error(&state.users, e);

    let content = state.visibility.visible_content(current.id).map_err(err)?;
    let entries = resolve_entries(&state, &content)?;
    let formatted = responses::entries(&state.users, entries).map_err(err)?;
    Ok(Json(formatted))
}

/// POST /visibility/visible — grant a user sight of an entry. Granting a
/// user their own entry is a no-op: authors always see their own entries.
pub async fn make_visible(
    State(state): State<AppState>,
    Json(req): Json<VisibilityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let err = |e| concept_error(&state.users, e);

    let user = state.users.get_by_username(&req.username).map_err(err)?;
    let entry = state.entries.get_by_id(req.content_id).map_err(err)?;

    if entry.author == user.id {
        return Ok(Json(json!({
            "msg": "A user's own entry is always visible to themselves."
        })));
    }

    let newly_visible = state
        .visibility
        .make_visible(user.id, req.content_id)
        .map_err(err)?;
    let msg = if newly_visible {
        "Successfully made content visible!"
    } else {
        "Content is already visible."
    };

    let content = state.visibility.visible_content(user.id).map_err(err)?;
    let entries = resolve_entries(&state, &content)?;
    let formatted = responses::entries(&state.users, entries).map_err(err)?;

    Ok(Json(json!({ "msg": msg, "visible_content": formatted })))
}

/// POST /visibility/invisible — revoke a grant; revoking an absent grant is
/// a no-op.
pub async fn make_invisible(
    State(state): State<AppState>,
    Json(req): Json<VisibilityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let err = |e| concept_error(&state.users, e);

    let user = state.users.get_by_username(&req.username).map_err(err)?;
    let entry = state.entries.get_by_id(req.content_id).map_err(err)?;

    if entry.author == user.id {
        return Ok(Json(json!({
            "msg": "Cannot make a user's own entry invisible to them."
        })));
    }

    let removed = state
        .visibility
        .make_invisible(user.id, req.content_id)
        .map_err(err)?;
    let msg = if removed {
        "Successfully made content invisible!"
    } else {
        "Content is already invisible."
    };

    let content = state.visibility.visible_content(user.id).map_err(err)?;
    let entries = resolve_entries(&state, &content)?;
    let formatted = responses::entries(&state.users, entries).map_err(err)?;

    Ok(Json(json!({ "msg": msg, "visible_content": formatted })))
}

/// Grants are not cleaned up when an entry is deleted, so dangling ids are
/// expected here; they are skipped rather than failing the whole listing.
fn resolve_entries(
    state: &AppState,
    content: &[Uuid],
) -> Result<Vec<quill_types::models::Entry>, ApiError> {
    let mut entries = Vec::with_capacity(content.len());
    for id in content {
        match state.entries.get_by_id(*id) {
            Ok(entry) => entries.push(entry),
            Err(ConceptError::EntryNotFound { .. }) => {
                warn!("visibility grant references deleted entry {}", id);
            }
            Err(e) => return Err(concept_error(&state.users, e)),
        }
    }
    Ok(entries)
}

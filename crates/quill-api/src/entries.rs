use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Value, json};
use uuid::Uuid;

use quill_types::api::{CreateEntryRequest, EntriesQuery, EntryUpdate};

use crate::error::{ApiError, concept_error};
use crate::middleware::CurrentUser;
use crate::responses;
use crate::state::AppState;

/// GET /entries — all entries, an author's entries, a single entry by id,
/// or (author, id) combined, which additionally checks ownership.
pub async fn get_entries(
    State(state): State<AppState>,
    Query(query): Query<EntriesQuery>,
) -> Result<Json<Value>, ApiError> {
    let err = |e| concept_error(&state.users, e);

    match (query.author, query.id) {
        (Some(author), Some(id)) => {
            let author = state.users.get_by_username(&author).map_err(err)?;
            state.entries.is_author(author.id, id).map_err(err)?;
            single_entry(&state, id)
        }
        (Some(author), None) => {
            let author = state.users.get_by_username(&author).map_err(err)?;
            let entries = state.entries.get_by_author(author.id).map_err(err)?;
            let formatted = responses::entries(&state.users, entries).map_err(err)?;
            to_json(&formatted)
        }
        (None, Some(id)) => single_entry(&state, id),
        (None, None) => {
            let entries = state.entries.get_all().map_err(err)?;
            let formatted = responses::entries(&state.users, entries).map_err(err)?;
            to_json(&formatted)
        }
    }
}

/// POST /entries
pub async fn create_entry(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateEntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let err = |e| concept_error(&state.users, e);

    let entry = state
        .entries
        .add(current.id, &req.prompt, &req.response)
        .map_err(err)?;
    let formatted = responses::entry(&state.users, entry).map_err(err)?;
    Ok((StatusCode::CREATED, Json(formatted)))
}

/// PATCH /entries/{id} — author-only; the concept enforces the response-only
/// field whitelist.
pub async fn edit_entry(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(update): Json<EntryUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let err = |e| concept_error(&state.users, e);

    state.entries.is_author(current.id, id).map_err(err)?;
    let entry = state.entries.edit(id, update).map_err(err)?;
    let formatted = responses::entry(&state.users, entry).map_err(err)?;
    Ok(Json(formatted))
}

/// DELETE /entries/{id} — author-only. Messages and visibility grants that
/// reference the entry are left in place.
pub async fn remove_entry(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let err = |e| concept_error(&state.users, e);

    state.entries.is_author(current.id, id).map_err(err)?;
    state.entries.remove(id).map_err(err)?;
    Ok(Json(json!({ "msg": "Entry deleted successfully!" })))
}

fn single_entry(state: &AppState, id: Uuid) -> Result<Json<Value>, ApiError> {
    let err = |e| concept_error(&state.users, e);
    let entry = state.entries.get_by_id(id).map_err(err)?;
    let formatted = responses::entry(&state.users, entry).map_err(err)?;
    to_json(&formatted)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Json<Value>, ApiError> {
    serde_json::to_value(value)
        .map(Json)
        .map_err(|_| ApiError::internal())
}

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;

use quill_types::api::{CreateProfileRequest, EditProfileRequest, ProfilesQuery};

use crate::error::{ApiError, concept_error};
use crate::middleware::CurrentUser;
use crate::responses;
use crate::state::AppState;

/// POST /profiles — create the caller's profile; one per user.
pub async fn create_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let err = |e| concept_error(&state.users, e);

    let profile = state
        .profiles
        .create(current.id, &req.name, &req.bio, &req.profile_img)
        .map_err(err)?;
    let formatted = responses::profile(&state.users, profile).map_err(err)?;
    Ok((StatusCode::CREATED, Json(formatted)))
}

/// PATCH /profiles/edit — any combination of the three editable fields,
/// applied as independent single-field edits.
pub async fn edit_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<EditProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let err = |e| concept_error(&state.users, e);

    if let Some(name) = &req.name {
        state.profiles.edit_name(current.id, name).map_err(err)?;
    }
    if let Some(bio) = &req.bio {
        state.profiles.edit_bio(current.id, bio).map_err(err)?;
    }
    if let Some(profile_img) = &req.profile_img {
        state.profiles.edit_image(current.id, profile_img).map_err(err)?;
    }

    let profile = state.profiles.get(current.id).map_err(err)?;
    let formatted = responses::profile(&state.users, profile).map_err(err)?;
    Ok(Json(formatted))
}

/// GET /profiles — all profiles, or one user's by username.
pub async fn get_profiles(
    State(state): State<AppState>,
    Query(query): Query<ProfilesQuery>,
) -> Result<Json<Value>, ApiError> {
    let err = |e| concept_error(&state.users, e);

    let value = match query.username {
        Some(username) => {
            let owner = state.users.get_by_username(&username).map_err(err)?;
            let profile = state.profiles.get(owner.id).map_err(err)?;
            let formatted = responses::profile(&state.users, profile).map_err(err)?;
            serde_json::to_value(formatted)
        }
        None => {
            let profiles = state.profiles.get_all().map_err(err)?;
            let formatted = responses::profiles(&state.users, profiles).map_err(err)?;
            serde_json::to_value(formatted)
        }
    };

    value.map(Json).map_err(|_| ApiError::internal())
}

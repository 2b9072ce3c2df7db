use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use quill_types::api::{CreatePostRequest, PostResponse, PostUpdate, PostsQuery};

use crate::error::{ApiError, concept_error};
use crate::middleware::CurrentUser;
use crate::responses;
use crate::state::AppState;

/// GET /posts — all posts, or one author's.
pub async fn get_posts(
    State(state): State<AppState>,
    Query(query): Query<PostsQuery>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let err = |e| concept_error(&state.users, e);

    let posts = match query.author {
        Some(author) => {
            let author = state.users.get_by_username(&author).map_err(err)?;
            state.posts.get_by_author(author.id).map_err(err)?
        }
        None => state.posts.get_posts().map_err(err)?,
    };

    let formatted = responses::posts(&state.users, posts).map_err(err)?;
    Ok(Json(formatted))
}

/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let err = |e| concept_error(&state.users, e);

    let post = state
        .posts
        .create(current.id, &req.content, req.options)
        .map_err(err)?;
    let formatted = responses::post(&state.users, post).map_err(err)?;
    Ok((StatusCode::CREATED, Json(formatted)))
}

/// PATCH /posts/{id} — author-only.
pub async fn update_post(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(update): Json<PostUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let err = |e| concept_error(&state.users, e);

    state.posts.is_author(current.id, id).map_err(err)?;
    let post = state.posts.update(id, update).map_err(err)?;
    let formatted = responses::post(&state.users, post).map_err(err)?;
    Ok(Json(formatted))
}

/// DELETE /posts/{id} — author-only.
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let err = |e| concept_error(&state.users, e);

    state.posts.is_author(current.id, id).map_err(err)?;
    state.posts.delete(id).map_err(err)?;
    Ok(Json(json!({ "msg": "Post deleted successfully!" })))
}

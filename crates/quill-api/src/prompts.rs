use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

/// GET /prompts/random
pub async fn get_random_prompt(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "prompt": state.prompts.random() }))
}

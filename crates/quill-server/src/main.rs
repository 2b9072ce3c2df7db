use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use quill_api::middleware::require_auth;
use quill_api::state::{AppState, AppStateInner};
use quill_api::{auth, entries, friends, messages, posts, profiles, prompts, users, visibility};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("QUILL_DB_PATH").unwrap_or_else(|_| "quill.db".into());
    let host = std::env::var("QUILL_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("QUILL_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database
    let db = Arc::new(quill_db::Database::open(&PathBuf::from(&db_path))?);

    // Shared state: every concept constructed against the same handle
    let state: AppState = Arc::new(AppStateInner::new(db));

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Quill server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

/// The full route table, built once at startup. Session-protected routes
/// sit behind the bearer-token middleware; everything else is public.
fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/users", post(auth::register))
        .route("/users", get(users::get_users))
        .route("/users/{username}", get(users::get_user))
        .route("/login", post(auth::login))
        .route("/prompts/random", get(prompts::get_random_prompt))
        .route("/entries", get(entries::get_entries))
        .route("/posts", get(posts::get_posts))
        .route("/profiles", get(profiles::get_profiles))
        .route("/visibility/visible", post(visibility::make_visible))
        .route("/visibility/invisible", post(visibility::make_invisible))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/session", get(auth::session))
        .route("/logout", post(auth::logout))
        .route("/users", patch(users::update_user))
        .route("/users", delete(users::delete_user))
        .route("/friends", get(friends::get_friends))
        .route("/friends/{friend}", delete(friends::remove_friend))
        .route("/friend/requests", get(friends::get_requests))
        .route("/friend/requests/{to}", post(friends::send_request))
        .route("/friend/requests/{to}", delete(friends::remove_request))
        .route("/friend/accept/{from}", put(friends::accept_request))
        .route("/friend/reject/{from}", put(friends::reject_request))
        .route("/posts", post(posts::create_post))
        .route("/posts/{id}", patch(posts::update_post))
        .route("/posts/{id}", delete(posts::delete_post))
        .route("/entries", post(entries::create_entry))
        .route("/entries/{id}", patch(entries::edit_entry))
        .route("/entries/{id}", delete(entries::remove_entry))
        .route("/messages", post(messages::send_message))
        .route("/messages/sent", get(messages::get_sent_messages))
        .route("/messages/received", get(messages::get_received_messages))
        .route("/profiles", post(profiles::create_profile))
        .route("/profiles/edit", patch(profiles::edit_profile))
        .route("/visibility", get(visibility::get_visible_content))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use quill_concepts::{ConceptError, ErrorKind, UserConcept};

/// User-facing error, produced at the HTTP boundary.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Format a concept error for the client. Friend-lifecycle errors carry raw
/// user ids; they are resolved to usernames here, at the boundary, using the
/// user concept as the lookup capability.
pub fn concept_error(users: &UserConcept, err: ConceptError) -> ApiError {
    let status = match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::NotAllowed => StatusCode::FORBIDDEN,
        ErrorKind::AlreadyExists => StatusCode::CONFLICT,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if let ConceptError::Internal(inner) = &err {
        error!("internal error: {:#}", inner);
        return ApiError::internal();
    }

    let message = match &err {
        ConceptError::FriendRequestAlreadyExists { from, to } => {
            let (from, to) = resolve_pair(users, *from, *to);
            format!("friend request between {from} and {to} already exists")
        }
        ConceptError::FriendRequestNotFound { from, to } => {
            let (from, to) = resolve_pair(users, *from, *to);
            format!("no pending friend request from {from} to {to}")
        }
        ConceptError::AlreadyFriends { user1, user2 } => {
            let (user1, user2) = resolve_pair(users, *user1, *user2);
            format!("{user1} and {user2} are already friends")
        }
        ConceptError::FriendshipNotFound { user1, user2 } => {
            let (user1, user2) = resolve_pair(users, *user1, *user2);
            format!("{user1} and {user2} are not friends")
        }
        ConceptError::NotEntryAuthor { user, entry } => {
            format!("{} is not the author of entry {entry}", resolve(users, *user))
        }
        ConceptError::NotPostAuthor { user, post } => {
            format!("{} is not the author of post {post}", resolve(users, *user))
        }
        other => other.to_string(),
    };

    ApiError::new(status, message)
}

fn resolve(users: &UserConcept, id: Uuid) -> String {
    users
        .get_by_id(id)
        .map(|u| u.username)
        .unwrap_or_else(|_| id.to_string())
}

fn resolve_pair(users: &UserConcept, a: Uuid, b: Uuid) -> (String, String) {
    (resolve(users, a), resolve(users, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use quill_db::Database;

    #[test]
    fn friend_errors_resolve_usernames() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let users = UserConcept::new(db);
        let alice = users.create("alice", "password-a").unwrap();
        let bob = users.create("bob", "password-b").unwrap();

        let api_err = concept_error(
            &users,
            ConceptError::AlreadyFriends {
                user1: alice.id,
                user2: bob.id,
            },
        );
        assert_eq!(api_err.status, StatusCode::CONFLICT);
        assert_eq!(api_err.message, "alice and bob are already friends");
    }

    #[test]
    fn unknown_ids_fall_back_to_raw_id() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let users = UserConcept::new(db);
        let ghost = Uuid::new_v4();

        let api_err = concept_error(
            &users,
            ConceptError::FriendshipNotFound {
                user1: ghost,
                user2: ghost,
            },
        );
        assert_eq!(api_err.status, StatusCode::NOT_FOUND);
        assert!(api_err.message.contains(&ghost.to_string()));
    }

    #[test]
    fn internal_errors_are_redacted() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let users = UserConcept::new(db);

        let api_err = concept_error(
            &users,
            ConceptError::Internal(anyhow::anyhow!("sqlite exploded")),
        );
        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api_err.message.contains("sqlite"));
    }
}

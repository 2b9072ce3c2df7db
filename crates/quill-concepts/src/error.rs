use thiserror::Error;
use uuid::Uuid;

/// Broad classification used by the HTTP boundary to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NotAllowed,
    AlreadyExists,
    Unauthorized,
    Internal,
}

/// Typed failures raised by concept operations. Friend-lifecycle variants
/// carry raw user ids; the HTTP boundary resolves them to usernames before
/// building a display message.
#[derive(Debug, Error)]
pub enum ConceptError {
    // -- NotFound --
    #[error("user {user} does not exist")]
    UserNotFound { user: String },

    #[error("entry {entry} does not exist")]
    EntryNotFound { entry: Uuid },

    #[error("post {post} does not exist")]
    PostNotFound { post: Uuid },

    #[error("user {user} does not have a profile")]
    ProfileNotFound { user: Uuid },

    #[error("no pending friend request from {from} to {to}")]
    FriendRequestNotFound { from: Uuid, to: Uuid },

    #[error("{user1} and {user2} are not friends")]
    FriendshipNotFound { user1: Uuid, user2: Uuid },

    // -- NotAllowed --
    #[error("{user} is not the author of entry {entry}")]
    NotEntryAuthor { user: Uuid, entry: Uuid },

    #[error("{user} is not the author of post {post}")]
    NotPostAuthor { user: Uuid, post: Uuid },

    #[error("cannot send a friend request to yourself")]
    SelfFriendRequest { user: Uuid },

    #[error("cannot send a message to yourself")]
    SelfMessage { user: Uuid },

    #[error("cannot update '{field}' field")]
    FieldNotEditable { field: String },

    #[error("username and password must be non-empty")]
    EmptyCredentials,

    #[error("must be logged out to do that")]
    AlreadyLoggedIn,

    // -- AlreadyExists --
    #[error("username {username} is already taken")]
    UsernameTaken { username: String },

    #[error("friend request between {from} and {to} already exists")]
    FriendRequestAlreadyExists { from: Uuid, to: Uuid },

    #[error("{user1} and {user2} are already friends")]
    AlreadyFriends { user1: Uuid, user2: Uuid },

    #[error("user {user} already has a profile")]
    ProfileAlreadyExists { user: Uuid },

    // -- Auth --
    #[error("username or password is incorrect")]
    InvalidCredentials,

    // -- Infrastructure --
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ConceptError {
    pub fn kind(&self) -> ErrorKind {
        use ConceptError::*;
        match self {
            UserNotFound { .. }
            | EntryNotFound { .. }
            | PostNotFound { .. }
            | ProfileNotFound { .. }
            | FriendRequestNotFound { .. }
            | FriendshipNotFound { .. } => ErrorKind::NotFound,

            NotEntryAuthor { .. }
            | NotPostAuthor { .. }
            | SelfFriendRequest { .. }
            | SelfMessage { .. }
            | FieldNotEditable { .. }
            | EmptyCredentials
            | AlreadyLoggedIn => ErrorKind::NotAllowed,

            UsernameTaken { .. }
            | FriendRequestAlreadyExists { .. }
            | AlreadyFriends { .. }
            | ProfileAlreadyExists { .. } => ErrorKind::AlreadyExists,

            InvalidCredentials => ErrorKind::Unauthorized,

            Internal(_) => ErrorKind::Internal,
        }
    }
}

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use uuid::Uuid;

/// Opaque bearer tokens mapped to logged-in users. Sessions live only in
/// memory: a server restart logs everyone out.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Uuid>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start a session for the user and return its token.
    pub fn start(&self, user: Uuid) -> String {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);

        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.clone(), user);
        token
    }

    pub fn user(&self, token: &str) -> Option<Uuid> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .copied()
    }

    /// End a session; returns whether the token was live.
    pub fn end(&self, token: &str) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token)
            .is_some()
    }

    /// Drop every session belonging to the user. Used on account deletion.
    pub fn end_all_for(&self, user: Uuid) {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|_, u| *u != user);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_lookup_end() {
        let store = SessionStore::new();
        let user = Uuid::new_v4();

        let token = store.start(user);
        assert_eq!(store.user(&token), Some(user));

        assert!(store.end(&token));
        assert_eq!(store.user(&token), None);
        assert!(!store.end(&token));
    }

    #[test]
    fn tokens_are_unique_per_login() {
        let store = SessionStore::new();
        let user = Uuid::new_v4();
        let t1 = store.start(user);
        let t2 = store.start(user);
        assert_ne!(t1, t2);
        assert_eq!(store.user(&t1), Some(user));
        assert_eq!(store.user(&t2), Some(user));
    }

    #[test]
    fn end_all_for_drops_every_session() {
        let store = SessionStore::new();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let t1 = store.start(user);
        let t2 = store.start(user);
        let t3 = store.start(other);

        store.end_all_for(user);
        assert_eq!(store.user(&t1), None);
        assert_eq!(store.user(&t2), None);
        assert_eq!(store.user(&t3), Some(other));
    }

    #[test]
    fn unknown_token_is_rejected() {
        let store = SessionStore::new();
        assert_eq!(store.user("not-a-token"), None);
    }
}

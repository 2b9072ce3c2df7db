use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use uuid::Uuid;

use quill_db::Database;
use quill_db::models::UserRow;
use quill_types::api::UserUpdate;
use quill_types::models::User;

use crate::convert::{parse_id, parse_time};
use crate::error::ConceptError;

/// Account registry. Passwords are stored as Argon2id hashes; every read
/// returns the public model, which never carries the hash.
pub struct UserConcept {
    db: Arc<Database>,
}

impl UserConcept {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn create(&self, username: &str, password: &str) -> Result<User, ConceptError> {
        if username.is_empty() || password.is_empty() {
            return Err(ConceptError::EmptyCredentials);
        }
        if self.db.get_user_by_username(username)?.is_some() {
            return Err(ConceptError::UsernameTaken {
                username: username.to_string(),
            });
        }

        let id = Uuid::new_v4();
        let hash = hash_password(password)?;
        self.db.create_user(&id.to_string(), username, &hash)?;

        self.get_by_id(id)
    }

    /// Verify credentials. A missing user and a wrong password produce the
    /// same error so the response doesn't reveal which usernames exist.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User, ConceptError> {
        let row = self
            .db
            .get_user_by_username(username)?
            .ok_or(ConceptError::InvalidCredentials)?;

        let parsed_hash = PasswordHash::new(&row.password)
            .map_err(|e| anyhow!("stored password hash unreadable: {}", e))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| ConceptError::InvalidCredentials)?;

        user_from_row(row)
    }

    pub fn get_users(&self) -> Result<Vec<User>, ConceptError> {
        self.db.list_users()?.into_iter().map(user_from_row).collect()
    }

    pub fn get_by_username(&self, username: &str) -> Result<User, ConceptError> {
        let row = self
            .db
            .get_user_by_username(username)?
            .ok_or_else(|| ConceptError::UserNotFound {
                user: username.to_string(),
            })?;
        user_from_row(row)
    }

    pub fn get_by_id(&self, id: Uuid) -> Result<User, ConceptError> {
        let row = self
            .db
            .get_user_by_id(&id.to_string())?
            .ok_or_else(|| ConceptError::UserNotFound {
                user: id.to_string(),
            })?;
        user_from_row(row)
    }

    /// Batch id → username resolution. Deleted accounts render as
    /// "DELETED_USER" rather than failing the whole lookup.
    pub fn ids_to_usernames(&self, ids: &[Uuid]) -> Result<Vec<String>, ConceptError> {
        let keys: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        let rows = self.db.get_users_by_ids(&keys)?;
        let by_id: HashMap<String, String> =
            rows.into_iter().map(|r| (r.id, r.username)).collect();

        Ok(keys
            .iter()
            .map(|k| {
                by_id
                    .get(k)
                    .cloned()
                    .unwrap_or_else(|| "DELETED_USER".to_string())
            })
            .collect())
    }

    /// Whitelisted update: only `username` and `password` may change.
    pub fn update(&self, user: Uuid, update: UserUpdate) -> Result<User, ConceptError> {
        self.get_by_id(user)?;

        if let Some(username) = &update.username {
            if username.is_empty() {
                return Err(ConceptError::EmptyCredentials);
            }
            if let Some(existing) = self.db.get_user_by_username(username)? {
                if existing.id != user.to_string() {
                    return Err(ConceptError::UsernameTaken {
                        username: username.clone(),
                    });
                }
            }
            self.db.update_username(&user.to_string(), username)?;
        }

        if let Some(password) = &update.password {
            if password.is_empty() {
                return Err(ConceptError::EmptyCredentials);
            }
            let hash = hash_password(password)?;
            self.db.update_password(&user.to_string(), &hash)?;
        }

        self.get_by_id(user)
    }

    pub fn delete(&self, user: Uuid) -> Result<(), ConceptError> {
        if !self.db.delete_user(&user.to_string())? {
            return Err(ConceptError::UserNotFound {
                user: user.to_string(),
            });
        }
        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String, ConceptError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("password hash failed: {}", e))?;
    Ok(hash.to_string())
}

fn user_from_row(row: UserRow) -> Result<User, ConceptError> {
    Ok(User {
        id: parse_id(&row.id, "user")?,
        username: row.username,
        created_at: parse_time(&row.created_at)?,
        updated_at: parse_time(&row.updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concept() -> UserConcept {
        UserConcept::new(Arc::new(Database::open_in_memory().unwrap()))
    }

    #[test]
    fn create_and_authenticate() {
        let users = concept();
        let alice = users.create("alice", "hunter2secret").unwrap();
        assert_eq!(alice.username, "alice");

        let authed = users.authenticate("alice", "hunter2secret").unwrap();
        assert_eq!(authed.id, alice.id);

        let err = users.authenticate("alice", "wrong").unwrap_err();
        assert!(matches!(err, ConceptError::InvalidCredentials));
    }

    #[test]
    fn duplicate_username_rejected() {
        let users = concept();
        users.create("alice", "pw-one-long").unwrap();
        let err = users.create("alice", "pw-two-long").unwrap_err();
        assert!(matches!(err, ConceptError::UsernameTaken { .. }));
    }

    #[test]
    fn empty_credentials_rejected() {
        let users = concept();
        assert!(matches!(
            users.create("", "password").unwrap_err(),
            ConceptError::EmptyCredentials
        ));
        assert!(matches!(
            users.create("bob", "").unwrap_err(),
            ConceptError::EmptyCredentials
        ));
    }

    #[test]
    fn update_rejects_taken_username() {
        let users = concept();
        users.create("alice", "password-a").unwrap();
        let bob = users.create("bob", "password-b").unwrap();

        let err = users
            .update(
                bob.id,
                UserUpdate {
                    username: Some("alice".into()),
                    password: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, ConceptError::UsernameTaken { .. }));

        // Updating to your own current username is a no-op, not a conflict.
        let same = users
            .update(
                bob.id,
                UserUpdate {
                    username: Some("bob".into()),
                    password: None,
                },
            )
            .unwrap();
        assert_eq!(same.username, "bob");
    }

    #[test]
    fn deleted_users_render_as_placeholder() {
        let users = concept();
        let alice = users.create("alice", "password-a").unwrap();
        let bob = users.create("bob", "password-b").unwrap();

        users.delete(bob.id).unwrap();

        let names = users.ids_to_usernames(&[alice.id, bob.id]).unwrap();
        assert_eq!(names, vec!["alice".to_string(), "DELETED_USER".to_string()]);
    }
}

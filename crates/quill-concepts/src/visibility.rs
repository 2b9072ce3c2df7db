use std::sync::Arc;

use uuid::Uuid;

use quill_db::Database;

use crate::convert::parse_id;
use crate::error::ConceptError;

/// Per-user visibility grants over entries. Grant and revoke are both
/// idempotent: repeating either is reported, not treated as a failure.
pub struct VisibilityConcept {
    db: Arc<Database>,
}

impl VisibilityConcept {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Returns true if the grant is new, false if the content was already
    /// visible to the user.
    pub fn make_visible(&self, user: Uuid, content: Uuid) -> Result<bool, ConceptError> {
        if self
            .db
            .get_visibility(&user.to_string(), &content.to_string())?
            .is_some()
        {
            return Ok(false);
        }
        self.db.insert_visibility(
            &Uuid::new_v4().to_string(),
            &user.to_string(),
            &content.to_string(),
        )?;
        Ok(true)
    }

    /// Returns true if a grant was removed, false if none existed.
    pub fn make_invisible(&self, user: Uuid, content: Uuid) -> Result<bool, ConceptError> {
        Ok(self
            .db
            .delete_visibility(&user.to_string(), &content.to_string())?)
    }

    pub fn visible_content(&self, user: Uuid) -> Result<Vec<Uuid>, ConceptError> {
        self.db
            .list_visible_content(&user.to_string())?
            .iter()
            .map(|id| parse_id(id, "entry"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (VisibilityConcept, Uuid, Uuid) {
        let db = Arc::new(Database::open_in_memory().unwrap());
        (VisibilityConcept::new(db), Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn grant_is_idempotent() {
        let (visibility, user, content) = setup();

        assert!(visibility.make_visible(user, content).unwrap());
        // Second grant reports already-visible and does not duplicate.
        assert!(!visibility.make_visible(user, content).unwrap());
        assert_eq!(visibility.visible_content(user).unwrap(), vec![content]);
    }

    #[test]
    fn revoke_is_idempotent() {
        let (visibility, user, content) = setup();
        visibility.make_visible(user, content).unwrap();

        assert!(visibility.make_invisible(user, content).unwrap());
        assert!(!visibility.make_invisible(user, content).unwrap());
        assert!(visibility.visible_content(user).unwrap().is_empty());
    }

    #[test]
    fn grants_are_per_user() {
        let (visibility, user, content) = setup();
        let other = Uuid::new_v4();

        visibility.make_visible(user, content).unwrap();
        assert!(visibility.visible_content(other).unwrap().is_empty());
    }
}

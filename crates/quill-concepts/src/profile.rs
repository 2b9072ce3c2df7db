use std::sync::Arc;

use uuid::Uuid;

use quill_db::Database;
use quill_db::models::ProfileRow;
use quill_types::models::Profile;

use crate::convert::{parse_id, parse_time};
use crate::error::ConceptError;

/// Display profiles, at most one per user. Name, bio and image are edited
/// through three independent single-field operations.
pub struct ProfileConcept {
    db: Arc<Database>,
}

impl ProfileConcept {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn create(
        &self,
        owner: Uuid,
        name: &str,
        bio: &str,
        profile_img: &str,
    ) -> Result<Profile, ConceptError> {
        if self.db.get_profile_by_owner(&owner.to_string())?.is_some() {
            return Err(ConceptError::ProfileAlreadyExists { user: owner });
        }

        let id = Uuid::new_v4();
        self.db
            .insert_profile(&id.to_string(), &owner.to_string(), name, bio, profile_img)?;
        self.get(owner)
    }

    pub fn get(&self, owner: Uuid) -> Result<Profile, ConceptError> {
        let row = self
            .db
            .get_profile_by_owner(&owner.to_string())?
            .ok_or(ConceptError::ProfileNotFound { user: owner })?;
        profile_from_row(row)
    }

    pub fn get_all(&self) -> Result<Vec<Profile>, ConceptError> {
        self.db
            .list_profiles()?
            .into_iter()
            .map(profile_from_row)
            .collect()
    }

    pub fn edit_name(&self, owner: Uuid, name: &str) -> Result<Profile, ConceptError> {
        self.get(owner)?;
        self.db.update_profile_name(&owner.to_string(), name)?;
        self.get(owner)
    }

    pub fn edit_bio(&self, owner: Uuid, bio: &str) -> Result<Profile, ConceptError> {
        self.get(owner)?;
        self.db.update_profile_bio(&owner.to_string(), bio)?;
        self.get(owner)
    }

    pub fn edit_image(&self, owner: Uuid, profile_img: &str) -> Result<Profile, ConceptError> {
        self.get(owner)?;
        self.db.update_profile_img(&owner.to_string(), profile_img)?;
        self.get(owner)
    }
}

fn profile_from_row(row: ProfileRow) -> Result<Profile, ConceptError> {
    Ok(Profile {
        id: parse_id(&row.id, "profile")?,
        owner: parse_id(&row.owner_id, "user")?,
        name: row.name,
        bio: row.bio,
        profile_img: row.profile_img,
        created_at: parse_time(&row.created_at)?,
        updated_at: parse_time(&row.updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (ProfileConcept, Uuid) {
        let db = Arc::new(Database::open_in_memory().unwrap());
        (ProfileConcept::new(db), Uuid::new_v4())
    }

    #[test]
    fn second_profile_for_same_user_rejected() {
        let (profiles, owner) = setup();
        profiles.create(owner, "Alice", "", "default-image.jpg").unwrap();

        let err = profiles
            .create(owner, "Alice again", "", "default-image.jpg")
            .unwrap_err();
        assert!(matches!(err, ConceptError::ProfileAlreadyExists { .. }));
    }

    #[test]
    fn independent_field_edits() {
        let (profiles, owner) = setup();
        profiles.create(owner, "", "", "default-image.jpg").unwrap();

        profiles.edit_name(owner, "Alice").unwrap();
        profiles.edit_bio(owner, "journaling daily").unwrap();
        let updated = profiles.edit_image(owner, "alice.png").unwrap();

        assert_eq!(updated.name, "Alice");
        assert_eq!(updated.bio, "journaling daily");
        assert_eq!(updated.profile_img, "alice.png");
    }

    #[test]
    fn edit_without_profile_fails() {
        let (profiles, owner) = setup();
        let err = profiles.edit_name(owner, "ghost").unwrap_err();
        assert!(matches!(err, ConceptError::ProfileNotFound { .. }));
    }
}

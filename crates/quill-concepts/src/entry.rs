use std::sync::Arc;

use uuid::Uuid;

use quill_db::Database;
use quill_db::models::EntryRow;
use quill_types::api::EntryUpdate;
use quill_types::models::Entry;

use crate::convert::{parse_id, parse_time};
use crate::error::ConceptError;

/// Journal entries. The prompt text and author are fixed at creation;
/// edits may only touch the response.
pub struct EntryConcept {
    db: Arc<Database>,
}

impl EntryConcept {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn add(&self, author: Uuid, prompt: &str, response: &str) -> Result<Entry, ConceptError> {
        let id = Uuid::new_v4();
        self.db
            .insert_entry(&id.to_string(), &author.to_string(), prompt, response)?;
        self.get_by_id(id)
    }

    pub fn get_by_id(&self, id: Uuid) -> Result<Entry, ConceptError> {
        let row = self
            .db
            .get_entry(&id.to_string())?
            .ok_or(ConceptError::EntryNotFound { entry: id })?;
        entry_from_row(row)
    }

    pub fn get_all(&self) -> Result<Vec<Entry>, ConceptError> {
        self.db.list_entries()?.into_iter().map(entry_from_row).collect()
    }

    pub fn get_by_author(&self, author: Uuid) -> Result<Vec<Entry>, ConceptError> {
        self.db
            .list_entries_by_author(&author.to_string())?
            .into_iter()
            .map(entry_from_row)
            .collect()
    }

    /// Apply an update after checking the field whitelist: only `response`
    /// is editable.
    pub fn edit(&self, id: Uuid, update: EntryUpdate) -> Result<Entry, ConceptError> {
        if update.prompt.is_some() {
            return Err(ConceptError::FieldNotEditable {
                field: "prompt".to_string(),
            });
        }
        if update.author.is_some() {
            return Err(ConceptError::FieldNotEditable {
                field: "author".to_string(),
            });
        }

        self.get_by_id(id)?;
        if let Some(response) = &update.response {
            self.db.update_entry_response(&id.to_string(), response)?;
        }
        self.get_by_id(id)
    }

    pub fn remove(&self, id: Uuid) -> Result<(), ConceptError> {
        if !self.db.delete_entry(&id.to_string())? {
            return Err(ConceptError::EntryNotFound { entry: id });
        }
        Ok(())
    }

    /// Ownership guard used by the routes before edit/delete/share.
    pub fn is_author(&self, user: Uuid, id: Uuid) -> Result<(), ConceptError> {
        let entry = self.get_by_id(id)?;
        if entry.author != user {
            return Err(ConceptError::NotEntryAuthor { user, entry: id });
        }
        Ok(())
    }
}

fn entry_from_row(row: EntryRow) -> Result<Entry, ConceptError> {
    Ok(Entry {
        id: parse_id(&row.id, "entry")?,
        author: parse_id(&row.author_id, "user")?,
        prompt: row.prompt,
        response: row.response,
        created_at: parse_time(&row.created_at)?,
        updated_at: parse_time(&row.updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (EntryConcept, Uuid) {
        let db = Arc::new(Database::open_in_memory().unwrap());
        (EntryConcept::new(db), Uuid::new_v4())
    }

    #[test]
    fn add_and_read_back() {
        let (entries, author) = setup();
        let entry = entries
            .add(author, "What made you smile today?", "A long walk.")
            .unwrap();

        let fetched = entries.get_by_id(entry.id).unwrap();
        assert_eq!(fetched.prompt, "What made you smile today?");
        assert_eq!(fetched.response, "A long walk.");
        assert_eq!(fetched.author, author);
    }

    #[test]
    fn edit_response_is_applied() {
        let (entries, author) = setup();
        let entry = entries.add(author, "Prompt", "first draft").unwrap();

        let edited = entries
            .edit(
                entry.id,
                EntryUpdate {
                    response: Some("second draft".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited.response, "second draft");
        assert_eq!(edited.prompt, "Prompt");

        assert_eq!(entries.get_by_id(entry.id).unwrap().response, "second draft");
    }

    #[test]
    fn edit_prompt_or_author_is_rejected() {
        let (entries, author) = setup();
        let entry = entries.add(author, "Prompt", "Response").unwrap();

        let err = entries
            .edit(
                entry.id,
                EntryUpdate {
                    prompt: Some("new prompt".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ConceptError::FieldNotEditable { ref field } if field == "prompt"));

        let err = entries
            .edit(
                entry.id,
                EntryUpdate {
                    author: Some(Uuid::new_v4()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, ConceptError::FieldNotEditable { ref field } if field == "author"));

        // Entry untouched by the rejected updates.
        let fetched = entries.get_by_id(entry.id).unwrap();
        assert_eq!(fetched.prompt, "Prompt");
        assert_eq!(fetched.response, "Response");
    }

    #[test]
    fn author_guard() {
        let (entries, author) = setup();
        let entry = entries.add(author, "Prompt", "Response").unwrap();

        entries.is_author(author, entry.id).unwrap();
        let err = entries.is_author(Uuid::new_v4(), entry.id).unwrap_err();
        assert!(matches!(err, ConceptError::NotEntryAuthor { .. }));
    }

    #[test]
    fn remove_missing_entry_fails() {
        let (entries, _) = setup();
        let err = entries.remove(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ConceptError::EntryNotFound { .. }));
    }
}

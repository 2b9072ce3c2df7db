use std::sync::Arc;

use anyhow::Context;
use uuid::Uuid;

use quill_db::Database;
use quill_db::models::PostRow;
use quill_types::api::PostUpdate;
use quill_types::models::{Post, PostOptions};

use crate::convert::{parse_id, parse_time};
use crate::error::ConceptError;

/// Free-form posts with optional display options, stored as JSON text.
pub struct PostConcept {
    db: Arc<Database>,
}

impl PostConcept {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn create(
        &self,
        author: Uuid,
        content: &str,
        options: Option<PostOptions>,
    ) -> Result<Post, ConceptError> {
        let id = Uuid::new_v4();
        let options_json = encode_options(options.as_ref())?;
        self.db.insert_post(
            &id.to_string(),
            &author.to_string(),
            content,
            options_json.as_deref(),
        )?;
        self.get_by_id(id)
    }

    pub fn get_by_id(&self, id: Uuid) -> Result<Post, ConceptError> {
        let row = self
            .db
            .get_post(&id.to_string())?
            .ok_or(ConceptError::PostNotFound { post: id })?;
        post_from_row(row)
    }

    pub fn get_posts(&self) -> Result<Vec<Post>, ConceptError> {
        self.db.list_posts()?.into_iter().map(post_from_row).collect()
    }

    pub fn get_by_author(&self, author: Uuid) -> Result<Vec<Post>, ConceptError> {
        self.db
            .list_posts_by_author(&author.to_string())?
            .into_iter()
            .map(post_from_row)
            .collect()
    }

    /// Whitelisted update: `content` and `options` only.
    pub fn update(&self, id: Uuid, update: PostUpdate) -> Result<Post, ConceptError> {
        self.get_by_id(id)?;

        if let Some(content) = &update.content {
            self.db.update_post_content(&id.to_string(), content)?;
        }
        if let Some(options) = &update.options {
            let json = encode_options(Some(options))?;
            self.db.update_post_options(&id.to_string(), json.as_deref())?;
        }
        self.get_by_id(id)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), ConceptError> {
        if !self.db.delete_post(&id.to_string())? {
            return Err(ConceptError::PostNotFound { post: id });
        }
        Ok(())
    }

    pub fn is_author(&self, user: Uuid, id: Uuid) -> Result<(), ConceptError> {
        let post = self.get_by_id(id)?;
        if post.author != user {
            return Err(ConceptError::NotPostAuthor { user, post: id });
        }
        Ok(())
    }
}

fn encode_options(options: Option<&PostOptions>) -> Result<Option<String>, ConceptError> {
    options
        .map(|o| serde_json::to_string(o).context("encode post options"))
        .transpose()
        .map_err(ConceptError::Internal)
}

fn post_from_row(row: PostRow) -> Result<Post, ConceptError> {
    let options = row
        .options
        .as_deref()
        .map(|raw| serde_json::from_str(raw).context("decode post options"))
        .transpose()
        .map_err(ConceptError::Internal)?;

    Ok(Post {
        id: parse_id(&row.id, "post")?,
        author: parse_id(&row.author_id, "user")?,
        content: row.content,
        options,
        created_at: parse_time(&row.created_at)?,
        updated_at: parse_time(&row.updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (PostConcept, Uuid) {
        let db = Arc::new(Database::open_in_memory().unwrap());
        (PostConcept::new(db), Uuid::new_v4())
    }

    #[test]
    fn options_round_trip() {
        let (posts, author) = setup();
        let options = PostOptions {
            background_color: Some("#aabbcc".into()),
        };
        let post = posts.create(author, "hello", Some(options)).unwrap();

        let fetched = posts.get_by_id(post.id).unwrap();
        assert_eq!(
            fetched.options.unwrap().background_color.as_deref(),
            Some("#aabbcc")
        );
    }

    #[test]
    fn update_whitelisted_fields() {
        let (posts, author) = setup();
        let post = posts.create(author, "hello", None).unwrap();

        let updated = posts
            .update(
                post.id,
                PostUpdate {
                    content: Some("edited".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.content, "edited");
        assert_eq!(updated.author, author);
    }

    #[test]
    fn author_guard() {
        let (posts, author) = setup();
        let post = posts.create(author, "hello", None).unwrap();

        posts.is_author(author, post.id).unwrap();
        assert!(matches!(
            posts.is_author(Uuid::new_v4(), post.id).unwrap_err(),
            ConceptError::NotPostAuthor { .. }
        ));
    }
}

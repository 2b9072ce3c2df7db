use std::sync::Arc;

use quill_concepts::{
    EntryConcept, FriendConcept, MessageConcept, PostConcept, ProfileConcept, PromptConcept,
    UserConcept, VisibilityConcept,
};
use quill_db::Database;

use crate::sessions::SessionStore;

pub type AppState = Arc<AppStateInner>;

/// One concept instance per bounded resource, each constructed against the
/// shared database handle.
pub struct AppStateInner {
    pub users: UserConcept,
    pub friends: FriendConcept,
    pub posts: PostConcept,
    pub entries: EntryConcept,
    pub prompts: PromptConcept,
    pub messages: MessageConcept,
    pub profiles: ProfileConcept,
    pub visibility: VisibilityConcept,
    pub sessions: SessionStore,
}

impl AppStateInner {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            users: UserConcept::new(db.clone()),
            friends: FriendConcept::new(db.clone()),
            posts: PostConcept::new(db.clone()),
            entries: EntryConcept::new(db.clone()),
            prompts: PromptConcept::new(),
            messages: MessageConcept::new(db.clone()),
            profiles: ProfileConcept::new(db.clone()),
            visibility: VisibilityConcept::new(db),
            sessions: SessionStore::new(),
        }
    }
}

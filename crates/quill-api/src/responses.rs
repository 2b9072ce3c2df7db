//! Client-facing response assembly: raw models go out with user ids
//! resolved to display names. Lookups are batched for list endpoints.

use quill_concepts::{ConceptError, EntryConcept, UserConcept};
use quill_types::api::{
    EntryResponse, FriendRequestResponse, MessageResponse, PostResponse, ProfileResponse,
};
use quill_types::models::{Entry, FriendRequest, Message, Post, Profile};

pub fn entry(users: &UserConcept, entry: Entry) -> Result<EntryResponse, ConceptError> {
    Ok(entries(users, vec![entry])?.remove(0))
}

pub fn entries(users: &UserConcept, entries: Vec<Entry>) -> Result<Vec<EntryResponse>, ConceptError> {
    let authors: Vec<_> = entries.iter().map(|e| e.author).collect();
    let usernames = users.ids_to_usernames(&authors)?;

    Ok(entries
        .into_iter()
        .zip(usernames)
        .map(|(e, author)| EntryResponse {
            id: e.id,
            author,
            prompt: e.prompt,
            response: e.response,
            created_at: e.created_at,
            updated_at: e.updated_at,
        })
        .collect())
}

pub fn post(users: &UserConcept, post: Post) -> Result<PostResponse, ConceptError> {
    Ok(posts(users, vec![post])?.remove(0))
}

pub fn posts(users: &UserConcept, posts: Vec<Post>) -> Result<Vec<PostResponse>, ConceptError> {
    let authors: Vec<_> = posts.iter().map(|p| p.author).collect();
    let usernames = users.ids_to_usernames(&authors)?;

    Ok(posts
        .into_iter()
        .zip(usernames)
        .map(|(p, author)| PostResponse {
            id: p.id,
            author,
            content: p.content,
            options: p.options,
            created_at: p.created_at,
            updated_at: p.updated_at,
        })
        .collect())
}

pub fn profile(users: &UserConcept, profile: Profile) -> Result<ProfileResponse, ConceptError> {
    Ok(profiles(users, vec![profile])?.remove(0))
}

pub fn profiles(
    users: &UserConcept,
    profiles: Vec<Profile>,
) -> Result<Vec<ProfileResponse>, ConceptError> {
    let owners: Vec<_> = profiles.iter().map(|p| p.owner).collect();
    let usernames = users.ids_to_usernames(&owners)?;

    Ok(profiles
        .into_iter()
        .zip(usernames)
        .map(|(p, owner)| ProfileResponse {
            id: p.id,
            owner,
            name: p.name,
            bio: p.bio,
            profile_img: p.profile_img,
            created_at: p.created_at,
            updated_at: p.updated_at,
        })
        .collect())
}

/// Messages embed their referenced entry, itself formatted.
pub fn message(
    users: &UserConcept,
    entry_concept: &EntryConcept,
    message: Message,
) -> Result<MessageResponse, ConceptError> {
    Ok(messages(users, entry_concept, vec![message])?.remove(0))
}

pub fn messages(
    users: &UserConcept,
    entry_concept: &EntryConcept,
    messages: Vec<Message>,
) -> Result<Vec<MessageResponse>, ConceptError> {
    // One batched lookup covering both endpoints of every message.
    let mut ids: Vec<_> = messages.iter().map(|m| m.sender).collect();
    ids.extend(messages.iter().map(|m| m.recipient));
    let usernames = users.ids_to_usernames(&ids)?;
    let (senders, recipients) = usernames.split_at(messages.len());

    messages
        .into_iter()
        .enumerate()
        .map(|(i, m)| {
            let content = entry(users, entry_concept.get_by_id(m.content)?)?;
            Ok(MessageResponse {
                id: m.id,
                sender: senders[i].clone(),
                recipient: recipients[i].clone(),
                content,
                created_at: m.created_at,
                updated_at: m.updated_at,
            })
        })
        .collect()
}

/// Friend requests resolve both endpoints through a single batched lookup,
/// senders first, recipients second.
pub fn friend_requests(
    users: &UserConcept,
    requests: Vec<FriendRequest>,
) -> Result<Vec<FriendRequestResponse>, ConceptError> {
    let mut ids: Vec<_> = requests.iter().map(|r| r.from).collect();
    ids.extend(requests.iter().map(|r| r.to));
    let usernames = users.ids_to_usernames(&ids)?;
    let (from_names, to_names) = usernames.split_at(requests.len());

    Ok(requests
        .into_iter()
        .enumerate()
        .map(|(i, r)| FriendRequestResponse {
            id: r.id,
            from: from_names[i].clone(),
            to: to_names[i].clone(),
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use quill_db::Database;

    #[test]
    fn entries_resolve_author_usernames() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let users = UserConcept::new(db.clone());
        let entry_concept = EntryConcept::new(db);

        let alice = users.create("alice", "password-a").unwrap();
        let e1 = entry_concept.add(alice.id, "Prompt one", "r1").unwrap();
        let e2 = entry_concept.add(alice.id, "Prompt two", "r2").unwrap();

        let formatted = entries(&users, vec![e1, e2]).unwrap();
        assert!(formatted.iter().all(|e| e.author == "alice"));
    }

    #[test]
    fn messages_embed_formatted_entry() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let users = UserConcept::new(db.clone());
        let entry_concept = EntryConcept::new(db.clone());
        let message_concept = quill_concepts::MessageConcept::new(db);

        let alice = users.create("alice", "password-a").unwrap();
        let bob = users.create("bob", "password-b").unwrap();
        let e = entry_concept.add(alice.id, "Prompt", "shared words").unwrap();
        let m = message_concept.send(alice.id, bob.id, e.id).unwrap();

        let formatted = message(&users, &entry_concept, m).unwrap();
        assert_eq!(formatted.sender, "alice");
        assert_eq!(formatted.recipient, "bob");
        assert_eq!(formatted.content.response, "shared words");
        assert_eq!(formatted.content.author, "alice");
    }
}

use std::sync::Arc;

use uuid::Uuid;

use quill_db::Database;
use quill_db::models::FriendRequestRow;
use quill_types::models::{FriendRequest, RequestStatus};

use crate::convert::{parse_id, parse_time};
use crate::error::ConceptError;

/// Friend-request and friendship lifecycle.
///
/// Per ordered pair (from, to) the request moves
/// NoRequest → Pending → {Accepted | Rejected}. Accepting records a
/// symmetric friendship and removes the request; rejecting removes the
/// request outright. Neither outcome is retained as a request row.
pub struct FriendConcept {
    db: Arc<Database>,
}

impl FriendConcept {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn send_request(&self, from: Uuid, to: Uuid) -> Result<FriendRequest, ConceptError> {
        if from == to {
            return Err(ConceptError::SelfFriendRequest { user: from });
        }
        if self.db.get_friendship(&from.to_string(), &to.to_string())?.is_some() {
            return Err(ConceptError::AlreadyFriends { user1: from, user2: to });
        }
        if self
            .db
            .pending_request_between(&from.to_string(), &to.to_string())?
            .is_some()
        {
            return Err(ConceptError::FriendRequestAlreadyExists { from, to });
        }

        let id = Uuid::new_v4();
        self.db
            .insert_friend_request(&id.to_string(), &from.to_string(), &to.to_string())?;

        let row = self
            .db
            .get_pending_request(&from.to_string(), &to.to_string())?
            .ok_or_else(|| {
                ConceptError::Internal(anyhow::anyhow!("friend request vanished after insert"))
            })?;
        request_from_row(row)
    }

    /// Accept the pending request from → to: the request row is removed and
    /// a friendship inserted. The delete/insert pair is not atomic across a
    /// crash; each statement on its own is.
    pub fn accept_request(&self, from: Uuid, to: Uuid) -> Result<(), ConceptError> {
        self.remove_pending(from, to)?;
        self.db.insert_friendship(
            &Uuid::new_v4().to_string(),
            &from.to_string(),
            &to.to_string(),
        )?;
        Ok(())
    }

    pub fn reject_request(&self, from: Uuid, to: Uuid) -> Result<(), ConceptError> {
        self.remove_pending(from, to)
    }

    /// Unilateral cancel by the sender.
    pub fn remove_request(&self, from: Uuid, to: Uuid) -> Result<(), ConceptError> {
        self.remove_pending(from, to)
    }

    pub fn remove_friend(&self, user1: Uuid, user2: Uuid) -> Result<(), ConceptError> {
        let friendship = self
            .db
            .get_friendship(&user1.to_string(), &user2.to_string())?
            .ok_or(ConceptError::FriendshipNotFound { user1, user2 })?;
        self.db.delete_friendship(&friendship.id)?;
        Ok(())
    }

    pub fn get_friends(&self, user: Uuid) -> Result<Vec<Uuid>, ConceptError> {
        self.db
            .list_friend_ids(&user.to_string())?
            .iter()
            .map(|id| parse_id(id, "user"))
            .collect()
    }

    /// All pending requests where the user is sender or recipient.
    pub fn get_requests(&self, user: Uuid) -> Result<Vec<FriendRequest>, ConceptError> {
        self.db
            .list_pending_requests_for(&user.to_string())?
            .into_iter()
            .map(request_from_row)
            .collect()
    }

    fn remove_pending(&self, from: Uuid, to: Uuid) -> Result<(), ConceptError> {
        if !self
            .db
            .delete_pending_request(&from.to_string(), &to.to_string())?
        {
            return Err(ConceptError::FriendRequestNotFound { from, to });
        }
        Ok(())
    }
}

fn request_from_row(row: FriendRequestRow) -> Result<FriendRequest, ConceptError> {
    let status = RequestStatus::parse(&row.status).ok_or_else(|| {
        ConceptError::Internal(anyhow::anyhow!("corrupt request status: {}", row.status))
    })?;
    Ok(FriendRequest {
        id: parse_id(&row.id, "friend request")?,
        from: parse_id(&row.from_id, "user")?,
        to: parse_id(&row.to_id, "user")?,
        status,
        created_at: parse_time(&row.created_at)?,
        updated_at: parse_time(&row.updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserConcept;

    fn setup() -> (UserConcept, FriendConcept, Uuid, Uuid) {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let users = UserConcept::new(db.clone());
        let friends = FriendConcept::new(db);
        let a = users.create("alice", "password-a").unwrap().id;
        let b = users.create("bob", "password-b").unwrap().id;
        (users, friends, a, b)
    }

    #[test]
    fn send_request_creates_single_pending() {
        let (_, friends, a, b) = setup();

        let req = friends.send_request(a, b).unwrap();
        assert_eq!(req.from, a);
        assert_eq!(req.to, b);
        assert_eq!(req.status, RequestStatus::Pending);

        let for_a = friends.get_requests(a).unwrap();
        let for_b = friends.get_requests(b).unwrap();
        assert_eq!(for_a.len(), 1);
        assert_eq!(for_b.len(), 1);
        assert_eq!(for_a[0].id, for_b[0].id);
    }

    #[test]
    fn duplicate_request_rejected_in_both_directions() {
        let (_, friends, a, b) = setup();
        friends.send_request(a, b).unwrap();

        assert!(matches!(
            friends.send_request(a, b).unwrap_err(),
            ConceptError::FriendRequestAlreadyExists { .. }
        ));
        assert!(matches!(
            friends.send_request(b, a).unwrap_err(),
            ConceptError::FriendRequestAlreadyExists { .. }
        ));
    }

    #[test]
    fn self_request_rejected() {
        let (_, friends, a, _) = setup();
        assert!(matches!(
            friends.send_request(a, a).unwrap_err(),
            ConceptError::SelfFriendRequest { .. }
        ));
    }

    #[test]
    fn request_to_existing_friend_rejected() {
        let (_, friends, a, b) = setup();
        friends.send_request(a, b).unwrap();
        friends.accept_request(a, b).unwrap();

        assert!(matches!(
            friends.send_request(a, b).unwrap_err(),
            ConceptError::AlreadyFriends { .. }
        ));
        assert!(matches!(
            friends.send_request(b, a).unwrap_err(),
            ConceptError::AlreadyFriends { .. }
        ));
    }

    #[test]
    fn accept_removes_request_and_creates_symmetric_friendship() {
        let (_, friends, a, b) = setup();
        friends.send_request(a, b).unwrap();
        friends.accept_request(a, b).unwrap();

        assert!(friends.get_requests(a).unwrap().is_empty());
        assert!(friends.get_requests(b).unwrap().is_empty());
        assert_eq!(friends.get_friends(a).unwrap(), vec![b]);
        assert_eq!(friends.get_friends(b).unwrap(), vec![a]);
    }

    #[test]
    fn accept_without_pending_request_fails() {
        let (_, friends, a, b) = setup();
        assert!(matches!(
            friends.accept_request(a, b).unwrap_err(),
            ConceptError::FriendRequestNotFound { .. }
        ));

        // Direction matters: a pending a→b request cannot be accepted as b→a.
        friends.send_request(a, b).unwrap();
        assert!(matches!(
            friends.accept_request(b, a).unwrap_err(),
            ConceptError::FriendRequestNotFound { .. }
        ));
    }

    #[test]
    fn reject_removes_request_without_friendship() {
        let (_, friends, a, b) = setup();
        friends.send_request(a, b).unwrap();
        friends.reject_request(a, b).unwrap();

        assert!(friends.get_requests(a).unwrap().is_empty());
        assert!(friends.get_friends(a).unwrap().is_empty());
        assert!(friends.get_friends(b).unwrap().is_empty());

        // Rejection is not permanent: a fresh request may follow.
        friends.send_request(a, b).unwrap();
    }

    #[test]
    fn sender_can_cancel_pending_request() {
        let (_, friends, a, b) = setup();
        friends.send_request(a, b).unwrap();
        friends.remove_request(a, b).unwrap();
        assert!(friends.get_requests(b).unwrap().is_empty());
    }

    #[test]
    fn remove_friend_is_order_independent() {
        let (_, friends, a, b) = setup();
        friends.send_request(a, b).unwrap();
        friends.accept_request(a, b).unwrap();

        // Opposite order from how the friendship was recorded.
        friends.remove_friend(b, a).unwrap();
        assert!(friends.get_friends(a).unwrap().is_empty());
        assert!(friends.get_friends(b).unwrap().is_empty());
    }

    #[test]
    fn remove_nonexistent_friendship_fails() {
        let (_, friends, a, b) = setup();
        let err = friends.remove_friend(a, b).unwrap_err();
        assert!(matches!(err, ConceptError::FriendshipNotFound { .. }));
    }

    #[test]
    fn end_to_end_request_accept_flow() {
        let (users, friends, a, b) = setup();

        // B sends a friend request to A, A accepts.
        friends.send_request(b, a).unwrap();
        friends.accept_request(b, a).unwrap();

        assert_eq!(friends.get_friends(a).unwrap(), vec![b]);
        assert_eq!(friends.get_friends(b).unwrap(), vec![a]);
        assert!(friends.get_requests(a).unwrap().is_empty());

        let names = users.ids_to_usernames(&friends.get_friends(a).unwrap()).unwrap();
        assert_eq!(names, vec!["bob".to_string()]);
    }
}

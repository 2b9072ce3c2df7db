use std::sync::Arc;

use uuid::Uuid;

use quill_db::Database;
use quill_db::models::MessageRow;
use quill_types::models::Message;

use crate::convert::{parse_id, parse_time};
use crate::error::ConceptError;

/// Direct messages. A message's content is a reference to an Entry, not
/// free text; whether the sender owns that entry is checked at the route
/// layer, which also has the entry concept in hand.
pub struct MessageConcept {
    db: Arc<Database>,
}

impl MessageConcept {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn send(&self, sender: Uuid, recipient: Uuid, content: Uuid) -> Result<Message, ConceptError> {
        if sender == recipient {
            return Err(ConceptError::SelfMessage { user: sender });
        }

        let id = Uuid::new_v4();
        self.db.insert_message(
            &id.to_string(),
            &sender.to_string(),
            &recipient.to_string(),
            &content.to_string(),
        )?;

        let row = self
            .db
            .get_message(&id.to_string())?
            .ok_or_else(|| ConceptError::Internal(anyhow::anyhow!("message vanished after insert")))?;
        message_from_row(row)
    }

    /// Messages sent by the user, most recently updated first.
    pub fn get_sent(&self, sender: Uuid) -> Result<Vec<Message>, ConceptError> {
        self.db
            .list_sent_messages(&sender.to_string())?
            .into_iter()
            .map(message_from_row)
            .collect()
    }

    /// Messages received by the user, most recently updated first.
    pub fn get_received(&self, recipient: Uuid) -> Result<Vec<Message>, ConceptError> {
        self.db
            .list_received_messages(&recipient.to_string())?
            .into_iter()
            .map(message_from_row)
            .collect()
    }
}

fn message_from_row(row: MessageRow) -> Result<Message, ConceptError> {
    Ok(Message {
        id: parse_id(&row.id, "message")?,
        sender: parse_id(&row.sender_id, "user")?,
        recipient: parse_id(&row.recipient_id, "user")?,
        content: parse_id(&row.content_id, "entry")?,
        created_at: parse_time(&row.created_at)?,
        updated_at: parse_time(&row.updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (MessageConcept, Uuid, Uuid) {
        let db = Arc::new(Database::open_in_memory().unwrap());
        (MessageConcept::new(db), Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn send_and_read_both_sides() {
        let (messages, alice, bob) = setup();
        let entry = Uuid::new_v4();

        let sent = messages.send(alice, bob, entry).unwrap();
        assert_eq!(sent.content, entry);

        let from_alice = messages.get_sent(alice).unwrap();
        assert_eq!(from_alice.len(), 1);
        assert_eq!(from_alice[0].recipient, bob);

        let to_bob = messages.get_received(bob).unwrap();
        assert_eq!(to_bob.len(), 1);
        assert_eq!(to_bob[0].sender, alice);

        assert!(messages.get_received(alice).unwrap().is_empty());
    }

    #[test]
    fn self_message_rejected() {
        let (messages, alice, _) = setup();
        let err = messages.send(alice, alice, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ConceptError::SelfMessage { .. }));
    }
}

use crate::Database;
use crate::models::MessageRow;
use anyhow::Result;
use rusqlite::Connection;

use super::OptionalExt;

const MESSAGE_COLS: &str = "id, sender_id, recipient_id, content_id, created_at, updated_at";

impl Database {
    pub fn insert_message(&self, id: &str, sender_id: &str, recipient_id: &str, content_id: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (id, sender_id, recipient_id, content_id) VALUES (?1, ?2, ?3, ?4)",
                (id, sender_id, recipient_id, content_id),
            )?;
            Ok(())
        })
    }

    pub fn get_message(&self, id: &str) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {MESSAGE_COLS} FROM messages WHERE id = ?1");
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_row([id], message_from_row).optional()
        })
    }

    pub fn list_sent_messages(&self, sender_id: &str) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {MESSAGE_COLS} FROM messages WHERE sender_id = ?1 ORDER BY updated_at DESC"
            );
            query_messages(conn, &sql, sender_id)
        })
    }

    pub fn list_received_messages(&self, recipient_id: &str) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {MESSAGE_COLS} FROM messages WHERE recipient_id = ?1 ORDER BY updated_at DESC"
            );
            query_messages(conn, &sql, recipient_id)
        })
    }
}

fn query_messages(conn: &Connection, sql: &str, user_id: &str) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([user_id], message_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn message_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<MessageRow, rusqlite::Error> {
    Ok(MessageRow {
        id: row.get(0)?,
        sender_id: row.get(1)?,
        recipient_id: row.get(2)?,
        content_id: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

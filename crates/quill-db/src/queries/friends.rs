use crate::Database;
use crate::models::{FriendRequestRow, FriendshipRow};
use anyhow::Result;

use super::OptionalExt;

const REQUEST_COLS: &str = "id, from_id, to_id, status, created_at, updated_at";
const FRIENDSHIP_COLS: &str = "id, user1_id, user2_id, created_at, updated_at";

impl Database {
    // -- Friend requests --

    pub fn insert_friend_request(&self, id: &str, from_id: &str, to_id: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO friend_requests (id, from_id, to_id, status) VALUES (?1, ?2, ?3, 'pending')",
                (id, from_id, to_id),
            )?;
            Ok(())
        })
    }

    /// Pending request for the ordered pair (from, to).
    pub fn get_pending_request(&self, from_id: &str, to_id: &str) -> Result<Option<FriendRequestRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {REQUEST_COLS} FROM friend_requests
                 WHERE from_id = ?1 AND to_id = ?2 AND status = 'pending'"
            );
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_row((from_id, to_id), request_from_row).optional()
        })
    }

    /// Pending request between two users, in either direction.
    pub fn pending_request_between(&self, a: &str, b: &str) -> Result<Option<FriendRequestRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {REQUEST_COLS} FROM friend_requests
                 WHERE status = 'pending'
                   AND ((from_id = ?1 AND to_id = ?2) OR (from_id = ?2 AND to_id = ?1))"
            );
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_row((a, b), request_from_row).optional()
        })
    }

    /// Delete the pending request for the ordered pair; returns whether one existed.
    pub fn delete_pending_request(&self, from_id: &str, to_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM friend_requests
                 WHERE from_id = ?1 AND to_id = ?2 AND status = 'pending'",
                (from_id, to_id),
            )?;
            Ok(deleted > 0)
        })
    }

    /// All pending requests where the user is sender or recipient.
    pub fn list_pending_requests_for(&self, user_id: &str) -> Result<Vec<FriendRequestRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {REQUEST_COLS} FROM friend_requests
                 WHERE status = 'pending' AND (from_id = ?1 OR to_id = ?1)
                 ORDER BY created_at DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([user_id], request_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Friendships --

    pub fn insert_friendship(&self, id: &str, user1_id: &str, user2_id: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO friendships (id, user1_id, user2_id) VALUES (?1, ?2, ?3)",
                (id, user1_id, user2_id),
            )?;
            Ok(())
        })
    }

    /// Friendship between two users, order-independent.
    pub fn get_friendship(&self, a: &str, b: &str) -> Result<Option<FriendshipRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {FRIENDSHIP_COLS} FROM friendships
                 WHERE (user1_id = ?1 AND user2_id = ?2) OR (user1_id = ?2 AND user2_id = ?1)"
            );
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_row((a, b), friendship_from_row).optional()
        })
    }

    pub fn delete_friendship(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM friendships WHERE id = ?1", [id])?;
            Ok(deleted > 0)
        })
    }

    /// Ids of everyone paired with the user in a friendship.
    pub fn list_friend_ids(&self, user_id: &str) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT CASE WHEN user1_id = ?1 THEN user2_id ELSE user1_id END
                 FROM friendships
                 WHERE user1_id = ?1 OR user2_id = ?1",
            )?;
            let rows = stmt
                .query_map([user_id], |row| row.get(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn request_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<FriendRequestRow, rusqlite::Error> {
    Ok(FriendRequestRow {
        id: row.get(0)?,
        from_id: row.get(1)?,
        to_id: row.get(2)?,
        status: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn friendship_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<FriendshipRow, rusqlite::Error> {
    Ok(FriendshipRow {
        id: row.get(0)?,
        user1_id: row.get(1)?,
        user2_id: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

use crate::Database;
use crate::models::VisibilityRow;
use anyhow::Result;

use super::OptionalExt;

const VISIBILITY_COLS: &str = "id, user_id, content_id, created_at, updated_at";

impl Database {
    pub fn insert_visibility(&self, id: &str, user_id: &str, content_id: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO visibility (id, user_id, content_id) VALUES (?1, ?2, ?3)",
                (id, user_id, content_id),
            )?;
            Ok(())
        })
    }

    pub fn get_visibility(&self, user_id: &str, content_id: &str) -> Result<Option<VisibilityRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {VISIBILITY_COLS} FROM visibility WHERE user_id = ?1 AND content_id = ?2"
            );
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_row((user_id, content_id), visibility_from_row).optional()
        })
    }

    pub fn delete_visibility(&self, user_id: &str, content_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM visibility WHERE user_id = ?1 AND content_id = ?2",
                (user_id, content_id),
            )?;
            Ok(deleted > 0)
        })
    }

    /// Content ids visible to the user, oldest grant first.
    pub fn list_visible_content(&self, user_id: &str) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT content_id FROM visibility WHERE user_id = ?1 ORDER BY created_at",
            )?;
            let rows = stmt
                .query_map([user_id], |row| row.get(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn visibility_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<VisibilityRow, rusqlite::Error> {
    Ok(VisibilityRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        content_id: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

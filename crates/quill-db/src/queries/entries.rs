use crate::Database;
use crate::models::EntryRow;
use anyhow::Result;
use rusqlite::Connection;

use super::OptionalExt;

const ENTRY_COLS: &str = "id, author_id, prompt, response, created_at, updated_at";

impl Database {
    pub fn insert_entry(&self, id: &str, author_id: &str, prompt: &str, response: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO entries (id, author_id, prompt, response) VALUES (?1, ?2, ?3, ?4)",
                (id, author_id, prompt, response),
            )?;
            Ok(())
        })
    }

    pub fn get_entry(&self, id: &str) -> Result<Option<EntryRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {ENTRY_COLS} FROM entries WHERE id = ?1");
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_row([id], entry_from_row).optional()
        })
    }

    pub fn list_entries(&self) -> Result<Vec<EntryRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {ENTRY_COLS} FROM entries ORDER BY updated_at DESC");
            query_entries(conn, &sql, [])
        })
    }

    pub fn list_entries_by_author(&self, author_id: &str) -> Result<Vec<EntryRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {ENTRY_COLS} FROM entries WHERE author_id = ?1 ORDER BY updated_at DESC"
            );
            query_entries(conn, &sql, [author_id])
        })
    }

    pub fn update_entry_response(&self, id: &str, response: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE entries SET response = ?2, updated_at = datetime('now') WHERE id = ?1",
                (id, response),
            )?;
            Ok(())
        })
    }

    pub fn delete_entry(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM entries WHERE id = ?1", [id])?;
            Ok(deleted > 0)
        })
    }
}

fn query_entries<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<EntryRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, entry_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn entry_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<EntryRow, rusqlite::Error> {
    Ok(EntryRow {
        id: row.get(0)?,
        author_id: row.get(1)?,
        prompt: row.get(2)?,
        response: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

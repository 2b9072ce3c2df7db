use crate::Database;
use crate::models::PostRow;
use anyhow::Result;
use rusqlite::Connection;

use super::OptionalExt;

const POST_COLS: &str = "id, author_id, content, options, created_at, updated_at";

impl Database {
    pub fn insert_post(&self, id: &str, author_id: &str, content: &str, options: Option<&str>) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO posts (id, author_id, content, options) VALUES (?1, ?2, ?3, ?4)",
                (id, author_id, content, options),
            )?;
            Ok(())
        })
    }

    pub fn get_post(&self, id: &str) -> Result<Option<PostRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {POST_COLS} FROM posts WHERE id = ?1");
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_row([id], post_from_row).optional()
        })
    }

    pub fn list_posts(&self) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {POST_COLS} FROM posts ORDER BY updated_at DESC");
            query_posts(conn, &sql, [])
        })
    }

    pub fn list_posts_by_author(&self, author_id: &str) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {POST_COLS} FROM posts WHERE author_id = ?1 ORDER BY updated_at DESC"
            );
            query_posts(conn, &sql, [author_id])
        })
    }

    pub fn update_post_content(&self, id: &str, content: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE posts SET content = ?2, updated_at = datetime('now') WHERE id = ?1",
                (id, content),
            )?;
            Ok(())
        })
    }

    pub fn update_post_options(&self, id: &str, options: Option<&str>) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE posts SET options = ?2, updated_at = datetime('now') WHERE id = ?1",
                (id, options),
            )?;
            Ok(())
        })
    }

    pub fn delete_post(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM posts WHERE id = ?1", [id])?;
            Ok(deleted > 0)
        })
    }
}

fn query_posts<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<PostRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, post_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn post_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<PostRow, rusqlite::Error> {
    Ok(PostRow {
        id: row.get(0)?,
        author_id: row.get(1)?,
        content: row.get(2)?,
        options: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

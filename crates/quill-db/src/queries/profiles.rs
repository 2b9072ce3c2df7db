use crate::Database;
use crate::models::ProfileRow;
use anyhow::Result;

use super::OptionalExt;

const PROFILE_COLS: &str = "id, owner_id, name, bio, profile_img, created_at, updated_at";

impl Database {
    pub fn insert_profile(&self, id: &str, owner_id: &str, name: &str, bio: &str, profile_img: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO profiles (id, owner_id, name, bio, profile_img) VALUES (?1, ?2, ?3, ?4, ?5)",
                (id, owner_id, name, bio, profile_img),
            )?;
            Ok(())
        })
    }

    pub fn get_profile_by_owner(&self, owner_id: &str) -> Result<Option<ProfileRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {PROFILE_COLS} FROM profiles WHERE owner_id = ?1");
            let mut stmt = conn.prepare(&sql)?;
            stmt.query_row([owner_id], profile_from_row).optional()
        })
    }

    pub fn list_profiles(&self) -> Result<Vec<ProfileRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {PROFILE_COLS} FROM profiles ORDER BY created_at");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([], profile_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn update_profile_name(&self, owner_id: &str, name: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE profiles SET name = ?2, updated_at = datetime('now') WHERE owner_id = ?1",
                (owner_id, name),
            )?;
            Ok(())
        })
    }

    pub fn update_profile_bio(&self, owner_id: &str, bio: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE profiles SET bio = ?2, updated_at = datetime('now') WHERE owner_id = ?1",
                (owner_id, bio),
            )?;
            Ok(())
        })
    }

    pub fn update_profile_img(&self, owner_id: &str, profile_img: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE profiles SET profile_img = ?2, updated_at = datetime('now') WHERE owner_id = ?1",
                (owner_id, profile_img),
            )?;
            Ok(())
        })
    }
}

fn profile_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<ProfileRow, rusqlite::Error> {
    Ok(ProfileRow {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        bio: row.get(3)?,
        profile_img: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

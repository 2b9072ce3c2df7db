//! Database row types — these map directly to SQLite rows.
//! Distinct from the quill-types API models to keep the DB layer independent.

use chrono::{DateTime, NaiveDateTime, Utc};

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password: String,
    pub created_at: String,
    pub updated_at: String,
}

pub struct FriendRequestRow {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

pub struct FriendshipRow {
    pub id: String,
    pub user1_id: String,
    pub user2_id: String,
    pub created_at: String,
    pub updated_at: String,
}

pub struct PostRow {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub options: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

pub struct EntryRow {
    pub id: String,
    pub author_id: String,
    pub prompt: String,
    pub response: String,
    pub created_at: String,
    pub updated_at: String,
}

pub struct MessageRow {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub content_id: String,
    pub created_at: String,
    pub updated_at: String,
}

pub struct ProfileRow {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub bio: String,
    pub profile_img: String,
    pub created_at: String,
    pub updated_at: String,
}

pub struct VisibilityRow {
    pub id: String,
    pub user_id: String,
    pub content_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
/// Accept RFC 3339 as well so rows written by other tools still parse.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>().ok().or_else(|| {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .map(|ndt| ndt.and_utc())
            .ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sqlite_datetime() {
        let ts = parse_timestamp("2026-08-07 12:34:56").unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-08-07T12:34:56+00:00");
    }

    #[test]
    fn parses_rfc3339() {
        assert!(parse_timestamp("2026-08-07T12:34:56Z").is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("not a date").is_none());
    }
}

//! Row-to-model parsing shared by the concept impls.

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use quill_db::models::parse_timestamp;
use uuid::Uuid;

use crate::error::ConceptError;

pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Uuid, ConceptError> {
    raw.parse()
        .map_err(|_| ConceptError::Internal(anyhow!("corrupt {what} id: {raw}")))
}

pub(crate) fn parse_time(raw: &str) -> Result<DateTime<Utc>, ConceptError> {
    parse_timestamp(raw).ok_or_else(|| ConceptError::Internal(anyhow!("corrupt timestamp: {raw}")))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::document::ResumeDocument;

/// Row shape of the `resumes` table.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: Json<ResumeDocument>,
    pub is_ai_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted resume. `user_id` is the owner and never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: ResumeDocument,
    pub is_ai_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeRow> for Resume {
    fn from(row: ResumeRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            content: row.content.0,
            is_ai_generated: row.is_ai_generated,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert parameters for a new resume.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub user_id: Uuid,
    pub title: String,
    pub content: ResumeDocument,
    pub is_ai_generated: bool,
}

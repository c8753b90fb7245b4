use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::document::ResumeDocument;
use crate::errors::AppError;
use crate::models::resume::{NewResume, Resume, ResumeRow};

/// Persisted entity store keyed by resume id.
///
/// The store knows nothing about ownership; callers go through
/// [`crate::resumes::bridge`] which checks it before any mutation.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError>;
    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Resume>, AppError>;
    async fn insert(&self, new: NewResume) -> Result<Resume, AppError>;
    /// Wholesale content replacement. `title: None` keeps the current title.
    /// Returns `None` when the row no longer exists.
    async fn replace_content(
        &self,
        id: Uuid,
        title: Option<&str>,
        content: &ResumeDocument,
    ) -> Result<Option<Resume>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

const RESUME_COLUMNS: &str =
    "id, user_id, title, content, is_ai_generated, created_at, updated_at";

/// PostgreSQL-backed store. Content lives in a JSONB column.
#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn get(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(&format!(
            "SELECT {RESUME_COLUMNS} FROM resumes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Resume::from))
    }

    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Resume>, AppError> {
        let rows = sqlx::query_as::<_, ResumeRow>(&format!(
            "SELECT {RESUME_COLUMNS} FROM resumes WHERE user_id = $1 ORDER BY updated_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Resume::from).collect())
    }

    async fn insert(&self, new: NewResume) -> Result<Resume, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(&format!(
            r#"
            INSERT INTO resumes (id, user_id, title, content, is_ai_generated)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {RESUME_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.title)
        .bind(Json(&new.content))
        .bind(new.is_ai_generated)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn replace_content(
        &self,
        id: Uuid,
        title: Option<&str>,
        content: &ResumeDocument,
    ) -> Result<Option<Resume>, AppError> {
        // Last write wins: no version column, no merge.
        let row = sqlx::query_as::<_, ResumeRow>(&format!(
            r#"
            UPDATE resumes
            SET content = $2, title = COALESCE($3, title), updated_at = now()
            WHERE id = $1
            RETURNING {RESUME_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(Json(content))
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Resume::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
pub use memory::MemoryResumeStore;

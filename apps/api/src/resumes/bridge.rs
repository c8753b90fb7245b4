//! Persistence Bridge: ownership-checked lifecycle operations over a [`ResumeStore`].
//!
//! Existence and ownership are verified before any mutation. Saves replace the
//! whole document; concurrent saves resolve last-write-wins.

use tracing::info;
use uuid::Uuid;

use crate::document::ResumeDocument;
use crate::errors::AppError;
use crate::models::resume::{NewResume, Resume};
use crate::resumes::store::ResumeStore;

/// Fetches a resume and verifies the caller owns it.
pub async fn load(store: &dyn ResumeStore, user_id: Uuid, id: Uuid) -> Result<Resume, AppError> {
    let resume = store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    if resume.user_id != user_id {
        return Err(AppError::Forbidden);
    }
    Ok(resume)
}

pub async fn list(store: &dyn ResumeStore, user_id: Uuid) -> Result<Vec<Resume>, AppError> {
    store.list_by_owner(user_id).await
}

pub async fn create(
    store: &dyn ResumeStore,
    user_id: Uuid,
    title: String,
    content: ResumeDocument,
    is_ai_generated: bool,
) -> Result<Resume, AppError> {
    let resume = store
        .insert(NewResume {
            user_id,
            title,
            content,
            is_ai_generated,
        })
        .await?;
    info!("Created resume {} for user {}", resume.id, user_id);
    Ok(resume)
}

/// Replaces the persisted content wholesale. No merge, no concurrency token.
pub async fn save(
    store: &dyn ResumeStore,
    user_id: Uuid,
    id: Uuid,
    title: Option<&str>,
    content: &ResumeDocument,
) -> Result<Resume, AppError> {
    load(store, user_id, id).await?;

    let saved = store
        .replace_content(id, title, content)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    info!("Saved resume {id} for user {user_id}");
    Ok(saved)
}

pub async fn delete(store: &dyn ResumeStore, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    load(store, user_id, id).await?;

    if !store.delete(id).await? {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    info!("Deleted resume {id} for user {user_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::sample::sample_document;
    use crate::document::ExperienceEntry;
    use crate::resumes::store::MemoryResumeStore;

    async fn seeded(store: &MemoryResumeStore, owner: Uuid) -> Resume {
        create(store, owner, "Mine".into(), ResumeDocument::default(), false)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let store = MemoryResumeStore::default();
        let owner = Uuid::new_v4();
        let resume = seeded(&store, owner).await;

        let doc = sample_document();
        save(&store, owner, resume.id, None, &doc).await.unwrap();

        let loaded = load(&store, owner, resume.id).await.unwrap();
        assert_eq!(loaded.content, doc);
        assert_eq!(loaded.title, "Mine");
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let store = MemoryResumeStore::default();
        let err = load(&store, Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_non_owner_is_forbidden_and_resume_unchanged() {
        let store = MemoryResumeStore::default();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let resume = seeded(&store, owner).await;

        let err = load(&store, intruder, resume.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        let err = save(&store, intruder, resume.id, Some("Pwned"), &sample_document())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        let err = delete(&store, intruder, resume.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        let untouched = load(&store, owner, resume.id).await.unwrap();
        assert_eq!(untouched, resume);
    }

    #[tokio::test]
    async fn test_last_write_wins_without_merge() {
        let store = MemoryResumeStore::default();
        let owner = Uuid::new_v4();
        let resume = seeded(&store, owner).await;

        // Two sessions load the same resume.
        let mut doc_a = load(&store, owner, resume.id).await.unwrap().content;
        let mut doc_b = load(&store, owner, resume.id).await.unwrap().content;

        doc_a.skills = vec!["Rust".into()];
        doc_a.experience.push(ExperienceEntry::blank());
        doc_b.personal_info.full_name = Some("B".into());

        save(&store, owner, resume.id, None, &doc_a).await.unwrap();
        save(&store, owner, resume.id, None, &doc_b).await.unwrap();

        let loaded = load(&store, owner, resume.id).await.unwrap().content;
        assert_eq!(loaded, doc_b);
        assert!(loaded.skills.is_empty());
        assert!(loaded.experience.is_empty());
    }

    #[tokio::test]
    async fn test_save_with_title_renames() {
        let store = MemoryResumeStore::default();
        let owner = Uuid::new_v4();
        let resume = seeded(&store, owner).await;

        let saved = save(&store, owner, resume.id, Some("Renamed"), &resume.content)
            .await
            .unwrap();
        assert_eq!(saved.title, "Renamed");
    }

    #[tokio::test]
    async fn test_delete_then_load_is_not_found() {
        let store = MemoryResumeStore::default();
        let owner = Uuid::new_v4();
        let resume = seeded(&store, owner).await;

        delete(&store, owner, resume.id).await.unwrap();
        assert!(matches!(
            load(&store, owner, resume.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_list_only_returns_owned() {
        let store = MemoryResumeStore::default();
        let owner = Uuid::new_v4();
        seeded(&store, owner).await;
        seeded(&store, owner).await;
        seeded(&store, Uuid::new_v4()).await;

        let owned = list(&store, owner).await.unwrap();
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|r| r.user_id == owner));
    }
}

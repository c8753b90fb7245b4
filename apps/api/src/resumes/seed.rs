use tracing::info;
use uuid::Uuid;

use crate::document::sample::{sample_document, SAMPLE_TITLE};
use crate::errors::AppError;
use crate::resumes::{bridge, store::ResumeStore};

/// Creates the sample resume for the demo user unless they already own one.
pub async fn seed_demo_resume(store: &dyn ResumeStore, demo_user: Uuid) -> Result<(), AppError> {
    if !store.list_by_owner(demo_user).await?.is_empty() {
        info!("Demo user {demo_user} already has resumes, skipping seed");
        return Ok(());
    }

    bridge::create(
        store,
        demo_user,
        SAMPLE_TITLE.to_string(),
        sample_document(),
        false,
    )
    .await?;
    info!("Seeded demo resume for user {demo_user}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resumes::store::MemoryResumeStore;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = MemoryResumeStore::default();
        let demo = Uuid::new_v4();

        seed_demo_resume(&store, demo).await.unwrap();
        seed_demo_resume(&store, demo).await.unwrap();

        let owned = store.list_by_owner(demo).await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].title, SAMPLE_TITLE);
    }
}

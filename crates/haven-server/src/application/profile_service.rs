//! Profile Application Service

use std::sync::Arc;
use uuid::Uuid;

use haven::domain::{DomainError, User, UserProfile};
use haven::ports::{DocumentStore, ProfileRepository};

pub struct ProfileService<Prof: ProfileRepository> {
    profiles: Arc<Prof>,
    store: Arc<dyn DocumentStore>,
}

impl<Prof: ProfileRepository> ProfileService<Prof> {
    pub fn new(profiles: Arc<Prof>, store: Arc<dyn DocumentStore>) -> Self {
        Self { profiles, store }
    }

    /// The user with their profile, creating an empty profile on first
    /// access.
    pub async fn get(&self, user_id: Uuid) -> Result<(User, UserProfile), DomainError> {
        let user = self
            .profiles
            .find_user(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))?;

        let profile = match self.profiles.find_profile_by_user(user_id).await? {
            Some(profile) => profile,
            None => self.profiles.save_profile(&UserProfile::new(user_id)).await?,
        };

        Ok((user, profile))
    }

    /// Swap the profile photo, removing the previous blob.
    pub async fn update_photo(
        &self,
        user_id: Uuid,
        url: String,
        storage_public_id: String,
    ) -> Result<UserProfile, DomainError> {
        let (_, mut profile) = self.get(user_id).await?;

        if let Some(old_id) = profile.photo_public_id.take() {
            if old_id != storage_public_id {
                if let Err(e) = self.store.delete(&old_id).await {
                    tracing::warn!(error = %e, "Could not remove previous profile photo");
                }
            }
        }

        profile.photo_url = Some(url);
        profile.photo_public_id = Some(storage_public_id);
        self.profiles.save_profile(&profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::*;
    use haven::domain::UserRole;

    #[tokio::test]
    async fn first_access_creates_the_profile() {
        let profiles = Arc::new(FakeProfileRepository::default());
        let store = Arc::new(FakeDocumentStore::default());
        let svc = ProfileService::new(profiles.clone(), store);

        let user = User::new(
            "ada@example.com".into(),
            "Ada".into(),
            "Obi".into(),
            UserRole::Tenant,
        );
        let user_id = user.id;
        profiles.insert_user(user);

        let (_, first) = svc.get(user_id).await.unwrap();
        let (_, second) = svc.get(user_id).await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn photo_swap_removes_the_old_blob() {
        let profiles = Arc::new(FakeProfileRepository::default());
        let store = Arc::new(FakeDocumentStore::default());
        let svc = ProfileService::new(profiles.clone(), store.clone());

        let user = User::new(
            "ada@example.com".into(),
            "Ada".into(),
            "Obi".into(),
            UserRole::Tenant,
        );
        let user_id = user.id;
        profiles.insert_user(user);

        svc.update_photo(user_id, "https://m/1.jpg".into(), "photos/1".into())
            .await
            .unwrap();
        let profile = svc
            .update_photo(user_id, "https://m/2.jpg".into(), "photos/2".into())
            .await
            .unwrap();

        assert_eq!(profile.photo_public_id.as_deref(), Some("photos/2"));
        assert_eq!(store.deleted_ids(), vec!["photos/1".to_string()]);
    }
}

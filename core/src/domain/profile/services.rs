use tracing::{info, instrument};

use crate::domain::{
    authentication::ports::AuthClient,
    common::{entities::app_errors::CoreError, services::Service},
    food::ports::FoodRepository,
    preference::ports::PreferenceStore,
    profile::{
        entities::Profile,
        ports::{ProfileRepository, ProfileService},
        value_objects::UpdateProfileInput,
    },
};

impl<F, P, A, PR> ProfileService for Service<F, P, A, PR>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
{
    #[instrument(skip(self))]
    async fn get_profile(&self) -> Result<Option<Profile>, CoreError> {
        let session = self.require_session().await?;

        self.profile_repository
            .get_by_user_id(session.user.id, &session.access_token)
            .await
    }

    #[instrument(skip(self, input))]
    async fn update_profile(&self, input: UpdateProfileInput) -> Result<Profile, CoreError> {
        let session = self.require_session().await?;
        let input = input.validated()?;

        let mut profile = self
            .profile_repository
            .get_by_user_id(session.user.id, &session.access_token)
            .await?
            .unwrap_or_else(|| Profile::empty(session.user.id));
        input.apply_to(&mut profile);
        profile.updated_at = Some(chrono::Utc::now());

        let profile = self
            .profile_repository
            .upsert(profile, &session.access_token)
            .await?;

        info!(user_id = %profile.id, "profile updated");

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        authentication::{ports::AuthService, value_objects::SignInInput},
        common::test_utils::build_service,
    };

    async fn signed_in() -> crate::domain::common::test_utils::TestService {
        let service = build_service();
        service.auth_client.register("ana@example.com", "secret1", "Ana");
        service
            .sign_in(SignInInput {
                email: "ana@example.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();
        service
    }

    #[tokio::test]
    async fn test_requires_session() {
        let service = build_service();

        assert_eq!(service.get_profile().await, Err(CoreError::Unauthenticated));
        assert_eq!(
            service
                .update_profile(UpdateProfileInput::default())
                .await
                .unwrap_err(),
            CoreError::Unauthenticated
        );
    }

    #[tokio::test]
    async fn test_update_creates_then_edits_profile() {
        let service = signed_in().await;
        assert_eq!(service.get_profile().await, Ok(None));

        let created = service
            .update_profile(UpdateProfileInput {
                name: Some("  Ana María ".to_string()),
                avatar_url: None,
            })
            .await
            .unwrap();
        assert_eq!(created.name.as_deref(), Some("Ana María"));
        assert!(created.updated_at.is_some());

        service
            .update_profile(UpdateProfileInput {
                name: None,
                avatar_url: Some("https://cdn.example.com/ana.png".to_string()),
            })
            .await
            .unwrap();

        let stored = service.get_profile().await.unwrap().unwrap();
        assert_eq!(stored.name.as_deref(), Some("Ana María"));
        assert_eq!(
            stored.avatar_url.as_deref(),
            Some("https://cdn.example.com/ana.png")
        );
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let service = signed_in().await;

        let result = service
            .update_profile(UpdateProfileInput {
                name: Some("   ".to_string()),
                avatar_url: None,
            })
            .await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert_eq!(service.profile_repository.upsert_calls(), 0);
    }
}

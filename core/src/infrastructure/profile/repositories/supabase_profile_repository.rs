use reqwest::Method;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        profile::{entities::Profile, ports::ProfileRepository},
    },
    infrastructure::{
        profile::mappers::ProfileRow,
        supabase::{Endpoint, SupabaseClient},
    },
};

const TABLE: &str = "profiles";

#[derive(Debug, Clone)]
pub struct SupabaseProfileRepository {
    client: SupabaseClient,
}

impl SupabaseProfileRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

impl ProfileRepository for SupabaseProfileRepository {
    #[instrument(skip(self, access_token))]
    async fn get_by_user_id(
        &self,
        user_id: Uuid,
        access_token: &str,
    ) -> Result<Option<Profile>, CoreError> {
        let request = self
            .client
            .request(Method::GET, &self.client.rest_url(TABLE), Some(access_token))
            .query(&[
                ("select", "*".to_string()),
                ("id", format!("eq.{}", user_id)),
                ("limit", "1".to_string()),
            ]);

        let rows: Vec<ProfileRow> = self.client.send_json(request, Endpoint::Rest).await?;

        Ok(rows.into_iter().next().map(Profile::from))
    }

    #[instrument(skip(self, profile, access_token), fields(user_id = %profile.id))]
    async fn upsert(&self, profile: Profile, access_token: &str) -> Result<Profile, CoreError> {
        let request = self
            .client
            .request(Method::POST, &self.client.rest_url(TABLE), Some(access_token))
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&[ProfileRow::from(profile)]);

        let rows: Vec<ProfileRow> = self.client.send_json(request, Endpoint::Rest).await?;

        rows.into_iter()
            .next()
            .map(Profile::from)
            .ok_or_else(|| CoreError::ExternalServiceError("upsert returned no row".to_string()))
    }
}

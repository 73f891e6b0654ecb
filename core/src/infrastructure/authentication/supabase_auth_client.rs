use chrono::Utc;
use reqwest::Method;
use serde::Serialize;
use serde_json::json;
use tracing::instrument;

use crate::{
    domain::{
        authentication::{
            entities::{Session, SignUpOutcome},
            ports::AuthClient,
        },
        common::entities::app_errors::CoreError,
    },
    infrastructure::{
        authentication::mappers::TokenResponse,
        supabase::{Endpoint, SupabaseClient},
    },
};

#[derive(Debug, Clone)]
pub struct SupabaseAuthClient {
    client: SupabaseClient,
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

impl SupabaseAuthClient {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    async fn token(&self, grant_type: &str, body: &impl Serialize) -> Result<Session, CoreError> {
        let request = self
            .client
            .request(Method::POST, &self.client.auth_url("token"), None)
            .query(&[("grant_type", grant_type)])
            .json(body);

        let response: TokenResponse = self.client.send_json(request, Endpoint::Auth).await?;

        response.into_session(Utc::now())
    }
}

impl AuthClient for SupabaseAuthClient {
    #[instrument(skip(self, password))]
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, CoreError> {
        self.token("password", &PasswordGrant { email, password }).await
    }

    #[instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<SignUpOutcome, CoreError> {
        let request = self
            .client
            .request(Method::POST, &self.client.auth_url("signup"), None)
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "name": name },
            }));

        let response: TokenResponse = self.client.send_json(request, Endpoint::Auth).await?;

        response.into_sign_up_outcome(Utc::now())
    }

    #[instrument(skip_all)]
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, CoreError> {
        self.token("refresh_token", &RefreshGrant { refresh_token }).await
    }

    #[instrument(skip_all)]
    async fn sign_out(&self, access_token: &str) -> Result<(), CoreError> {
        let request = self
            .client
            .request(Method::POST, &self.client.auth_url("logout"), Some(access_token));

        self.client.send_empty(request, Endpoint::Auth).await
    }
}

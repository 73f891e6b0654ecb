use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::domain::common::{SupabaseConfig, entities::app_errors::CoreError};

/// Which Supabase API a response came from. Credentials errors mean
/// different things on each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Rest,
    Auth,
}

/// Thin wrapper over `reqwest` that knows the project URL and attaches the
/// `apikey` and bearer headers every Supabase call needs.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    client: Client,
}

/// Error payloads differ between PostgREST and GoTrue.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl SupabaseClient {
    pub fn new(config: &SupabaseConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                tracing::error!("failed to build HTTP client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            client,
        })
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Starts a request authorised with `access_token`, or with the anon key
    /// when there is no user token.
    pub fn request(&self, method: Method, url: &str, access_token: Option<&str>) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token.unwrap_or(&self.anon_key))
    }

    pub async fn send_json<T>(&self, request: RequestBuilder, endpoint: Endpoint) -> Result<T, CoreError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request, endpoint).await?;

        response.json::<T>().await.map_err(|e| {
            tracing::error!("failed to parse Supabase response: {}", e);
            CoreError::ExternalServiceError(format!("unexpected response: {}", e))
        })
    }

    pub async fn send_empty(&self, request: RequestBuilder, endpoint: Endpoint) -> Result<(), CoreError> {
        self.send(request, endpoint).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder, endpoint: Endpoint) -> Result<reqwest::Response, CoreError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Supabase request failed: {}", e);
            CoreError::ExternalServiceError(format!("request failed: {}", e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!("Supabase returned {}: {}", status, body);

        Err(map_status(status, endpoint, &body))
    }
}

/// Translates a non-success status into the domain error.
pub fn map_status(status: StatusCode, endpoint: Endpoint, body: &str) -> CoreError {
    let message = error_message(body).unwrap_or_else(|| status.to_string());

    match (endpoint, status) {
        (Endpoint::Auth, StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
            CoreError::InvalidCredentials
        }
        (_, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => CoreError::Unauthenticated,
        (_, StatusCode::NOT_FOUND) => CoreError::NotFound,
        (_, StatusCode::CONFLICT) => CoreError::Conflict(message),
        (_, StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY) => {
            CoreError::Validation(message)
        }
        _ => CoreError::ExternalServiceError(message),
    }
}

fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;

    parsed
        .message
        .or(parsed.msg)
        .or(parsed.error_description)
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
}

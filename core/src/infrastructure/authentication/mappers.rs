use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::{
    authentication::entities::{AuthUser, Session, SignUpOutcome},
    common::entities::app_errors::CoreError,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Token endpoint response. Sign-up returns the same shape when the
/// project auto-confirms accounts, and a bare user object otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub user: Option<UserPayload>,
}

impl From<UserPayload> for AuthUser {
    fn from(user: UserPayload) -> Self {
        Self {
            id: user.id,
            email: user.email.unwrap_or_default(),
            name: user.user_metadata.name,
        }
    }
}

impl TokenResponse {
    pub fn into_session(self, now: DateTime<Utc>) -> Result<Session, CoreError> {
        let (Some(access_token), Some(refresh_token), Some(user)) =
            (self.access_token, self.refresh_token, self.user)
        else {
            return Err(CoreError::ExternalServiceError(
                "token response without a session".to_string(),
            ));
        };

        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)))
            .unwrap_or(now);

        Ok(Session {
            access_token,
            refresh_token,
            expires_at,
            user: user.into(),
        })
    }

    pub fn into_sign_up_outcome(self, now: DateTime<Utc>) -> Result<SignUpOutcome, CoreError> {
        if self.access_token.is_none() {
            return Ok(SignUpOutcome::ConfirmationRequired);
        }

        self.into_session(now).map(SignUpOutcome::SignedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_ID: &str = "8d0fd2b3-9ca7-4f4b-a2f1-5a1c3e0b6a11";

    #[test]
    fn test_token_response_into_session() {
        let json = format!(
            r#"{{
                "access_token": "jwt",
                "token_type": "bearer",
                "expires_in": 3600,
                "expires_at": 1735689600,
                "refresh_token": "r1",
                "user": {{"id": "{USER_ID}", "email": "ana@example.com", "user_metadata": {{"name": "Ana"}}}}
            }}"#
        );
        let response: TokenResponse = serde_json::from_str(&json).unwrap();

        let session = response.into_session(Utc::now()).unwrap();

        assert_eq!(session.access_token, "jwt");
        assert_eq!(session.expires_at.timestamp(), 1_735_689_600);
        assert_eq!(session.user.name.as_deref(), Some("Ana"));
        assert_eq!(session.user.id.to_string(), USER_ID);
    }

    #[test]
    fn test_expiry_falls_back_to_expires_in() {
        let now = Utc::now();
        let json = format!(
            r#"{{"access_token":"jwt","refresh_token":"r1","expires_in":60,"user":{{"id":"{USER_ID}"}}}}"#
        );
        let response: TokenResponse = serde_json::from_str(&json).unwrap();

        let session = response.into_session(now).unwrap();

        assert_eq!(session.expires_at, now + Duration::seconds(60));
        assert_eq!(session.user.email, "");
    }

    #[test]
    fn test_sign_up_without_session_needs_confirmation() {
        // Unconfirmed sign-ups answer with the user object only.
        let json = format!(r#"{{"id":"{USER_ID}","email":"ana@example.com"}}"#);
        let response: TokenResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(
            response.into_sign_up_outcome(Utc::now()).unwrap(),
            SignUpOutcome::ConfirmationRequired
        );
    }
}

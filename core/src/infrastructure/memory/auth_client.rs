use std::collections::HashMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use chrono::{Duration, Utc};

use super::lock;
use crate::domain::{
    authentication::{
        entities::{AuthUser, Session, SignUpOutcome},
        ports::AuthClient,
    },
    common::{entities::app_errors::CoreError, generate_uuid_v7},
};

const SESSION_LIFETIME_MINUTES: i64 = 60;

#[derive(Clone)]
struct Account {
    password: String,
    user: AuthUser,
}

#[derive(Clone, Default)]
pub struct InMemoryAuthClient {
    accounts: Arc<Mutex<HashMap<String, Account>>>,
    refresh_tokens: Arc<Mutex<HashMap<String, AuthUser>>>,
    require_confirmation: Arc<AtomicBool>,
    fail_refresh: Arc<AtomicBool>,
    fail_sign_out: Arc<AtomicBool>,
    sign_in_calls: Arc<AtomicUsize>,
}

impl InMemoryAuthClient {
    pub fn register(&self, email: &str, password: &str, name: &str) -> AuthUser {
        let user = AuthUser {
            id: generate_uuid_v7(),
            email: email.to_string(),
            name: Some(name.to_string()),
        };
        lock(&self.accounts).insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        user
    }

    /// New accounts must be confirmed by e-mail before they get a session.
    pub fn require_confirmation(&self, required: bool) {
        self.require_confirmation.store(required, Ordering::SeqCst);
    }

    pub fn fail_refresh(&self, fail: bool) {
        self.fail_refresh.store(fail, Ordering::SeqCst);
    }

    pub fn fail_sign_out(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    fn issue_session(&self, user: AuthUser) -> Session {
        let refresh_token = generate_uuid_v7().to_string();
        lock(&self.refresh_tokens).insert(refresh_token.clone(), user.clone());

        Session {
            access_token: generate_uuid_v7().to_string(),
            refresh_token,
            expires_at: Utc::now() + Duration::minutes(SESSION_LIFETIME_MINUTES),
            user,
        }
    }
}

impl AuthClient for InMemoryAuthClient {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, CoreError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);

        let account = lock(&self.accounts).get(email).cloned();
        match account {
            Some(account) if account.password == password => Ok(self.issue_session(account.user)),
            _ => Err(CoreError::InvalidCredentials),
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<SignUpOutcome, CoreError> {
        if lock(&self.accounts).contains_key(email) {
            return Err(CoreError::Conflict("user already registered".to_string()));
        }
        let user = self.register(email, password, name);

        if self.require_confirmation.load(Ordering::SeqCst) {
            return Ok(SignUpOutcome::ConfirmationRequired);
        }
        Ok(SignUpOutcome::SignedIn(self.issue_session(user)))
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, CoreError> {
        if self.fail_refresh.load(Ordering::SeqCst) {
            return Err(CoreError::InvalidCredentials);
        }

        let user = lock(&self.refresh_tokens)
            .remove(refresh_token)
            .ok_or(CoreError::InvalidCredentials)?;

        Ok(self.issue_session(user))
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), CoreError> {
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(CoreError::ExternalServiceError(
                "auth server unreachable".to_string(),
            ));
        }
        Ok(())
    }
}

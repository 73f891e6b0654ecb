use std::future::Future;

use crate::domain::{
    authentication::{
        entities::{Session, SignUpOutcome},
        value_objects::{SignInInput, SignUpInput},
    },
    common::entities::{app_errors::CoreError, synced::Synced},
};

/// Remote identity provider.
#[cfg_attr(test, mockall::automock)]
pub trait AuthClient: Send + Sync {
    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;

    fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> impl Future<Output = Result<SignUpOutcome, CoreError>> + Send;

    fn refresh_session(
        &self,
        refresh_token: &str,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;

    fn sign_out(&self, access_token: &str) -> impl Future<Output = Result<(), CoreError>> + Send;
}

pub trait AuthService: Send + Sync {
    /// Loads the persisted session, refreshing it when expired. Anything
    /// that cannot be restored is dropped and reported as `None`.
    fn restore_session(&self) -> impl Future<Output = Option<Session>> + Send;

    fn sign_in(&self, input: SignInInput) -> impl Future<Output = Result<Session, CoreError>> + Send;

    fn sign_up(
        &self,
        input: SignUpInput,
    ) -> impl Future<Output = Result<SignUpOutcome, CoreError>> + Send;

    /// Always clears the local session, even if the remote revoke fails.
    fn sign_out(&self) -> impl Future<Output = Synced<()>> + Send;

    fn current_session(&self) -> impl Future<Output = Option<Session>> + Send;
}

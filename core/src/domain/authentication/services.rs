use tracing::{error, info, instrument, warn};

use crate::domain::{
    authentication::{
        entities::{Session, SignUpOutcome},
        ports::{AuthClient, AuthService},
        value_objects::{SignInInput, SignUpInput},
    },
    common::{
        entities::{app_errors::CoreError, synced::Synced},
        services::Service,
    },
    food::ports::FoodRepository,
    preference::{
        SESSION_KEY,
        ports::PreferenceStore,
        services::{load_json, save_json},
    },
    profile::ports::ProfileRepository,
};

impl<F, P, A, PR> Service<F, P, A, PR>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
{
    /// The held session, or `Unauthenticated`.
    pub(crate) async fn require_session(&self) -> Result<Session, CoreError> {
        self.session
            .read()
            .await
            .clone()
            .ok_or(CoreError::Unauthenticated)
    }

    /// Holds `session` for this run. A failed write is logged and the session
    /// only lasts until the process exits.
    async fn hold_session(&self, session: Session) -> Session {
        let mut guard = self.session.write().await;
        if let Err(e) = save_json(&self.preference_store, SESSION_KEY, &session).await {
            warn!(error = %e, "session will not survive a restart");
        }
        *guard = Some(session.clone());

        session
    }
}

impl<F, P, A, PR> AuthService for Service<F, P, A, PR>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
{
    #[instrument(skip(self))]
    async fn restore_session(&self) -> Option<Session> {
        let persisted: Session = load_json(&self.preference_store, SESSION_KEY)
            .await
            .ok()
            .flatten()?;

        if !persisted.is_expired() {
            *self.session.write().await = Some(persisted.clone());
            return Some(persisted);
        }

        match self.auth_client.refresh_session(&persisted.refresh_token).await {
            Ok(session) => {
                info!(user_id = %session.user.id, "session refreshed");
                Some(self.hold_session(session).await)
            }
            Err(e) => {
                warn!(error = %e, "could not refresh expired session");
                let mut guard = self.session.write().await;
                if let Err(e) = self.preference_store.remove(SESSION_KEY).await {
                    warn!(error = %e, "failed to remove expired session");
                }
                *guard = None;
                None
            }
        }
    }

    #[instrument(skip(self, input))]
    async fn sign_in(&self, input: SignInInput) -> Result<Session, CoreError> {
        let input = input.validated()?;

        let session = self
            .auth_client
            .sign_in_with_password(&input.email, &input.password)
            .await?;

        info!(user_id = %session.user.id, "signed in");

        Ok(self.hold_session(session).await)
    }

    #[instrument(skip(self, input))]
    async fn sign_up(&self, input: SignUpInput) -> Result<SignUpOutcome, CoreError> {
        let input = input.validated()?;

        let outcome = self
            .auth_client
            .sign_up(&input.email, &input.password, &input.name)
            .await?;

        match outcome {
            SignUpOutcome::SignedIn(session) => {
                info!(user_id = %session.user.id, "signed up");
                Ok(SignUpOutcome::SignedIn(self.hold_session(session).await))
            }
            SignUpOutcome::ConfirmationRequired => {
                info!("sign-up awaiting e-mail confirmation");
                Ok(SignUpOutcome::ConfirmationRequired)
            }
        }
    }

    #[instrument(skip(self))]
    async fn sign_out(&self) -> Synced<()> {
        let mut guard = self.session.write().await;

        if let Some(session) = guard.as_ref()
            && let Err(e) = self.auth_client.sign_out(&session.access_token).await
        {
            error!(error = %e, "remote sign-out failed");
        }
        *guard = None;

        let write = self.preference_store.remove(SESSION_KEY).await;
        if let Err(e) = &write {
            warn!(error = %e, "failed to remove persisted session");
        }

        Synced::from_write((), write)
    }

    async fn current_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }
}

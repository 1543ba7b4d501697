use super::api;
use crate::error::RemoteError;
use chrono::{Duration, Utc};
use reqwest::Client;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use watchtrack_config::{BackendConfig, CredentialStore};
use watchtrack_models::{Profile, Session, User};

/// Refresh the access token when it expires within this margin.
const REFRESH_MARGIN_MINUTES: i64 = 5;

#[derive(Debug)]
pub enum SignUpOutcome {
    /// Confirmation is off; the account is usable right away.
    SignedIn(Session),
    /// The provider dispatched a confirmation email first.
    ConfirmationSent,
}

/// Pass-through to the external auth provider, plus session persistence
/// between runs. Unlike the catalog and store clients, auth returns the
/// provider's error so the view layer can show its message inline.
pub struct AuthClient {
    client: Client,
    base_url: String,
    publishable_key: String,
    credentials_path: PathBuf,
}

impl AuthClient {
    pub fn new(config: &BackendConfig, credentials_path: PathBuf) -> Self {
        Self {
            client: Client::new(),
            base_url: config.project_url.trim_end_matches('/').to_string(),
            publishable_key: config.publishable_key.clone(),
            credentials_path,
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, RemoteError> {
        let session = api::sign_in(
            &self.client,
            &self.base_url,
            &self.publishable_key,
            email,
            password,
        )
        .await?;
        self.persist_session(&session);
        info!("Signed in as {}", session.user.email);
        Ok(session)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, RemoteError> {
        let outcome = api::sign_up(
            &self.client,
            &self.base_url,
            &self.publishable_key,
            email,
            password,
        )
        .await?;
        match outcome {
            Some(session) => {
                self.persist_session(&session);
                Ok(SignUpOutcome::SignedIn(session))
            }
            None => Ok(SignUpOutcome::ConfirmationSent),
        }
    }

    /// Revoke the session remotely and forget it locally. The stored
    /// session is cleared even when the remote revocation fails.
    pub async fn sign_out(&self, session: &Session) -> Result<(), RemoteError> {
        let result = api::sign_out(
            &self.client,
            &self.base_url,
            &self.publishable_key,
            &session.access_token,
        )
        .await;
        self.clear_session();
        result
    }

    /// Restore the persisted session, refreshing the access token when it
    /// is expired or about to be. Returns None when no usable session
    /// exists; every failure path is logged, never surfaced.
    pub async fn restore_session(&self) -> Option<Session> {
        let mut store = CredentialStore::new(self.credentials_path.clone());
        if let Err(e) = store.load() {
            warn!("Failed to load stored credentials: {}", e);
            return None;
        }
        if !store.has_session() {
            debug!("No stored session");
            return None;
        }

        let refresh_token = store.get_refresh_token().cloned()?;

        if let Some(expires_at) = store.get_token_expires() {
            if expires_at > Utc::now() + Duration::minutes(REFRESH_MARGIN_MINUTES) {
                let session = Session {
                    access_token: store.get_access_token().cloned()?,
                    refresh_token,
                    expires_at,
                    user: User {
                        id: store.get_user_id().cloned()?,
                        email: store.get_user_email().cloned()?,
                        created_at: store.get_user_created()?,
                    },
                };
                debug!("Using stored session (expires at {})", expires_at);
                return Some(session);
            }
            info!("Stored access token expired or expiring soon, refreshing");
        }

        match api::refresh(
            &self.client,
            &self.base_url,
            &self.publishable_key,
            &refresh_token,
        )
        .await
        {
            Ok(session) => {
                self.persist_session(&session);
                Some(session)
            }
            Err(e) => {
                warn!("Session refresh failed: {}", e);
                None
            }
        }
    }

    pub async fn profile(&self, session: &Session) -> Result<Profile, RemoteError> {
        api::user(
            &self.client,
            &self.base_url,
            &self.publishable_key,
            &session.access_token,
        )
        .await
    }

    pub async fn reset_password(&self, email: &str) -> Result<(), RemoteError> {
        api::recover(&self.client, &self.base_url, &self.publishable_key, email).await
    }

    pub async fn update_profile(
        &self,
        session: &Session,
        username: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Profile, RemoteError> {
        api::update_metadata(
            &self.client,
            &self.base_url,
            &self.publishable_key,
            &session.access_token,
            username,
            phone,
        )
        .await
    }

    fn persist_session(&self, session: &Session) {
        let mut store = CredentialStore::new(self.credentials_path.clone());
        if let Err(e) = store.load() {
            warn!("Failed to load stored credentials: {}", e);
        }
        store.set_access_token(session.access_token.clone());
        store.set_refresh_token(session.refresh_token.clone());
        store.set_token_expires(session.expires_at);
        store.set_user_id(session.user.id.clone());
        store.set_user_email(session.user.email.clone());
        store.set_user_created(session.user.created_at);
        if let Err(e) = store.save() {
            warn!("Failed to persist session: {}", e);
        }
    }

    fn clear_session(&self) {
        let mut store = CredentialStore::new(self.credentials_path.clone());
        if let Err(e) = store.load() {
            warn!("Failed to load stored credentials: {}", e);
            return;
        }
        store.clear_session();
        if let Err(e) = store.save() {
            warn!("Failed to clear stored session: {}", e);
        }
    }
}

use std::sync::Arc;

use tokio::sync::watch;

use crate::errors::{AuthError, IdentityError, Result};
use crate::models::{NewUser, SessionStatus, User};
use crate::services::identity_service::IdentityStore;
use crate::services::storage_service::KeyValueStore;

pub const TOKEN_KEY: &str = "userToken";
pub const USER_KEY: &str = "userData";

/// Sign-in/sign-up/sign-out against the Identity Store plus restoration of a
/// prior session from durable storage. Status changes are published through a
/// watch channel so a UI shell can subscribe instead of polling.
pub struct SessionService {
    identity: Arc<dyn IdentityStore>,
    storage: Arc<dyn KeyValueStore>,
    status: watch::Sender<SessionStatus>,
}

impl SessionService {
    pub fn new(identity: Arc<dyn IdentityStore>, storage: Arc<dyn KeyValueStore>) -> Self {
        let (status, _) = watch::channel(SessionStatus::Bootstrapping);
        Self {
            identity,
            storage,
            status,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// Restore a persisted session, once, at process start. Until this
    /// completes the status is `Bootstrapping` and callers must wait rather
    /// than treat the session as signed out.
    pub async fn bootstrap(&self) {
        let token = match self.storage.get(TOKEN_KEY).await {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("Restoring token failed: {}", e);
                None
            }
        };
        let raw_user = match self.storage.get(USER_KEY).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Restoring user failed: {}", e);
                None
            }
        };

        // A token without a decodable user snapshot is treated as signed out;
        // a non-null token must always imply a user snapshot.
        let restored = match (token, raw_user) {
            (Some(_), Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::error!("Stored user snapshot is corrupt: {}", e);
                    None
                }
            },
            _ => None,
        };

        let status = match restored {
            Some(user) => SessionStatus::SignedIn(user),
            None => SessionStatus::SignedOut,
        };
        self.status.send_replace(status);
    }

    /// Sign in with an exact email + password filter. Zero matches yields one
    /// generic `InvalidCredentials`, identical whether the email is unknown
    /// or the password wrong.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let users = self
            .identity
            .find_by_credentials(email, password)
            .await
            .map_err(|e| {
                tracing::error!("Sign in error: {}", e);
                AuthError::IdentityUnavailable
            })?;

        // First match wins when the store returns several.
        let user = users
            .into_iter()
            .next()
            .ok_or(AuthError::InvalidCredentials)?;

        self.persist_session(&user).await;
        self.status.send_replace(SessionStatus::SignedIn(user.clone()));
        Ok(user)
    }

    /// Create an account and treat creation like a sign-in success.
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let existing = self.identity.find_by_email(email).await.map_err(|e| {
            tracing::error!("Sign up error: {}", e);
            AuthError::IdentityUnavailable
        })?;
        if !existing.is_empty() {
            return Err(AuthError::EmailTaken);
        }

        let new_user = NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: String::new(),
            profile_pic: format!("https://i.pravatar.cc/150?u={}", email),
        };

        let user = match self.identity.create_user(&new_user).await {
            Ok(user) => user,
            Err(IdentityError::Status { status, .. }) => {
                tracing::error!("Registration rejected with status {}", status);
                return Err(AuthError::RegistrationFailed);
            }
            Err(e) => {
                tracing::error!("Sign up error: {}", e);
                return Err(AuthError::IdentityUnavailable);
            }
        };

        self.persist_session(&user).await;
        self.status.send_replace(SessionStatus::SignedIn(user.clone()));
        Ok(user)
    }

    /// Clear the session. Storage removal is best-effort; failures are logged
    /// and the caller always observes a signed-out session.
    pub async fn sign_out(&self) {
        self.status.send_replace(SessionStatus::SignedOut);
        if let Err(e) = self.storage.remove(TOKEN_KEY).await {
            tracing::error!("Sign out error: {}", e);
        }
        if let Err(e) = self.storage.remove(USER_KEY).await {
            tracing::error!("Sign out error: {}", e);
        }
    }

    // Best-effort persistence of token + user snapshot; the in-memory session
    // is authoritative within this process.
    async fn persist_session(&self, user: &User) {
        if let Err(e) = self.storage.set(TOKEN_KEY, &user.id).await {
            tracing::error!("Failed to persist session token: {}", e);
        }
        match serde_json::to_string(user) {
            Ok(raw) => {
                if let Err(e) = self.storage.set(USER_KEY, &raw).await {
                    tracing::error!("Failed to persist user snapshot: {}", e);
                }
            }
            Err(e) => tracing::error!("Failed to encode user snapshot: {}", e),
        }
    }
}

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::errors::IdentityError;
use crate::models::{NewUser, User};

/// Client-side view of the remote user-record persistence service.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// All records matching the email exactly (zero or more).
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, IdentityError>;

    /// All records matching both email and password exactly — the sign-in
    /// filter. The caller must not distinguish "no such email" from "wrong
    /// password"; the store just returns zero matches for both.
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Vec<User>, IdentityError>;

    async fn create_user(&self, user: &NewUser) -> Result<User, IdentityError>;

    async fn update_password(
        &self,
        user_id: &str,
        new_password: &str,
    ) -> Result<(), IdentityError>;
}

/// REST implementation against the local json-server instance.
#[derive(Clone)]
pub struct RestIdentityService {
    base_url: String,
    client: Client,
}

impl RestIdentityService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    async fn failure(response: reqwest::Response) -> IdentityError {
        let status = response.status().as_u16();
        // Non-success bodies optionally carry {"message": "..."}.
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string));
        IdentityError::Status { status, message }
    }
}

#[async_trait]
impl IdentityStore for RestIdentityService {
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, IdentityError> {
        let users = self
            .client
            .get(self.users_url())
            .query(&[("email", email)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(users)
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Vec<User>, IdentityError> {
        let users = self
            .client
            .get(self.users_url())
            .query(&[("email", email), ("password", password)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(users)
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, IdentityError> {
        let response = self
            .client
            .post(self.users_url())
            .json(user)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        Ok(response.json().await?)
    }

    async fn update_password(
        &self,
        user_id: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        let response = self
            .client
            .patch(&url)
            .json(&json!({ "password": new_password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }

        Ok(())
    }
}

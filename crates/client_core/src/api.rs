use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{UserDraft, UserId, UserRecord},
    protocol::{UserPayload, USERS_COLLECTION},
};
use tracing::debug;
use url::Url;

use crate::error::ClientError;

/// The external users collection. Every call either fully succeeds or fails.
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ClientError>;
    async fn create_user(&self, draft: &UserDraft) -> Result<UserRecord, ClientError>;
    async fn update_user(&self, id: &UserId, draft: &UserDraft)
        -> Result<UserRecord, ClientError>;
    async fn delete_user(&self, id: &UserId) -> Result<(), ClientError>;
}

/// Gate in front of destructive actions.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

/// An answer collected before the call, e.g. from a dialog the UI already showed.
impl ConfirmPrompt for bool {
    fn confirm(&self, _message: &str) -> bool {
        *self
    }
}

pub struct HttpUsersApi {
    http: Client,
    base_url: Url,
}

impl HttpUsersApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|err| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "url cannot carry a path".to_string(),
            });
        }
        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn collection_url(&self) -> Url {
        self.endpoint(&[USERS_COLLECTION])
    }

    fn member_url(&self, id: &UserId) -> Url {
        self.endpoint(&[USERS_COLLECTION, id.as_str()])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ClientError> {
        let url = self.collection_url();
        debug!(%url, "fetching users");
        let users = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(users)
    }

    async fn create_user(&self, draft: &UserDraft) -> Result<UserRecord, ClientError> {
        let url = self.collection_url();
        debug!(%url, "creating user");
        let created = self
            .http
            .post(url)
            .json(&UserPayload::from(draft))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(created)
    }

    async fn update_user(
        &self,
        id: &UserId,
        draft: &UserDraft,
    ) -> Result<UserRecord, ClientError> {
        let url = self.member_url(id);
        debug!(%url, user_id = %id, "updating user");
        let updated = self
            .http
            .patch(url)
            .json(&UserPayload::from(draft))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(updated)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), ClientError> {
        let url = self.member_url(id);
        debug!(%url, user_id = %id, "deleting user");
        self.http.delete(url).send().await?.error_for_status()?;
        Ok(())
    }
}

//! Outbound collaborators: the identity provider that owns accounts and the
//! profile store that owns `profiles` rows. Handlers only see these traits,
//! so tests swap in in-memory doubles.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Account, AccountInvite, CallerIdentity, NewAccount, Profile, ProvisionedAccount};

pub mod identity;
pub mod profiles;

pub use identity::SupabaseAuthClient;
pub use profiles::PgProfileStore;

/// Failure reported by a provider. The message is surfaced to clients as-is.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
    status: Option<u16>,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Upstream HTTP status, when the failure came from an HTTP response
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
        }
    }
}

impl From<sqlx::Error> for ProviderError {
    fn from(err: sqlx::Error) -> Self {
        ProviderError::new(err.to_string())
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer credential. `Ok(None)` means the credential was rejected.
    async fn get_user(&self, access_token: &str) -> Result<Option<CallerIdentity>, ProviderError>;

    /// Every account, in the provider's listing order
    async fn list_users(&self) -> Result<Vec<Account>, ProviderError>;

    async fn create_user(&self, account: NewAccount) -> Result<ProvisionedAccount, ProviderError>;

    async fn invite_user_by_email(&self, invite: AccountInvite) -> Result<ProvisionedAccount, ProviderError>;

    async fn delete_user(&self, id: Uuid) -> Result<(), ProviderError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, ProviderError>;

    /// Profiles whose id is in `ids`, newest `created_at` first
    async fn list_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Profile>, ProviderError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<(), ProviderError>;

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Account record as held by the identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub invited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_metadata: Value,
}

/// Identity behind a bearer credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Metadata attached to a provisioned account; the profile trigger reads it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMetadata {
    pub name: String,
    pub role: String,
    pub user_level: i32,
}

/// Direct account creation with a known password
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub metadata: AccountMetadata,
}

/// Email invitation; the account becomes usable once the link is followed
#[derive(Debug, Clone, PartialEq)]
pub struct AccountInvite {
    pub email: String,
    pub redirect_to: Option<String>,
    pub metadata: AccountMetadata,
}

/// Provider result for create and invite calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionedAccount {
    pub user: Account,
}

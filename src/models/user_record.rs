use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use super::{Account, Profile};

/// Account joined with its profile row, as returned by the list operation.
///
/// `email`, `last_sign_in_at` and `email_confirmed_at` always come from the
/// account. Profile columns are omitted when the account has no profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedUserRecord {
    pub id: Uuid,
    pub email: Option<String>,
    pub last_sign_in_at: Option<DateTime<Utc>>,
    pub email_confirmed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl MergedUserRecord {
    fn from_parts(account: Account, profile: Option<&Profile>) -> Self {
        Self {
            id: account.id,
            email: account.email,
            last_sign_in_at: account.last_sign_in_at,
            email_confirmed_at: account.email_confirmed_at,
            name: profile.and_then(|p| p.name.clone()),
            role: profile.and_then(|p| p.role.clone()),
            user_level: profile.and_then(|p| p.user_level),
            created_at: profile.and_then(|p| p.created_at),
        }
    }
}

/// Join accounts with profiles by id. Output follows account order.
pub fn merge_users(accounts: Vec<Account>, profiles: &[Profile]) -> Vec<MergedUserRecord> {
    let by_id: HashMap<Uuid, &Profile> = profiles.iter().map(|p| (p.id, p)).collect();

    accounts
        .into_iter()
        .map(|account| {
            let profile = by_id.get(&account.id).copied();
            MergedUserRecord::from_parts(account, profile)
        })
        .collect()
}

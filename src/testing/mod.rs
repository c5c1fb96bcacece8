//! In-memory identity provider and profile store that record every call.

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::config::{AppConfig, Environment, SupabaseConfig};
use crate::models::{Account, AccountInvite, CallerIdentity, NewAccount, Profile, ProvisionedAccount};
use crate::providers::{IdentityProvider, ProfileStore, ProviderError};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq)]
pub enum IdentityCall {
    GetUser(String),
    ListUsers,
    CreateUser(NewAccount),
    InviteUser(AccountInvite),
    DeleteUser(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCall {
    FindById(Uuid),
    ListByIds(Vec<Uuid>),
    DeleteById(Uuid),
}

#[derive(Default)]
struct IdentityState {
    sessions: HashMap<String, CallerIdentity>,
    accounts: Vec<Account>,
    failures: HashMap<&'static str, String>,
    calls: Vec<IdentityCall>,
}

#[derive(Default)]
pub struct FakeIdentityProvider {
    state: Mutex<IdentityState>,
}

impl FakeIdentityProvider {
    fn lock(&self) -> MutexGuard<'_, IdentityState> {
        self.state.lock().unwrap()
    }

    /// Register an account reachable through `token`
    pub fn add_session(&self, token: &str, email: &str) -> Uuid {
        let id = self.add_account(email);
        self.lock().sessions.insert(
            token.to_string(),
            CallerIdentity {
                id,
                email: Some(email.to_string()),
            },
        );
        id
    }

    pub fn add_account(&self, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.lock().accounts.push(account(id, email));
        id
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.lock().accounts.clone()
    }

    pub fn has_account(&self, id: Uuid) -> bool {
        self.lock().accounts.iter().any(|a| a.id == id)
    }

    pub fn calls(&self) -> Vec<IdentityCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn fail_get_user(&self, message: &str) {
        self.lock().failures.insert("get_user", message.to_string());
    }

    pub fn fail_list(&self, message: &str) {
        self.lock().failures.insert("list_users", message.to_string());
    }

    pub fn fail_create(&self, message: &str) {
        self.lock().failures.insert("create_user", message.to_string());
    }

    pub fn fail_invite(&self, message: &str) {
        self.lock().failures.insert("invite_user", message.to_string());
    }

    pub fn fail_delete(&self, message: &str) {
        self.lock().failures.insert("delete_user", message.to_string());
    }

    fn record(&self, call: IdentityCall, operation: &'static str) -> Result<(), ProviderError> {
        let mut state = self.lock();
        state.calls.push(call);
        match state.failures.get(operation) {
            Some(message) => Err(ProviderError::with_status(422, message.clone())),
            None => Ok(()),
        }
    }
}

fn account(id: Uuid, email: &str) -> Account {
    Account {
        id,
        email: Some(email.to_string()),
        created_at: Some(Utc::now()),
        email_confirmed_at: None,
        last_sign_in_at: None,
        invited_at: None,
        user_metadata: json!({}),
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn get_user(&self, access_token: &str) -> Result<Option<CallerIdentity>, ProviderError> {
        self.record(IdentityCall::GetUser(access_token.to_string()), "get_user")?;
        Ok(self.lock().sessions.get(access_token).cloned())
    }

    async fn list_users(&self) -> Result<Vec<Account>, ProviderError> {
        self.record(IdentityCall::ListUsers, "list_users")?;
        Ok(self.accounts())
    }

    async fn create_user(&self, new_account: NewAccount) -> Result<ProvisionedAccount, ProviderError> {
        self.record(IdentityCall::CreateUser(new_account.clone()), "create_user")?;
        let mut user = account(Uuid::new_v4(), &new_account.email);
        user.email_confirmed_at = Some(Utc::now());
        user.user_metadata = json!(new_account.metadata);
        self.lock().accounts.push(user.clone());
        Ok(ProvisionedAccount { user })
    }

    async fn invite_user_by_email(&self, invite: AccountInvite) -> Result<ProvisionedAccount, ProviderError> {
        self.record(IdentityCall::InviteUser(invite.clone()), "invite_user")?;
        let mut user = account(Uuid::new_v4(), &invite.email);
        user.invited_at = Some(Utc::now());
        user.user_metadata = json!(invite.metadata);
        self.lock().accounts.push(user.clone());
        Ok(ProvisionedAccount { user })
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), ProviderError> {
        self.record(IdentityCall::DeleteUser(id), "delete_user")?;
        let mut state = self.lock();
        let before = state.accounts.len();
        state.accounts.retain(|a| a.id != id);
        if state.accounts.len() == before {
            return Err(ProviderError::with_status(404, "User not found"));
        }
        Ok(())
    }
}

#[derive(Default)]
struct ProfileState {
    profiles: Vec<Profile>,
    failures: HashMap<&'static str, String>,
    calls: Vec<ProfileCall>,
    inserted: i64,
}

#[derive(Default)]
pub struct FakeProfileStore {
    state: Mutex<ProfileState>,
}

impl FakeProfileStore {
    fn lock(&self) -> MutexGuard<'_, ProfileState> {
        self.state.lock().unwrap()
    }

    /// Insert or replace the profile for `id`; later inserts get later `created_at`
    pub fn insert_level(&self, id: Uuid, level: i32) {
        let mut state = self.lock();
        state.inserted += 1;
        let n = state.inserted;
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(n);
        state.profiles.retain(|p| p.id != id);
        state.profiles.push(Profile {
            id,
            name: Some(format!("member-{}", n)),
            role: Some("guitar".to_string()),
            user_level: Some(level),
            created_at: Some(created_at),
        });
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.lock().profiles.iter().any(|p| p.id == id)
    }

    pub fn calls(&self) -> Vec<ProfileCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn fail_find(&self, message: &str) {
        self.lock().failures.insert("find_by_id", message.to_string());
    }

    pub fn fail_list(&self, message: &str) {
        self.lock().failures.insert("list_by_ids", message.to_string());
    }

    pub fn fail_delete(&self, message: &str) {
        self.lock().failures.insert("delete_by_id", message.to_string());
    }

    fn record(&self, call: ProfileCall, operation: &'static str) -> Result<(), ProviderError> {
        let mut state = self.lock();
        state.calls.push(call);
        match state.failures.get(operation) {
            Some(message) => Err(ProviderError::new(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProfileStore for FakeProfileStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, ProviderError> {
        self.record(ProfileCall::FindById(id), "find_by_id")?;
        Ok(self.lock().profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn list_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Profile>, ProviderError> {
        self.record(ProfileCall::ListByIds(ids.to_vec()), "list_by_ids")?;
        let mut found: Vec<Profile> = self
            .lock()
            .profiles
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), ProviderError> {
        self.record(ProfileCall::DeleteById(id), "delete_by_id")?;
        self.lock().profiles.retain(|p| p.id != id);
        Ok(())
    }
}

pub fn test_config() -> AppConfig {
    AppConfig::preset(
        Environment::Development,
        SupabaseConfig {
            url: "http://127.0.0.1:54321".to_string(),
            anon_key: "anon-key".to_string(),
            service_role_key: "service-role-key".to_string(),
            jwt_secret: None,
        },
        "postgres://postgres@127.0.0.1:5432/postgres".to_string(),
    )
}

pub fn test_state(identity: Arc<FakeIdentityProvider>, profiles: Arc<FakeProfileStore>) -> AppState {
    AppState::new(test_config(), identity, profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reinserting_a_profile_replaces_it_with_a_later_timestamp() {
        let store = FakeProfileStore::default();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        store.insert_level(first, 1);
        store.insert_level(second, 2);
        store.insert_level(first, 3);

        let profiles = store.list_by_ids(&[first, second]).await.unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].id, first);
        assert_eq!(profiles[0].user_level, Some(3));
        assert_eq!(profiles[0].name.as_deref(), Some("member-3"));
        assert_eq!(profiles[1].name.as_deref(), Some("member-2"));
    }
}

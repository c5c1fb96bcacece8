use serde::Deserialize;
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

use crate::auth::PrivilegeGate;
use crate::config::InviteConfig;
use crate::error::ApiError;
use crate::models::{
    merge_users, AccountInvite, AccountMetadata, MergedUserRecord, NewAccount, ProvisionedAccount, UserLevel,
};
use crate::providers::{IdentityProvider, ProfileStore};

#[derive(Debug, Default, Deserialize)]
pub struct InviteRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub user_level: Option<i32>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// The three privileged user operations. Only the presence of the required
/// field is checked before the privilege gate; every other check and all
/// provider calls happen after it.
pub struct UserAdminService {
    gate: PrivilegeGate,
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
    invite: InviteConfig,
}

impl UserAdminService {
    pub fn new(identity: Arc<dyn IdentityProvider>, profiles: Arc<dyn ProfileStore>, invite: InviteConfig) -> Self {
        Self {
            gate: PrivilegeGate::new(identity.clone(), profiles.clone()),
            identity,
            profiles,
            invite,
        }
    }

    pub async fn list_users(&self, bearer: Option<&str>) -> Result<Vec<MergedUserRecord>, ApiError> {
        let caller = self.gate.authorize(bearer).await?;

        let accounts = self.identity.list_users().await?;
        let profiles = if accounts.is_empty() {
            Vec::new()
        } else {
            let ids: Vec<Uuid> = accounts.iter().map(|a| a.id).collect();
            self.profiles.list_by_ids(&ids).await?
        };

        tracing::info!(
            "Admin {} listed {} accounts ({} profiles)",
            caller.account_id,
            accounts.len(),
            profiles.len()
        );

        Ok(merge_users(accounts, &profiles))
    }

    pub async fn invite_or_create(
        &self,
        bearer: Option<&str>,
        request: InviteRequest,
        origin: Option<&str>,
    ) -> Result<ProvisionedAccount, ApiError> {
        let email = non_blank(request.email.as_deref())
            .ok_or_else(|| ApiError::validation_error("Email is required"))?
            .to_string();

        let caller = self.gate.authorize(bearer).await?;

        let user_level = match request.user_level {
            Some(level) => UserLevel::from_level(level)
                .ok_or_else(|| ApiError::validation_error("user_level must be 1, 2 or 3"))?,
            None => UserLevel::Standard,
        };

        let metadata = AccountMetadata {
            name: non_blank(request.name.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| default_name(&email).to_string()),
            role: request.role.unwrap_or_default(),
            user_level: user_level.as_level(),
        };

        let provisioned = match request.password.filter(|p| !p.is_empty()) {
            Some(password) => {
                tracing::info!("Admin {} creating account for {}", caller.account_id, email);
                self.identity
                    .create_user(NewAccount {
                        email,
                        password,
                        metadata,
                    })
                    .await?
            }
            None => {
                let redirect_to = invite_redirect(origin, &self.invite);
                tracing::info!(
                    "Admin {} inviting {} (redirect: {:?})",
                    caller.account_id,
                    email,
                    redirect_to
                );
                self.identity
                    .invite_user_by_email(AccountInvite {
                        email,
                        redirect_to,
                        metadata,
                    })
                    .await?
            }
        };

        Ok(provisioned)
    }

    pub async fn delete_user(&self, bearer: Option<&str>, request: DeleteRequest) -> Result<Uuid, ApiError> {
        let raw_id = non_blank(request.user_id.as_deref())
            .ok_or_else(|| ApiError::validation_error("User ID is required"))?;

        let caller = self.gate.authorize(bearer).await?;

        let user_id = Uuid::parse_str(raw_id).map_err(|_| ApiError::validation_error("Invalid user ID"))?;

        self.identity.delete_user(user_id).await?;
        tracing::info!("Admin {} deleted account {}", caller.account_id, user_id);

        // Profile cleanup failure does not fail the request
        if let Err(e) = self.profiles.delete_by_id(user_id).await {
            tracing::warn!("Account {} deleted but profile cleanup failed: {}", user_id, e);
        }

        Ok(user_id)
    }

    pub fn profiles(&self) -> &Arc<dyn ProfileStore> {
        &self.profiles
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Local part of an email address
fn default_name(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Completion link for an invitation: request origin first, configured site second
fn invite_redirect(origin: Option<&str>, config: &InviteConfig) -> Option<String> {
    let base = origin
        .and_then(|o| match Url::parse(o) {
            Ok(url) => Some(url),
            Err(_) => {
                tracing::warn!("Ignoring unparseable Origin '{}' for invite redirect", o);
                None
            }
        })
        .or_else(|| config.site_url.as_deref().and_then(|s| Url::parse(s).ok()))?;

    base.join(&config.redirect_path).ok().map(String::from)
}

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use super::{IdentityProvider, ProviderError};
use crate::auth::verify_access_token;
use crate::config::{ApiConfig, SupabaseConfig};
use crate::models::{Account, AccountInvite, CallerIdentity, NewAccount, ProvisionedAccount};

/// Client for the platform's auth REST API (`/auth/v1`).
///
/// Admin endpoints are called with the service-role key; caller resolution
/// uses the anon key plus the caller's own token.
#[derive(Clone)]
pub struct SupabaseAuthClient {
    http: reqwest::Client,
    base_url: Url,
    anon_key: String,
    service_role_key: String,
    jwt_secret: Option<String>,
    page_size: u32,
}

#[derive(Debug, Deserialize)]
struct UserIdentity {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserPage {
    #[serde(default)]
    users: Vec<Account>,
}

impl SupabaseAuthClient {
    pub fn new(supabase: &SupabaseConfig, api: &ApiConfig) -> Result<Self, ProviderError> {
        let root = format!("{}/auth/v1/", supabase.url.trim_end_matches('/'));
        let base_url = Url::parse(&root).map_err(|e| ProviderError::new(format!("Invalid SUPABASE_URL: {}", e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            anon_key: supabase.anon_key.clone(),
            service_role_key: supabase.service_role_key.clone(),
            jwt_secret: supabase.jwt_secret.clone(),
            page_size: api.list_page_size.max(1),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(path)
            .map_err(|e| ProviderError::new(format!("Invalid auth endpoint '{}': {}", path, e)))
    }

    fn admin(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl IdentityProvider for SupabaseAuthClient {
    async fn get_user(&self, access_token: &str) -> Result<Option<CallerIdentity>, ProviderError> {
        if let Some(secret) = &self.jwt_secret {
            return match verify_access_token(access_token, secret) {
                Ok(identity) => Ok(Some(identity)),
                Err(e) => {
                    tracing::debug!("Local token verification failed: {}", e);
                    Ok(None)
                }
            };
        }

        let response = self
            .http
            .get(self.endpoint("user")?)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => {
                let user: UserIdentity = Self::read_json(response).await?;
                Ok(Some(CallerIdentity {
                    id: user.id,
                    email: user.email,
                }))
            }
        }
    }

    async fn list_users(&self) -> Result<Vec<Account>, ProviderError> {
        let mut accounts = Vec::new();
        let mut page: u32 = 1;

        loop {
            let mut url = self.endpoint("admin/users")?;
            url.query_pairs_mut()
                .append_pair("page", &page.to_string())
                .append_pair("per_page", &self.page_size.to_string());

            let response = self.admin(self.http.get(url)).send().await?;
            let batch: UserPage = Self::read_json(response).await?;
            let fetched = batch.users.len();
            accounts.extend(batch.users);

            if fetched < self.page_size as usize {
                break;
            }
            page += 1;
        }

        tracing::debug!("Fetched {} accounts over {} page(s)", accounts.len(), page);
        Ok(accounts)
    }

    async fn create_user(&self, account: NewAccount) -> Result<ProvisionedAccount, ProviderError> {
        let body = json!({
            "email": account.email,
            "password": account.password,
            "email_confirm": true,
            "user_metadata": account.metadata,
        });

        let response = self
            .admin(self.http.post(self.endpoint("admin/users")?))
            .json(&body)
            .send()
            .await?;
        let user: Account = Self::read_json(response).await?;

        Ok(ProvisionedAccount { user })
    }

    async fn invite_user_by_email(&self, invite: AccountInvite) -> Result<ProvisionedAccount, ProviderError> {
        let mut url = self.endpoint("invite")?;
        if let Some(redirect_to) = &invite.redirect_to {
            url.query_pairs_mut().append_pair("redirect_to", redirect_to);
        }
        let body = json!({
            "email": invite.email,
            "data": invite.metadata,
        });

        let response = self.admin(self.http.post(url)).json(&body).send().await?;
        let user: Account = Self::read_json(response).await?;

        Ok(ProvisionedAccount { user })
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), ProviderError> {
        let url = self.endpoint(&format!("admin/users/{}", id))?;
        let response = self.admin(self.http.delete(url)).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }
}

async fn error_from_response(response: Response) -> ProviderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ProviderError::with_status(status.as_u16(), provider_message(status, &body))
}

/// Pull the human-readable message out of an auth API error body
fn provider_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["msg", "message", "error_description", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
    });

    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => status.to_string(),
        None => body.trim().to_string(),
    }
}

use serde::Serialize;
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid URL in {key}: {reason}")]
    InvalidUrl { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub supabase: SupabaseConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub invite: InviteConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Connection parameters for the hosted auth platform
#[derive(Debug, Clone, Serialize)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    #[serde(skip_serializing)]
    pub service_role_key: String,
    /// When set, access tokens are verified locally instead of via `/auth/v1/user`
    #[serde(skip_serializing)]
    pub jwt_secret: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseConfig {
    #[serde(skip_serializing)]
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub port: u16,
    pub request_timeout_secs: u64,
    /// Page size used when walking the provider's account listing
    pub list_page_size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct InviteConfig {
    /// Fallback origin for invitation links when the request carries no Origin header
    pub site_url: Option<String>,
    pub redirect_path: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let supabase = SupabaseConfig {
            url: required("SUPABASE_URL")?,
            anon_key: required("SUPABASE_ANON_KEY")?,
            service_role_key: required("SUPABASE_SERVICE_ROLE_KEY")?,
            jwt_secret: optional("SUPABASE_JWT_SECRET"),
        };
        let database_url = required("DATABASE_URL")?;

        let config = Self::preset(environment, supabase, database_url).with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Environment defaults; connection secrets are always supplied by the caller
    pub fn preset(environment: Environment, supabase: SupabaseConfig, database_url: String) -> Self {
        let (max_connections, connection_timeout, request_timeout_secs) = match environment {
            Environment::Development => (5, 30, 30),
            Environment::Staging => (10, 10, 15),
            Environment::Production => (20, 5, 10),
        };

        Self {
            environment,
            supabase,
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                connection_timeout,
            },
            api: ApiConfig {
                port: 3000,
                request_timeout_secs,
                list_page_size: 50,
            },
            invite: InviteConfig {
                site_url: None,
                redirect_path: "/complete-signup".to_string(),
            },
        }
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Some(v) = env::var("API_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }
        if let Ok(v) = env::var("API_LIST_PAGE_SIZE") {
            self.api.list_page_size = v.parse().unwrap_or(self.api.list_page_size).max(1);
        }

        // Invite overrides
        if let Some(v) = optional("SITE_URL") {
            self.invite.site_url = Some(v);
        }
        if let Some(v) = optional("INVITE_REDIRECT_PATH") {
            self.invite.redirect_path = v;
        }

        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.supabase.url).map_err(|e| ConfigError::InvalidUrl {
            key: "SUPABASE_URL",
            reason: e.to_string(),
        })?;
        if let Some(site_url) = &self.invite.site_url {
            url::Url::parse(site_url).map_err(|e| ConfigError::InvalidUrl {
                key: "SITE_URL",
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::Missing(key))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

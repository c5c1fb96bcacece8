use std::sync::Arc;

use crate::config::AppConfig;
use crate::providers::{IdentityProvider, PgProfileStore, ProfileStore, ProviderError, SupabaseAuthClient};
use crate::services::UserAdminService;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub admin: Arc<UserAdminService>,
}

impl AppState {
    pub fn new(config: AppConfig, identity: Arc<dyn IdentityProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        let admin = UserAdminService::new(identity, profiles, config.invite.clone());
        Self {
            config: Arc::new(config),
            admin: Arc::new(admin),
        }
    }

    /// Wire the production providers from configuration
    pub fn from_config(config: AppConfig) -> Result<Self, ProviderError> {
        let identity = SupabaseAuthClient::new(&config.supabase, &config.api)?;
        let profiles = PgProfileStore::connect_lazy(&config.database)?;
        Ok(Self::new(config, Arc::new(identity), Arc::new(profiles)))
    }
}

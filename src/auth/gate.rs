use std::sync::Arc;

use super::{AuthFailure, CallerContext};
use crate::models::UserLevel;
use crate::providers::{IdentityProvider, ProfileStore};

/// Admits a request only when its bearer credential belongs to a tier-3 profile.
///
/// Every call resolves the caller from scratch, so promotions and demotions
/// take effect on the very next request.
#[derive(Clone)]
pub struct PrivilegeGate {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
}

impl PrivilegeGate {
    pub fn new(identity: Arc<dyn IdentityProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { identity, profiles }
    }

    pub async fn authorize(&self, bearer: Option<&str>) -> Result<CallerContext, AuthFailure> {
        let token = bearer.ok_or(AuthFailure::MissingCredential)?;

        let identity = match self.identity.get_user(token).await {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                tracing::warn!("Rejected bearer credential");
                return Err(AuthFailure::InvalidCredential);
            }
            Err(e) => {
                tracing::warn!("Failed to resolve bearer credential: {}", e);
                return Err(AuthFailure::InvalidCredential);
            }
        };

        let profile = match self.profiles.find_by_id(identity.id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Profile lookup failed for {}: {}", identity.id, e);
                return Err(AuthFailure::NotAdmin);
            }
        };

        match profile {
            Some(profile) if profile.is_admin() => {
                tracing::debug!("Admin access granted to {}", identity.id);
                Ok(CallerContext {
                    account_id: identity.id,
                    email: identity.email,
                    user_level: UserLevel::Administrator,
                })
            }
            Some(profile) => {
                tracing::warn!(
                    "Admin access denied to {}: user_level {:?}",
                    identity.id,
                    profile.user_level
                );
                Err(AuthFailure::NotAdmin)
            }
            None => {
                tracing::warn!("Admin access denied to {}: no profile row", identity.id);
                Err(AuthFailure::NotAdmin)
            }
        }
    }
}

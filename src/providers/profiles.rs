use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use super::{ProfileStore, ProviderError};
use crate::config::DatabaseConfig;
use crate::models::Profile;

/// Profile store backed by the platform's Postgres `profiles` table
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the pool without connecting; the first query opens a connection.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, ProviderError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy(&config.url)?;

        info!("Configured profile store pool (max {} connections)", config.max_connections);
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, ProviderError> {
        let query = r#"
            SELECT id, name, role, user_level, created_at
            FROM profiles
            WHERE id = $1
        "#;

        let profile = sqlx::query_as::<_, Profile>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    async fn list_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Profile>, ProviderError> {
        let query = r#"
            SELECT id, name, role, user_level, created_at
            FROM profiles
            WHERE id = ANY($1)
            ORDER BY created_at DESC
        "#;

        let profiles = sqlx::query_as::<_, Profile>(query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(profiles)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), ProviderError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Deleted {} profile row(s) for {}", result.rows_affected(), id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

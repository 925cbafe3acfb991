//! The `game_config` table backing `ConfigManager`.

use crate::config::ConfigStore;
use crate::error::RpgResult;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use std::collections::HashMap;

pub struct PgConfigStore {
    pool: PgPool,
}

impl PgConfigStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfigStore for PgConfigStore {
    async fn load_all(&self) -> RpgResult<HashMap<String, Value>> {
        let rows: Vec<(String, Value)> = sqlx::query_as("SELECT key, value FROM game_config")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().collect())
    }

    async fn save(&self, key: &str, value: &Value) -> RpgResult<()> {
        sqlx::query(
            "INSERT INTO game_config (key, value, updated_at) VALUES ($1, $2, NOW()) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

//! This module defines the shared data structures used throughout the application.
//! These structs are used as `TypeMapKey`s to store shared state in Serenity's global context.

use crate::config::ConfigManager;
use crate::database::Database;
use crate::database::health::HealthMonitor;
use crate::database::leaderboard::LeaderboardType;
use crate::database::models::LeaderboardEntry;
use crate::events::EventBus;
use crate::services::lock::ActionLock;
use crate::settings::Settings;
use serenity::gateway::ShardManager;
use serenity::prelude::TypeMapKey;
use std::sync::Arc;
use std::{collections::HashMap, time::Instant};
use tokio::sync::RwLock;

pub type LeaderboardCache = HashMap<LeaderboardType, (Instant, Vec<LeaderboardEntry>)>;

/// A container for the ShardManager, allowing it to be stored in the global context.
/// This provides access to shard-specific information, like gateway latency.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// The central, shared state of the application.
/// An `Arc<AppState>` is stored in the global context for easy and safe access
/// from any command or event handler.
pub struct AppState {
    pub db: Database,
    /// Live game-balance values backed by the `game_config` table.
    pub config: Arc<ConfigManager>,
    pub events: Arc<EventBus>,
    pub health: Arc<HealthMonitor>,
    /// Per-user click locks for buttons.
    pub locks: Arc<dyn ActionLock>,
    pub settings: Arc<Settings>,
    /// The current command prefix, which can be changed at runtime by administrators.
    pub prefix: Arc<RwLock<String>>,
    pub leaderboard_cache: Arc<RwLock<LeaderboardCache>>,
}

impl AppState {
    pub async fn from_ctx(ctx: &serenity::prelude::Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }

    pub fn is_admin(&self, user_id: serenity::model::id::UserId) -> bool {
        self.settings.is_admin(user_id.get())
    }

    /// Drops cached leaderboards after rankings may have moved.
    pub async fn invalidate_leaderboards(&self) {
        self.leaderboard_cache.write().await.clear();
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}

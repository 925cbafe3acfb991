use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context as _;
use lumen_rpg::config::ConfigManager;
use lumen_rpg::database::Database;
use lumen_rpg::database::game_config::PgConfigStore;
use lumen_rpg::database::health::{HealthMonitor, HealthThresholds};
use lumen_rpg::events::{EventBus, listeners};
use lumen_rpg::handler::Handler;
use lumen_rpg::model::ShardManagerContainer;
use lumen_rpg::services::lock::{ActionLock, MemoryLock, RedisLock};
use lumen_rpg::settings::{DEFAULT_LOG_FILTER, Settings};
use lumen_rpg::AppState;
use serenity::model::gateway::GatewayIntents;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

async fn build_locks(settings: &Settings) -> Arc<dyn ActionLock> {
    match &settings.redis_url {
        Some(url) => match RedisLock::connect(url).await {
            Ok(lock) => {
                info!(target = "startup", "click locks backed by redis");
                Arc::new(lock)
            }
            Err(e) => {
                warn!(target = "startup", error = %e, "redis unavailable; using in-memory click locks");
                Arc::new(MemoryLock::new())
            }
        },
        None => Arc::new(MemoryLock::new()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine in containers where the environment is injected.
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let settings = Arc::new(Settings::from_env().context("reading settings")?);
    let db = Database::connect(&settings)
        .await
        .context("connecting to the database")?;

    let events = Arc::new(EventBus::new());
    listeners::register_defaults(&events).await;

    let config = Arc::new(ConfigManager::new(
        Arc::new(PgConfigStore::new(db.pool().clone())),
        settings.config_refresh,
    ));
    match config.refresh().await {
        Ok(keys) => info!(target = "startup", keys, "game config loaded"),
        Err(e) => warn!(target = "startup", error = %e, "game config unavailable; using defaults"),
    }
    config.clone().spawn_refresh(settings.config_refresh);

    let health = Arc::new(HealthMonitor::new(
        HealthThresholds::default(),
        Some(events.clone()),
    ));
    health
        .clone()
        .spawn(db.pool().clone(), settings.health_check_interval);

    let locks = build_locks(&settings).await;

    let app_state = Arc::new(AppState {
        db,
        config,
        events,
        health,
        locks,
        prefix: Arc::new(RwLock::new(settings.command_prefix.clone())),
        leaderboard_cache: Arc::new(RwLock::new(HashMap::new())),
        settings: settings.clone(),
    });

    // In Serenity v0.12, interactions are received by default with GUILDS.
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&settings.discord_token, intents)
        .event_handler(Handler {
            guild_id: settings.guild_id.map(GuildId::new),
        })
        .await
        .context("creating the Discord client")?;

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(client.shard_manager.clone());
        data.insert::<AppState>(app_state);
    }

    if let Err(why) = client.start().await {
        error!(target = "startup", error = ?why, "client error");
        return Err(why.into());
    }
    Ok(())
}

//! Process-level settings read from the environment (`.env` is loaded in `main`).
//! Game balance does not live here; see `config::ConfigManager`.

use crate::error::{RpgError, RpgResult};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,lumen_rpg=debug";

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub database_url: String,
    /// When set, commands are registered to this guild only (instant updates while developing).
    pub guild_id: Option<u64>,
    pub redis_url: Option<String>,
    pub command_prefix: String,
    pub db_max_connections: u32,
    pub config_refresh: Duration,
    pub health_check_interval: Duration,
    pub admin_ids: Vec<u64>,
}

impl Settings {
    pub fn from_env() -> RpgResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> RpgResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| RpgError::Config(format!("missing environment variable {key}")))
        };

        Ok(Self {
            discord_token: required("DISCORD_TOKEN")?,
            database_url: required("DATABASE_URL")?,
            guild_id: get("GUILD_ID").map(|v| parse("GUILD_ID", &v)).transpose()?,
            redis_url: get("REDIS_URL"),
            command_prefix: get("COMMAND_PREFIX").unwrap_or_else(|| "!".to_string()),
            db_max_connections: get("DB_MAX_CONNECTIONS")
                .map(|v| parse("DB_MAX_CONNECTIONS", &v))
                .transpose()?
                .unwrap_or(10),
            config_refresh: Duration::from_secs(
                get("CONFIG_REFRESH_SECS")
                    .map(|v| parse("CONFIG_REFRESH_SECS", &v))
                    .transpose()?
                    .unwrap_or(300),
            ),
            health_check_interval: Duration::from_secs(
                get("HEALTH_CHECK_SECS")
                    .map(|v| parse("HEALTH_CHECK_SECS", &v))
                    .transpose()?
                    .unwrap_or(30),
            ),
            admin_ids: get("ADMIN_IDS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(|s| parse("ADMIN_IDS", s))
                        .collect::<RpgResult<Vec<u64>>>()
                })
                .transpose()?
                .unwrap_or_default(),
        })
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> RpgResult<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| RpgError::Config(format!("{key} has an invalid value: {value}")))
}

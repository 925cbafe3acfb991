//! Contains all database functions related to player rows.
//! Mutations lock the row with `FOR UPDATE` and write the whole row back.

use super::models::Player;
use crate::config::sections::ResourceRules;
use crate::error::{RpgError, RpgResult};
use sqlx::{Postgres, Transaction};

const PLAYER_COLUMNS: &str = "discord_id, username, level, experience, rikis, grace, gems, \
    energy, max_energy, stamina, max_stamina, energy_updated, stamina_updated, total_power, \
    pity_counter, total_summons, fusion_shards, daily_streak, last_daily, created_at";

fn not_registered() -> RpgError {
    RpgError::not_found("your profile. Use `/start` to begin your journey")
}

/// Fetches and row-locks a player inside a transaction.
pub async fn lock_player(
    tx: &mut Transaction<'_, Postgres>,
    discord_id: i64,
) -> RpgResult<Player> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE discord_id = $1 FOR UPDATE");
    sqlx::query_as::<_, Player>(&sql)
        .bind(discord_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(not_registered)
}

/// Read inside an existing (possibly read-only) transaction without locking.
pub async fn get_player(tx: &mut Transaction<'_, Postgres>, discord_id: i64) -> RpgResult<Player> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE discord_id = $1");
    sqlx::query_as::<_, Player>(&sql)
        .bind(discord_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(not_registered)
}

/// Inserts a new player. Returns `None` if the player already exists.
pub async fn create_player(
    tx: &mut Transaction<'_, Postgres>,
    discord_id: i64,
    username: &str,
    rules: &ResourceRules,
) -> RpgResult<Option<Player>> {
    let sql = format!(
        "INSERT INTO players (discord_id, username, rikis, grace, gems, energy, max_energy, stamina, max_stamina) \
         VALUES ($1, $2, $3, $4, $5, $6, $6, $7, $7) \
         ON CONFLICT (discord_id) DO NOTHING RETURNING {PLAYER_COLUMNS}"
    );
    Ok(sqlx::query_as::<_, Player>(&sql)
        .bind(discord_id)
        .bind(username)
        .bind(rules.starting_rikis)
        .bind(rules.starting_grace)
        .bind(rules.starting_gems)
        .bind(rules.starting_energy)
        .bind(rules.starting_stamina)
        .fetch_optional(&mut **tx)
        .await?)
}

/// Writes every mutable column of a locked player back.
pub async fn save_player(tx: &mut Transaction<'_, Postgres>, p: &Player) -> RpgResult<()> {
    sqlx::query(
        "UPDATE players SET username = $2, level = $3, experience = $4, rikis = $5, grace = $6, \
         gems = $7, energy = $8, max_energy = $9, stamina = $10, max_stamina = $11, \
         energy_updated = $12, stamina_updated = $13, total_power = $14, pity_counter = $15, \
         total_summons = $16, fusion_shards = $17, daily_streak = $18, last_daily = $19 \
         WHERE discord_id = $1",
    )
    .bind(p.discord_id)
    .bind(&p.username)
    .bind(p.level)
    .bind(p.experience)
    .bind(p.rikis)
    .bind(p.grace)
    .bind(p.gems)
    .bind(p.energy)
    .bind(p.max_energy)
    .bind(p.stamina)
    .bind(p.max_stamina)
    .bind(p.energy_updated)
    .bind(p.stamina_updated)
    .bind(p.total_power)
    .bind(p.pity_counter)
    .bind(p.total_summons)
    .bind(&p.fusion_shards)
    .bind(p.daily_streak)
    .bind(p.last_daily)
    .execute(&mut **tx)
    .await?;
    Ok(())
}


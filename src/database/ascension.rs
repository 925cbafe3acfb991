//! Ascension tower progress rows.

use super::models::AscensionProgress;
use crate::error::RpgResult;
use crate::game::combat::TowerState;
use sqlx::{Postgres, Transaction};

/// Locks the player's tower row, creating it at floor 1 on first use.
pub async fn lock_or_create(
    tx: &mut Transaction<'_, Postgres>,
    player_id: i64,
    fresh: TowerState,
) -> RpgResult<AscensionProgress> {
    sqlx::query(
        "INSERT INTO ascension_progress (player_id, current_floor, highest_floor, enemy_hp, enemy_max_hp) \
         VALUES ($1, $2, $3, $4, $5) ON CONFLICT (player_id) DO NOTHING",
    )
    .bind(player_id)
    .bind(fresh.floor)
    .bind(fresh.highest_floor)
    .bind(fresh.enemy_hp)
    .bind(fresh.enemy_max_hp)
    .execute(&mut **tx)
    .await?;
    Ok(sqlx::query_as::<_, AscensionProgress>(
        "SELECT player_id, current_floor, highest_floor, enemy_hp, enemy_max_hp, total_attacks, updated_at \
         FROM ascension_progress WHERE player_id = $1 FOR UPDATE",
    )
    .bind(player_id)
    .fetch_one(&mut **tx)
    .await?)
}

pub async fn save(
    tx: &mut Transaction<'_, Postgres>,
    player_id: i64,
    state: &TowerState,
    attacks: i64,
) -> RpgResult<()> {
    sqlx::query(
        "UPDATE ascension_progress SET current_floor = $2, highest_floor = $3, enemy_hp = $4, \
         enemy_max_hp = $5, total_attacks = total_attacks + $6, updated_at = NOW() WHERE player_id = $1",
    )
    .bind(player_id)
    .bind(state.floor)
    .bind(state.highest_floor)
    .bind(state.enemy_hp)
    .bind(state.enemy_max_hp)
    .bind(attacks)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Highest cleared floor, 0 for players who never entered the tower.
pub async fn highest_floor(tx: &mut Transaction<'_, Postgres>, player_id: i64) -> RpgResult<i32> {
    let floor: Option<i32> =
        sqlx::query_scalar("SELECT highest_floor FROM ascension_progress WHERE player_id = $1")
            .bind(player_id)
            .fetch_optional(&mut **tx)
            .await?;
    Ok(floor.unwrap_or(0))
}

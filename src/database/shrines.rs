//! Shrine rows: one per player per shrine type.

use super::models::Shrine;
use crate::error::{RpgError, RpgResult};
use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};

pub async fn player_shrines(
    tx: &mut Transaction<'_, Postgres>,
    player_id: i64,
) -> RpgResult<Vec<Shrine>> {
    Ok(sqlx::query_as::<_, Shrine>(
        "SELECT id, player_id, shrine_type, level, last_collected FROM shrines WHERE player_id = $1 ORDER BY shrine_type",
    )
    .bind(player_id)
    .fetch_all(&mut **tx)
    .await?)
}

pub async fn lock_shrine(
    tx: &mut Transaction<'_, Postgres>,
    player_id: i64,
    shrine_type: &str,
) -> RpgResult<Shrine> {
    sqlx::query_as::<_, Shrine>(
        "SELECT id, player_id, shrine_type, level, last_collected FROM shrines \
         WHERE player_id = $1 AND shrine_type = $2 FOR UPDATE",
    )
    .bind(player_id)
    .bind(shrine_type)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| RpgError::not_found(format!("a `{shrine_type}` shrine. Build one first")))
}

/// Creates a shrine; returns `None` if the player already has this type.
pub async fn create_shrine(
    tx: &mut Transaction<'_, Postgres>,
    player_id: i64,
    shrine_type: &str,
) -> RpgResult<Option<Shrine>> {
    Ok(sqlx::query_as::<_, Shrine>(
        "INSERT INTO shrines (player_id, shrine_type) VALUES ($1, $2) \
         ON CONFLICT (player_id, shrine_type) DO NOTHING \
         RETURNING id, player_id, shrine_type, level, last_collected",
    )
    .bind(player_id)
    .bind(shrine_type)
    .fetch_optional(&mut **tx)
    .await?)
}

pub async fn mark_collected(
    tx: &mut Transaction<'_, Postgres>,
    shrine_id: i32,
    at: DateTime<Utc>,
) -> RpgResult<()> {
    sqlx::query("UPDATE shrines SET last_collected = $2 WHERE id = $1")
        .bind(shrine_id)
        .bind(at)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn set_level(
    tx: &mut Transaction<'_, Postgres>,
    shrine_id: i32,
    level: i32,
) -> RpgResult<()> {
    sqlx::query("UPDATE shrines SET level = $2 WHERE id = $1")
        .bind(shrine_id)
        .bind(level)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

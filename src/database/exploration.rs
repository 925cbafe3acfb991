//! Sector exploration progress rows.

use super::models::SectorProgress;
use crate::error::RpgResult;
use sqlx::{Postgres, Transaction};

pub async fn cleared_stages(
    tx: &mut Transaction<'_, Postgres>,
    player_id: i64,
) -> RpgResult<Vec<(i32, i32)>> {
    Ok(sqlx::query_as::<_, (i32, i32)>(
        "SELECT sector, sublevel FROM sector_progress WHERE player_id = $1 AND miniboss_defeated",
    )
    .bind(player_id)
    .fetch_all(&mut **tx)
    .await?)
}

pub async fn all_progress(
    tx: &mut Transaction<'_, Postgres>,
    player_id: i64,
) -> RpgResult<Vec<SectorProgress>> {
    Ok(sqlx::query_as::<_, SectorProgress>(
        "SELECT player_id, sector, sublevel, progress, miniboss_defeated, updated_at \
         FROM sector_progress WHERE player_id = $1 ORDER BY sector, sublevel",
    )
    .bind(player_id)
    .fetch_all(&mut **tx)
    .await?)
}

pub async fn lock_or_create(
    tx: &mut Transaction<'_, Postgres>,
    player_id: i64,
    sector: i32,
    sublevel: i32,
) -> RpgResult<SectorProgress> {
    sqlx::query(
        "INSERT INTO sector_progress (player_id, sector, sublevel) VALUES ($1, $2, $3) \
         ON CONFLICT (player_id, sector, sublevel) DO NOTHING",
    )
    .bind(player_id)
    .bind(sector)
    .bind(sublevel)
    .execute(&mut **tx)
    .await?;
    Ok(sqlx::query_as::<_, SectorProgress>(
        "SELECT player_id, sector, sublevel, progress, miniboss_defeated, updated_at \
         FROM sector_progress WHERE player_id = $1 AND sector = $2 AND sublevel = $3 FOR UPDATE",
    )
    .bind(player_id)
    .bind(sector)
    .bind(sublevel)
    .fetch_one(&mut **tx)
    .await?)
}

pub async fn save(tx: &mut Transaction<'_, Postgres>, p: &SectorProgress) -> RpgResult<()> {
    sqlx::query(
        "UPDATE sector_progress SET progress = $4, miniboss_defeated = $5, updated_at = NOW() \
         WHERE player_id = $1 AND sector = $2 AND sublevel = $3",
    )
    .bind(p.player_id)
    .bind(p.sector)
    .bind(p.sublevel)
    .bind(p.progress)
    .bind(p.miniboss_defeated)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

//! Queries for the maiden catalogue and owned maiden stacks.

use super::models::{MaidenBase, OwnedMaiden};
use crate::error::{RpgError, RpgResult};
use sqlx::{PgPool, Postgres, Transaction};

const OWNED_COLUMNS: &str = "m.id, m.player_id, m.maiden_base_id, m.tier, m.quantity, \
    m.times_fused, m.acquired_at, b.name, b.element, b.base_atk, b.base_def";

pub async fn all_bases(pool: &PgPool) -> RpgResult<Vec<MaidenBase>> {
    Ok(sqlx::query_as::<_, MaidenBase>(
        "SELECT id, name, element, base_atk, base_def, rarity_weight, description FROM maiden_bases ORDER BY id",
    )
    .fetch_all(pool)
    .await?)
}

/// All stacks a player owns, strongest first.
pub async fn player_maidens(
    tx: &mut Transaction<'_, Postgres>,
    player_id: i64,
) -> RpgResult<Vec<OwnedMaiden>> {
    let sql = format!(
        "SELECT {OWNED_COLUMNS} FROM maidens m JOIN maiden_bases b ON m.maiden_base_id = b.id \
         WHERE m.player_id = $1 AND m.quantity > 0 ORDER BY m.tier DESC, b.base_atk DESC, m.id"
    );
    Ok(sqlx::query_as::<_, OwnedMaiden>(&sql)
        .bind(player_id)
        .fetch_all(&mut **tx)
        .await?)
}

/// Locks a single stack owned by the player.
pub async fn lock_maiden(
    tx: &mut Transaction<'_, Postgres>,
    player_id: i64,
    maiden_id: i64,
) -> RpgResult<OwnedMaiden> {
    let sql = format!(
        "SELECT {OWNED_COLUMNS} FROM maidens m JOIN maiden_bases b ON m.maiden_base_id = b.id \
         WHERE m.id = $1 AND m.player_id = $2 AND m.quantity > 0 FOR UPDATE OF m"
    );
    sqlx::query_as::<_, OwnedMaiden>(&sql)
        .bind(maiden_id)
        .bind(player_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| RpgError::not_found(format!("maiden #{maiden_id} in your collection")))
}

/// Adds copies to a stack, creating it on first acquisition.
pub async fn add_maiden(
    tx: &mut Transaction<'_, Postgres>,
    player_id: i64,
    maiden_base_id: i32,
    tier: i32,
    quantity: i32,
) -> RpgResult<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO maidens (player_id, maiden_base_id, tier, quantity) VALUES ($1, $2, $3, $4) \
         ON CONFLICT (player_id, maiden_base_id, tier) DO UPDATE SET quantity = maidens.quantity + EXCLUDED.quantity \
         RETURNING id",
    )
    .bind(player_id)
    .bind(maiden_base_id)
    .bind(tier)
    .bind(quantity)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

/// Removes copies from a stack; the row is deleted when it reaches zero.
pub async fn consume_maiden(
    tx: &mut Transaction<'_, Postgres>,
    maiden_id: i64,
    quantity: i32,
) -> RpgResult<()> {
    let remaining: Option<i32> = sqlx::query_scalar(
        "UPDATE maidens SET quantity = quantity - $2 WHERE id = $1 AND quantity >= $2 RETURNING quantity",
    )
    .bind(maiden_id)
    .bind(quantity)
    .fetch_optional(&mut **tx)
    .await?;
    match remaining {
        None => Err(RpgError::validation("Not enough copies of that maiden.")),
        Some(0) => {
            sqlx::query("DELETE FROM maidens WHERE id = $1")
                .bind(maiden_id)
                .execute(&mut **tx)
                .await?;
            Ok(())
        }
        Some(_) => Ok(()),
    }
}

pub async fn mark_fused(tx: &mut Transaction<'_, Postgres>, maiden_id: i64) -> RpgResult<()> {
    sqlx::query("UPDATE maidens SET times_fused = times_fused + 1 WHERE id = $1")
        .bind(maiden_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

//! Append-only audit trail of currency and maiden movements.

use crate::error::RpgResult;
use serde_json::Value;
use sqlx::{Postgres, Transaction};

pub async fn record(
    tx: &mut Transaction<'_, Postgres>,
    player_id: i64,
    kind: &str,
    details: Value,
) -> RpgResult<()> {
    sqlx::query("INSERT INTO transaction_logs (player_id, kind, details) VALUES ($1, $2, $3)")
        .bind(player_id)
        .bind(kind)
        .bind(details)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

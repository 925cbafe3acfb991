//! Cached leaderboard reads.

use super::cache;
use crate::AppState;
use crate::database::leaderboard::{self, LeaderboardType};
use crate::database::models::LeaderboardEntry;
use crate::error::RpgResult;
use std::time::Duration;
use tracing::{debug, instrument};

pub const LEADERBOARD_LIMIT: i64 = 10;
pub const LEADERBOARD_CACHE_TTL_SECS: u64 = 60;

#[instrument(level = "debug", skip(state), fields(board = board.key()))]
pub async fn top(state: &AppState, board: LeaderboardType) -> RpgResult<Vec<LeaderboardEntry>> {
    let ttl = Duration::from_secs(LEADERBOARD_CACHE_TTL_SECS);
    if let Some(entries) = cache::get_with_ttl(&state.leaderboard_cache, &board, ttl).await {
        debug!(target = "cache.leaderboard", hit = true);
        return Ok(entries);
    }
    let entries = state
        .db
        .retrying("leaderboard.top", move || async move {
            let mut tx = state.db.begin_read_only().await?;
            let rows = leaderboard::top(&mut tx, board, LEADERBOARD_LIMIT).await?;
            tx.commit().await?;
            Ok(rows)
        })
        .await?;
    cache::insert(&state.leaderboard_cache, board, entries.clone()).await;
    Ok(entries)
}

//! Game services: each operation validates, mutates and persists inside one retried
//! transaction, then publishes its event once the transaction has committed.

pub mod ascension;
pub mod cache;
pub mod daily;
pub mod exploration;
pub mod fusion;
pub mod guild;
pub mod leaderboard;
pub mod lock;
pub mod player;
pub mod shrine;
pub mod summon;

use crate::AppState;
use serde_json::Value;
use serenity::model::id::UserId;

/// Discord snowflakes are stored as BIGINT.
pub(crate) fn player_id(user: UserId) -> i64 {
    user.get() as i64
}

pub(crate) async fn publish(state: &AppState, topic: &str, payload: Value) {
    state.events.emit(topic, payload).await;
}

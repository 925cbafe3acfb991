//! Daily reward claims.

use super::{player_id, publish};
use crate::AppState;
use crate::config::sections::DailyRules;
use crate::database::{ledger, players};
use crate::error::{RpgError, RpgResult};
use crate::game::daily::{self, DailyReward, DailyStatus};
use chrono::Utc;
use serde_json::json;
use serenity::model::id::UserId;
use tracing::instrument;

#[derive(Debug, Clone, Copy)]
pub struct DailyClaim {
    pub reward: DailyReward,
    pub streak: i32,
}

#[instrument(level = "info", skip(state), fields(user_id = user.get()))]
pub async fn claim(state: &AppState, user: UserId) -> RpgResult<DailyClaim> {
    let rules: DailyRules = state.config.section().await;
    let rules = &rules;
    let claim = state
        .db
        .retrying("daily.claim", move || async move {
            let pid = player_id(user);
            let now = Utc::now();
            let mut tx = state.db.begin().await?;
            let mut player = players::lock_player(&mut tx, pid).await?;
            let streak = match daily::daily_status(player.last_daily, player.daily_streak, now) {
                DailyStatus::Claimed { remaining } => {
                    return Err(RpgError::Cooldown {
                        action: "daily reward",
                        remaining,
                    });
                }
                DailyStatus::Available { new_streak } => new_streak,
            };
            let reward = daily::daily_reward(streak, rules);
            player.rikis += reward.rikis;
            player.grace += reward.grace;
            player.gems += reward.gems;
            player.daily_streak = streak;
            player.last_daily = Some(now);
            players::save_player(&mut tx, &player).await?;
            ledger::record(
                &mut tx,
                pid,
                "daily",
                json!({
                    "streak": streak,
                    "rikis": reward.rikis,
                    "grace": reward.grace,
                    "gems": reward.gems,
                }),
            )
            .await?;
            tx.commit().await?;
            Ok(DailyClaim { reward, streak })
        })
        .await?;
    publish(
        state,
        "daily.claimed",
        json!({ "player_id": user.get(), "streak": claim.streak }),
    )
    .await;
    Ok(claim)
}

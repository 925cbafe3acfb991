//! Shrine building, collection and upgrades.

use super::{player_id, publish};
use crate::AppState;
use crate::config::sections::{ShrineRules, ShrineYield};
use crate::database::models::Player;
use crate::database::{ledger, players, shrines};
use crate::error::{RpgError, RpgResult};
use crate::game::shrine as calc;
use chrono::{Duration, Utc};
use serde_json::json;
use serenity::model::id::UserId;
use tracing::instrument;

fn credit(player: &mut Player, yields: ShrineYield, amount: i64) {
    match yields {
        ShrineYield::Rikis => player.rikis += amount,
        ShrineYield::Grace => player.grace += amount.min(i32::MAX as i64) as i32,
    }
}

#[derive(Debug, Clone)]
pub struct ShrineStatus {
    pub key: String,
    pub display_name: String,
    pub level: i32,
    pub max_level: i32,
    pub yields: ShrineYield,
    pub amount: i64,
    /// `None` when ready to collect.
    pub ready_in: Option<Duration>,
    /// `None` at max level.
    pub upgrade_cost: Option<i64>,
}

#[instrument(level = "debug", skip(state), fields(user_id = user.get()))]
pub async fn list(state: &AppState, user: UserId) -> RpgResult<Vec<ShrineStatus>> {
    let rules: ShrineRules = state.config.section().await;
    let rules = &rules;
    state
        .db
        .retrying("shrine.list", move || async move {
            let now = Utc::now();
            let mut tx = state.db.begin_read_only().await?;
            let rows = shrines::player_shrines(&mut tx, player_id(user)).await?;
            tx.commit().await?;
            Ok(rows
                .into_iter()
                .filter_map(|row| {
                    let kind = rules.kinds.get(&row.shrine_type)?;
                    Some(ShrineStatus {
                        display_name: kind.display_name.clone(),
                        level: row.level,
                        max_level: kind.max_level,
                        yields: kind.yields,
                        amount: calc::shrine_yield(kind, row.level),
                        ready_in: calc::collect_ready(kind, row.last_collected, now).err(),
                        upgrade_cost: (row.level < kind.max_level)
                            .then(|| calc::upgrade_cost(kind, row.level)),
                        key: row.shrine_type,
                    })
                })
                .collect())
        })
        .await
}

#[instrument(level = "info", skip(state), fields(user_id = user.get()))]
pub async fn build(state: &AppState, user: UserId, shrine_type: &str) -> RpgResult<ShrineStatus> {
    let rules: ShrineRules = state.config.section().await;
    let kind = calc::kind(&rules, shrine_type)?;
    let status = state
        .db
        .retrying("shrine.build", move || async move {
            let pid = player_id(user);
            let mut tx = state.db.begin().await?;
            let mut player = players::lock_player(&mut tx, pid).await?;
            if player.rikis < kind.build_cost {
                return Err(RpgError::insufficient(
                    "rikis",
                    kind.build_cost,
                    player.rikis,
                ));
            }
            let row = shrines::create_shrine(&mut tx, pid, shrine_type)
                .await?
                .ok_or_else(|| {
                    RpgError::validation(format!("You already own a {}.", kind.display_name))
                })?;
            player.rikis -= kind.build_cost;
            players::save_player(&mut tx, &player).await?;
            ledger::record(
                &mut tx,
                pid,
                "shrine_build",
                json!({ "shrine": shrine_type, "rikis": -kind.build_cost }),
            )
            .await?;
            tx.commit().await?;
            Ok(ShrineStatus {
                key: row.shrine_type,
                display_name: kind.display_name.clone(),
                level: row.level,
                max_level: kind.max_level,
                yields: kind.yields,
                amount: calc::shrine_yield(kind, row.level),
                ready_in: calc::collect_ready(kind, row.last_collected, Utc::now()).err(),
                upgrade_cost: Some(calc::upgrade_cost(kind, row.level)),
            })
        })
        .await?;
    publish(
        state,
        "shrine.built",
        json!({ "player_id": user.get(), "shrine": shrine_type }),
    )
    .await;
    Ok(status)
}

#[derive(Debug, Clone, Default)]
pub struct CollectReport {
    /// (display name, yield type, amount) per collected shrine.
    pub collected: Vec<(String, ShrineYield, i64)>,
    pub rikis_total: i64,
    pub grace_total: i64,
}

/// Collects every shrine whose cooldown has elapsed.
#[instrument(level = "info", skip(state), fields(user_id = user.get()))]
pub async fn collect(state: &AppState, user: UserId) -> RpgResult<CollectReport> {
    let rules: ShrineRules = state.config.section().await;
    let rules = &rules;
    let report = state
        .db
        .retrying("shrine.collect", move || async move {
            let pid = player_id(user);
            let now = Utc::now();
            let mut tx = state.db.begin().await?;
            let mut player = players::lock_player(&mut tx, pid).await?;
            let rows = shrines::player_shrines(&mut tx, pid).await?;
            if rows.is_empty() {
                return Err(RpgError::validation(
                    "You have no shrines yet. Build one with `shrine build`.",
                ));
            }
            let mut report = CollectReport::default();
            let mut soonest: Option<Duration> = None;
            for row in rows {
                let Some(kind) = rules.kinds.get(&row.shrine_type) else {
                    continue;
                };
                match calc::collect_ready(kind, row.last_collected, now) {
                    Ok(()) => {
                        let amount = calc::shrine_yield(kind, row.level);
                        credit(&mut player, kind.yields, amount);
                        match kind.yields {
                            ShrineYield::Rikis => report.rikis_total += amount,
                            ShrineYield::Grace => report.grace_total += amount,
                        }
                        shrines::mark_collected(&mut tx, row.id, now).await?;
                        report
                            .collected
                            .push((kind.display_name.clone(), kind.yields, amount));
                    }
                    Err(wait) => soonest = Some(soonest.map_or(wait, |s| s.min(wait))),
                }
            }
            if report.collected.is_empty() {
                return Err(RpgError::Cooldown {
                    action: "shrine collection",
                    remaining: soonest.unwrap_or_else(Duration::zero),
                });
            }
            players::save_player(&mut tx, &player).await?;
            ledger::record(
                &mut tx,
                pid,
                "shrine_collect",
                json!({ "rikis": report.rikis_total, "grace": report.grace_total }),
            )
            .await?;
            tx.commit().await?;
            Ok(report)
        })
        .await?;
    publish(
        state,
        "shrine.collected",
        json!({
            "player_id": user.get(),
            "rikis": report.rikis_total,
            "grace": report.grace_total,
            "shrines": report.collected.len(),
        }),
    )
    .await;
    Ok(report)
}

#[instrument(level = "info", skip(state), fields(user_id = user.get()))]
pub async fn upgrade(
    state: &AppState,
    user: UserId,
    shrine_type: &str,
) -> RpgResult<(i32, i64)> {
    let rules: ShrineRules = state.config.section().await;
    let kind = calc::kind(&rules, shrine_type)?;
    let (level, cost) = state
        .db
        .retrying("shrine.upgrade", move || async move {
            let pid = player_id(user);
            let mut tx = state.db.begin().await?;
            let mut player = players::lock_player(&mut tx, pid).await?;
            let row = shrines::lock_shrine(&mut tx, pid, shrine_type).await?;
            if row.level >= kind.max_level {
                return Err(RpgError::validation(format!(
                    "Your {} is already at max level ({}).",
                    kind.display_name, kind.max_level
                )));
            }
            let cost = calc::upgrade_cost(kind, row.level);
            if player.rikis < cost {
                return Err(RpgError::insufficient("rikis", cost, player.rikis));
            }
            player.rikis -= cost;
            shrines::set_level(&mut tx, row.id, row.level + 1).await?;
            players::save_player(&mut tx, &player).await?;
            ledger::record(
                &mut tx,
                pid,
                "shrine_upgrade",
                json!({ "shrine": shrine_type, "level": row.level + 1, "rikis": -cost }),
            )
            .await?;
            tx.commit().await?;
            Ok((row.level + 1, cost))
        })
        .await?;
    publish(
        state,
        "shrine.upgraded",
        json!({ "player_id": user.get(), "shrine": shrine_type, "level": level }),
    )
    .await;
    Ok((level, cost))
}

//! Grace-funded summoning.

use super::player::refresh_power;
use super::{player_id, publish};
use crate::AppState;
use crate::config::sections::{GachaRules, PowerRules, ResourceRules};
use crate::database::models::{Element, MaidenBase};
use crate::database::{ledger, maidens, players};
use crate::error::{RpgError, RpgResult};
use crate::game::{gacha, resources};
use chrono::Utc;
use serde_json::json;
use serenity::model::id::UserId;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct SummonedMaiden {
    pub maiden_id: i64,
    pub name: String,
    pub element: Element,
    pub tier: i32,
    pub pity: bool,
}

#[derive(Debug, Clone)]
pub struct SummonOutcome {
    pub pulls: Vec<SummonedMaiden>,
    pub grace_spent: i32,
    pub grace_left: i32,
    pub pity_counter: i32,
    pub pity_threshold: i32,
    pub total_power: i64,
}

struct Rules {
    gacha: GachaRules,
    power: PowerRules,
    resources: ResourceRules,
}

#[instrument(level = "info", skip(state), fields(user_id = user.get()))]
pub async fn summon(state: &AppState, user: UserId, count: i32) -> RpgResult<SummonOutcome> {
    let rules = Rules {
        gacha: state.config.section().await,
        power: state.config.section().await,
        resources: state.config.section().await,
    };
    let cost = gacha::summon_cost(count, &rules.gacha)?;
    let catalogue = maidens::all_bases(state.db.pool()).await?;
    if catalogue.is_empty() {
        return Err(RpgError::Internal("maiden catalogue is empty".into()));
    }
    let (rules, catalogue) = (&rules, catalogue.as_slice());
    let outcome = state
        .db
        .retrying("gacha.summon", move || {
            summon_once(state, user, count, cost, rules, catalogue)
        })
        .await?;
    publish(
        state,
        "gacha.summoned",
        json!({
            "player_id": user.get(),
            "count": count,
            "tiers": outcome.pulls.iter().map(|p| p.tier).collect::<Vec<_>>(),
            "pity_triggered": outcome.pulls.iter().any(|p| p.pity),
        }),
    )
    .await;
    Ok(outcome)
}

async fn summon_once(
    state: &AppState,
    user: UserId,
    count: i32,
    cost: i32,
    rules: &Rules,
    catalogue: &[MaidenBase],
) -> RpgResult<SummonOutcome> {
    let pid = player_id(user);
    let mut tx = state.db.begin().await?;
    let mut player = players::lock_player(&mut tx, pid).await?;
    resources::regenerate(&mut player, Utc::now(), &rules.resources);
    if player.grace < cost {
        return Err(RpgError::insufficient(
            "grace",
            cost as i64,
            player.grace as i64,
        ));
    }

    let (plan, picks) = {
        let mut rng = rand::rng();
        let plan = gacha::plan_summons(
            count,
            player.level,
            player.pity_counter,
            &rules.gacha,
            &mut rng,
        );
        let picks: Vec<&MaidenBase> = plan
            .pulls
            .iter()
            .filter_map(|_| gacha::pick_weighted(catalogue, |b| b.rarity_weight, &mut rng))
            .collect();
        (plan, picks)
    };

    let mut pulls = Vec::with_capacity(plan.pulls.len());
    for (pull, base) in plan.pulls.iter().zip(picks) {
        let maiden_id = maidens::add_maiden(&mut tx, pid, base.id, pull.tier, 1).await?;
        pulls.push(SummonedMaiden {
            maiden_id,
            name: base.name.clone(),
            element: base.element,
            tier: pull.tier,
            pity: pull.pity,
        });
    }

    gacha::settle_summons(&mut player, &plan, cost)?;
    refresh_power(&mut tx, &mut player, &rules.power).await?;
    players::save_player(&mut tx, &player).await?;
    ledger::record(
        &mut tx,
        pid,
        "summon",
        json!({
            "grace": -cost,
            "maidens": pulls.iter().map(|p| json!({ "id": p.maiden_id, "tier": p.tier })).collect::<Vec<_>>(),
        }),
    )
    .await?;
    tx.commit().await?;

    Ok(SummonOutcome {
        pulls,
        grace_spent: cost,
        grace_left: player.grace,
        pity_counter: player.pity_counter,
        pity_threshold: rules.gacha.pity_threshold,
        total_power: player.total_power,
    })
}

//! Maiden fusion and fusion-shard redemption.

use super::player::refresh_power;
use super::{player_id, publish};
use crate::AppState;
use crate::config::sections::{FusionRules, PowerRules};
use crate::database::models::{Element, MaidenBase};
use crate::database::{ledger, maidens, players};
use crate::error::{RpgError, RpgResult};
use crate::game::{fusion, gacha};
use rand::Rng;
use serde_json::json;
use serenity::model::id::UserId;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct FusedMaiden {
    pub maiden_id: i64,
    pub name: String,
    pub element: Element,
    pub tier: i32,
}

#[derive(Debug, Clone)]
pub struct FusionOutcome {
    pub parent_tier: i32,
    pub cost: i64,
    pub success_rate: f64,
    /// Set on success.
    pub result: Option<FusedMaiden>,
    pub shards_gained: i32,
    pub shards_total: i32,
    pub rikis_left: i64,
}

/// Picks a catalogue entry of `element`, falling back to the whole catalogue.
fn pick_base<'a>(
    catalogue: &'a [MaidenBase],
    element: Element,
    rng: &mut impl Rng,
) -> Option<&'a MaidenBase> {
    let same: Vec<&MaidenBase> = catalogue.iter().filter(|b| b.element == element).collect();
    if same.is_empty() {
        return gacha::pick_weighted(catalogue, |b| b.rarity_weight, rng);
    }
    gacha::pick_weighted(&same, |b| b.rarity_weight, rng).copied()
}

fn load_catalogue_error() -> RpgError {
    RpgError::Internal("maiden catalogue is empty".into())
}

#[instrument(level = "info", skip(state), fields(user_id = user.get()))]
pub async fn fuse(
    state: &AppState,
    user: UserId,
    first: i64,
    second: i64,
) -> RpgResult<FusionOutcome> {
    let fusion_rules: FusionRules = state.config.section().await;
    let power_rules: PowerRules = state.config.section().await;
    let catalogue = maidens::all_bases(state.db.pool()).await?;
    if catalogue.is_empty() {
        return Err(load_catalogue_error());
    }
    let (fr, pr, cat) = (&fusion_rules, &power_rules, catalogue.as_slice());
    let outcome = state
        .db
        .retrying("fusion.fuse", move || {
            fuse_once(state, user, first, second, fr, pr, cat)
        })
        .await?;
    info!(
        target = "fusion",
        user_id = user.get(),
        tier = outcome.parent_tier,
        success = outcome.result.is_some(),
        "fusion resolved"
    );
    publish(
        state,
        "fusion.completed",
        json!({
            "player_id": user.get(),
            "tier": outcome.parent_tier,
            "success": outcome.result.is_some(),
            "result_tier": outcome.result.as_ref().map(|r| r.tier),
            "shards_gained": outcome.shards_gained,
            "cost": outcome.cost,
        }),
    )
    .await;
    Ok(outcome)
}

async fn fuse_once(
    state: &AppState,
    user: UserId,
    first: i64,
    second: i64,
    fusion_rules: &FusionRules,
    power_rules: &PowerRules,
    catalogue: &[MaidenBase],
) -> RpgResult<FusionOutcome> {
    let pid = player_id(user);
    let mut tx = state.db.begin().await?;
    let mut player = players::lock_player(&mut tx, pid).await?;

    // Lock stacks in id order so concurrent fusions cannot deadlock.
    let (a, b) = if first == second {
        let m = maidens::lock_maiden(&mut tx, pid, first).await?;
        (m.clone(), m)
    } else {
        let (lo, hi) = (first.min(second), first.max(second));
        let lo_row = maidens::lock_maiden(&mut tx, pid, lo).await?;
        let hi_row = maidens::lock_maiden(&mut tx, pid, hi).await?;
        if first == lo {
            (lo_row, hi_row)
        } else {
            (hi_row, lo_row)
        }
    };
    fusion::validate_pair(&a, &b)?;

    let tier = a.tier;
    let cost = fusion::fusion_cost(tier, fusion_rules);
    if player.rikis < cost {
        return Err(RpgError::insufficient("rikis", cost, player.rikis));
    }
    let rate = fusion::success_rate(tier, fusion_rules).unwrap_or(0.0);

    let (roll, base) = {
        let mut rng = rand::rng();
        let roll = fusion::roll_fusion(tier, a.element, b.element, fusion_rules, &mut rng)?;
        let base = match roll {
            fusion::FusionRoll::Success { element, .. } => {
                Some(pick_base(catalogue, element, &mut rng).ok_or_else(load_catalogue_error)?)
            }
            fusion::FusionRoll::Failure { .. } => None,
        };
        (roll, base)
    };

    let settlement = fusion::settle_fusion(&mut player, a.id, b.id, cost, roll);
    for (stack, copies) in &settlement.consumed {
        maidens::consume_maiden(&mut tx, *stack, *copies).await?;
    }
    if let Some(survivor) = settlement.survivor {
        maidens::mark_fused(&mut tx, survivor).await?;
    }
    let result = match (roll, base) {
        (fusion::FusionRoll::Success { tier: new_tier, .. }, Some(base)) => {
            let maiden_id = maidens::add_maiden(&mut tx, pid, base.id, new_tier, 1).await?;
            maidens::mark_fused(&mut tx, maiden_id).await?;
            Some(FusedMaiden {
                maiden_id,
                name: base.name.clone(),
                element: base.element,
                tier: new_tier,
            })
        }
        (fusion::FusionRoll::Success { .. }, None) => return Err(load_catalogue_error()),
        (fusion::FusionRoll::Failure { .. }, _) => None,
    };
    let shards_gained = settlement.shards_gained;

    refresh_power(&mut tx, &mut player, power_rules).await?;
    players::save_player(&mut tx, &player).await?;
    ledger::record(
        &mut tx,
        pid,
        "fusion",
        json!({
            "rikis": -cost,
            "consumed": [a.id, b.id],
            "tier": tier,
            "result": result.as_ref().map(|r| r.maiden_id),
            "shards": shards_gained,
        }),
    )
    .await?;
    tx.commit().await?;

    Ok(FusionOutcome {
        parent_tier: tier,
        cost,
        success_rate: rate,
        result,
        shards_gained,
        shards_total: player.shards_for_tier(tier),
        rikis_left: player.rikis,
    })
}

#[derive(Debug, Clone)]
pub struct RedeemOutcome {
    pub maiden: FusedMaiden,
    pub shards_spent: i32,
    pub shards_left: i32,
}

/// Trades a full set of tier shards for a guaranteed maiden one tier higher.
#[instrument(level = "info", skip(state), fields(user_id = user.get()))]
pub async fn redeem_shards(state: &AppState, user: UserId, tier: i32) -> RpgResult<RedeemOutcome> {
    let fusion_rules: FusionRules = state.config.section().await;
    let power_rules: PowerRules = state.config.section().await;
    let catalogue = maidens::all_bases(state.db.pool()).await?;
    if catalogue.is_empty() {
        return Err(load_catalogue_error());
    }
    let (fr, pr, cat) = (&fusion_rules, &power_rules, catalogue.as_slice());
    let outcome = state
        .db
        .retrying("fusion.redeem", move || async move {
            let pid = player_id(user);
            let mut tx = state.db.begin().await?;
            let mut player = players::lock_player(&mut tx, pid).await?;
            let left = fusion::redeem_shards(tier, player.shards_for_tier(tier), fr)?;
            let base = {
                let mut rng = rand::rng();
                let element = Element::ALL[rng.random_range(0..Element::ALL.len())];
                pick_base(cat, element, &mut rng).ok_or_else(load_catalogue_error)?
            };
            let maiden_id = maidens::add_maiden(&mut tx, pid, base.id, tier + 1, 1).await?;
            player
                .fusion_shards
                .0
                .insert(tier.to_string(), left);
            refresh_power(&mut tx, &mut player, pr).await?;
            players::save_player(&mut tx, &player).await?;
            ledger::record(
                &mut tx,
                pid,
                "shard_redeem",
                json!({ "tier": tier, "shards": -fr.shards_for_guarantee, "maiden": maiden_id }),
            )
            .await?;
            tx.commit().await?;
            Ok(RedeemOutcome {
                maiden: FusedMaiden {
                    maiden_id,
                    name: base.name.clone(),
                    element: base.element,
                    tier: tier + 1,
                },
                shards_spent: fr.shards_for_guarantee,
                shards_left: left,
            })
        })
        .await?;
    publish(
        state,
        "fusion.shards_redeemed",
        json!({ "player_id": user.get(), "tier": tier, "result_tier": outcome.maiden.tier }),
    )
    .await;
    Ok(outcome)
}

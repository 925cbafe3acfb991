//! Fusion rules: cost, odds, element outcome and shard pity.

use crate::config::sections::{FusionRules, MAX_TIER};
use crate::database::models::{Element, OwnedMaiden, Player};
use crate::error::{RpgError, RpgResult};
use rand::Rng;

/// Rikis needed to fuse two maidens of `tier`.
pub fn fusion_cost(tier: i32, rules: &FusionRules) -> i64 {
    let raw = rules.base_cost as f64 * rules.cost_growth.powi(tier.max(1) - 1);
    (raw.round() as i64).min(rules.max_cost)
}

/// Success chance in percent, or `None` when the tier cannot be fused.
pub fn success_rate(tier: i32, rules: &FusionRules) -> Option<f64> {
    if !(1..MAX_TIER).contains(&tier) {
        return None;
    }
    let rate = rules
        .rates
        .get((tier - 1) as usize)
        .or(rules.rates.last())
        .copied()
        .unwrap_or(0.0);
    Some(rate.clamp(0.0, 100.0))
}

/// Checks that two stacks may be fused together.
pub fn validate_pair(a: &OwnedMaiden, b: &OwnedMaiden) -> RpgResult<()> {
    if a.player_id != b.player_id {
        return Err(RpgError::validation("You can only fuse your own maidens."));
    }
    if a.tier != b.tier {
        return Err(RpgError::validation(format!(
            "Both maidens must share a tier (got T{} and T{}).",
            a.tier, b.tier
        )));
    }
    if a.tier >= MAX_TIER {
        return Err(RpgError::validation(format!(
            "Tier {MAX_TIER} maidens are already at their peak."
        )));
    }
    if a.id == b.id {
        if a.quantity < 2 {
            return Err(RpgError::validation(format!(
                "You need at least two copies of **{}** to fuse it with itself.",
                a.name
            )));
        }
    } else if a.quantity < 1 || b.quantity < 1 {
        return Err(RpgError::validation("Both maidens must be in your collection."));
    }
    Ok(())
}

fn combination_key(a: Element, b: Element) -> String {
    let (x, y) = if a.as_str() <= b.as_str() { (a, b) } else { (b, a) };
    format!("{}+{}", x.as_str(), y.as_str())
}

/// Resulting element of a fusion. Same element stays; unknown pairs pick one parent.
pub fn combine_elements(a: Element, b: Element, rules: &FusionRules, rng: &mut impl Rng) -> Element {
    if a == b {
        return a;
    }
    match rules
        .element_combinations
        .get(&combination_key(a, b))
        .and_then(|e| e.parse::<Element>().ok())
    {
        Some(e) => e,
        None if rng.random_bool(0.5) => a,
        None => b,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusionRoll {
    Success { tier: i32, element: Element },
    Failure { shard_tier: i32, shards: i32 },
}

/// Rolls a fusion between two already validated stacks of `tier`.
pub fn roll_fusion(
    tier: i32,
    a: Element,
    b: Element,
    rules: &FusionRules,
    rng: &mut impl Rng,
) -> RpgResult<FusionRoll> {
    let rate = success_rate(tier, rules)
        .ok_or_else(|| RpgError::validation(format!("Tier {tier} cannot be fused.")))?;
    let roll: f64 = rng.random_range(0.0..100.0);
    if roll < rate {
        Ok(FusionRoll::Success {
            tier: tier + 1,
            element: combine_elements(a, b, rules, rng),
        })
    } else {
        Ok(FusionRoll::Failure {
            shard_tier: tier,
            shards: rules.shards_per_failure,
        })
    }
}

/// Stack and wallet changes of a resolved fusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionSettlement {
    /// `(stack id, copies removed)`.
    pub consumed: Vec<(i64, i32)>,
    /// Stack that keeps living after a failure.
    pub survivor: Option<i64>,
    pub shards_gained: i32,
}

/// Charges `cost` and works out which copies a roll eats.
///
/// Success eats both inputs. Failure keeps `first`, eats `second` and pays shards
/// for the parent tier.
pub fn settle_fusion(
    player: &mut Player,
    first: i64,
    second: i64,
    cost: i64,
    roll: FusionRoll,
) -> FusionSettlement {
    player.rikis -= cost;
    match roll {
        FusionRoll::Success { .. } => FusionSettlement {
            consumed: if first == second {
                vec![(first, 2)]
            } else {
                vec![(first, 1), (second, 1)]
            },
            survivor: None,
            shards_gained: 0,
        },
        FusionRoll::Failure { shard_tier, shards } => {
            player.add_shards(shard_tier, shards);
            FusionSettlement {
                consumed: vec![(second, 1)],
                survivor: Some(first),
                shards_gained: shards,
            }
        }
    }
}

/// Shards left after redeeming one guaranteed fusion, or an error if not enough.
pub fn redeem_shards(tier: i32, available: i32, rules: &FusionRules) -> RpgResult<i32> {
    if !(1..MAX_TIER).contains(&tier) {
        return Err(RpgError::validation(format!(
            "Shards can be redeemed for tiers 1 to {}.",
            MAX_TIER - 1
        )));
    }
    if available < rules.shards_for_guarantee {
        return Err(RpgError::insufficient(
            "fusion shards",
            rules.shards_for_guarantee as i64,
            available as i64,
        ));
    }
    Ok(available - rules.shards_for_guarantee)
}

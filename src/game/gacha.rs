//! Summoning: tier odds gated by player level, pity, weighted catalogue picks.

use crate::config::sections::{GachaRules, MAX_TIER};
use crate::database::models::Player;
use crate::error::{RpgError, RpgResult};
use rand::Rng;

/// Grace needed for a batch of `count` summons.
pub fn summon_cost(count: i32, rules: &GachaRules) -> RpgResult<i32> {
    if count < 1 || count > rules.max_batch {
        return Err(RpgError::validation(format!(
            "You can summon between 1 and {} maidens at once.",
            rules.max_batch
        )));
    }
    Ok(count * rules.grace_per_summon)
}

/// Tiers available to a player of `level`, ascending.
pub fn unlocked_tiers(level: i32, rules: &GachaRules) -> Vec<i32> {
    (1..=MAX_TIER)
        .filter(|tier| {
            let idx = (*tier - 1) as usize;
            let unlocked = rules.unlock_levels.get(idx).is_some_and(|req| *req <= level);
            let weighted = rules.tier_weights.get(idx).is_some_and(|w| *w > 0.0);
            unlocked && weighted
        })
        .collect()
}

/// Picks one item with probability proportional to `weight`.
pub fn pick_weighted<'a, T>(
    items: &'a [T],
    weight: impl Fn(&T) -> f64,
    rng: &mut impl Rng,
) -> Option<&'a T> {
    let total: f64 = items.iter().map(|i| weight(i).max(0.0)).sum();
    if total <= 0.0 {
        return items.first();
    }
    let mut target = rng.random_range(0.0..total);
    for item in items {
        let w = weight(item).max(0.0);
        if target < w {
            return Some(item);
        }
        target -= w;
    }
    items.last()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pull {
    pub tier: i32,
    pub pity: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummonPlan {
    pub pulls: Vec<Pull>,
    pub pity_counter: i32,
}

/// Rolls tiers for `count` pulls. The pity counter advances per pull; reaching the
/// threshold restricts that pull to the top unlocked tiers and resets the counter.
pub fn plan_summons(
    count: i32,
    level: i32,
    pity_counter: i32,
    rules: &GachaRules,
    rng: &mut impl Rng,
) -> SummonPlan {
    let tiers = unlocked_tiers(level, rules);
    let top_n = rules.pity_top_tiers.clamp(1, tiers.len().max(1));
    let top: Vec<i32> = tiers.iter().rev().take(top_n).copied().collect();
    let weight = |t: &i32| rules.tier_weights.get((*t - 1) as usize).copied().unwrap_or(0.0);

    let mut counter = pity_counter.max(0);
    let mut pulls = Vec::with_capacity(count.max(0) as usize);
    for _ in 0..count.max(0) {
        counter += 1;
        let pity = rules.pity_threshold > 0 && counter >= rules.pity_threshold;
        let pool: &[i32] = if pity { &top } else { &tiers };
        let tier = pick_weighted(pool, &weight, rng).copied().unwrap_or(1);
        if pity {
            counter = 0;
        }
        pulls.push(Pull { tier, pity });
    }
    SummonPlan {
        pulls,
        pity_counter: counter,
    }
}

/// Charges a planned batch and carries its pity counter over to the player.
pub fn settle_summons(player: &mut Player, plan: &SummonPlan, cost: i32) -> RpgResult<()> {
    if player.grace < cost {
        return Err(RpgError::insufficient("grace", cost as i64, player.grace as i64));
    }
    player.grace -= cost;
    player.pity_counter = plan.pity_counter;
    player.total_summons += plan.pulls.len() as i32;
    Ok(())
}

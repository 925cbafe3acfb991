//! Collection power: `Σ(base_atk × quantity × tier_multiplier)`.

use crate::config::sections::PowerRules;
use crate::database::models::OwnedMaiden;

pub fn tier_multiplier(tier: i32, rules: &PowerRules) -> f64 {
    let idx = (tier.max(1) - 1) as usize;
    rules
        .tier_multipliers
        .get(idx)
        .or(rules.tier_multipliers.last())
        .copied()
        .unwrap_or(1.0)
}

pub fn stack_power(base_atk: i64, quantity: i32, tier: i32, rules: &PowerRules) -> i64 {
    (base_atk as f64 * quantity.max(0) as f64 * tier_multiplier(tier, rules)).round() as i64
}

pub fn total_power(maidens: &[OwnedMaiden], rules: &PowerRules) -> i64 {
    maidens
        .iter()
        .map(|m| stack_power(m.base_atk, m.quantity, m.tier, rules))
        .sum()
}

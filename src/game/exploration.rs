//! Sector exploration: energy costs, progress gain, encounters and miniboss gates.

use crate::config::sections::{ExplorationRules, MAX_TIER};
use crate::error::{RpgError, RpgResult};
use rand::Rng;

pub fn validate_stage(sector: i32, sublevel: i32, rules: &ExplorationRules) -> RpgResult<()> {
    if !(1..=rules.max_sector).contains(&sector) {
        return Err(RpgError::validation(format!(
            "Sectors range from 1 to {}.",
            rules.max_sector
        )));
    }
    if !(1..=rules.sublevels).contains(&sublevel) {
        return Err(RpgError::validation(format!(
            "Sublevels range from 1 to {}.",
            rules.sublevels
        )));
    }
    Ok(())
}

pub fn energy_cost(sector: i32, sublevel: i32, rules: &ExplorationRules) -> i32 {
    rules.base_energy + rules.sector_energy * (sector - 1) + (sublevel - 1)
}

/// Percent progress per exploration; deeper sectors progress slower.
pub fn progress_gain(sector: i32, rules: &ExplorationRules) -> f64 {
    rules.base_progress / (1.0 + rules.progress_decay * (sector - 1) as f64)
}

pub fn explore_rewards(sector: i32, sublevel: i32, rules: &ExplorationRules) -> (i64, i64) {
    let scale = (sector as i64) * 10 + sublevel as i64;
    (
        rules.base_rikis * scale / 10,
        (rules.base_xp * scale / 10).max(1),
    )
}

/// Maiden encounter roll. Returns the tier of the maiden found, if any.
pub fn roll_encounter(sector: i32, rules: &ExplorationRules, rng: &mut impl Rng) -> Option<i32> {
    if !rng.random_bool(rules.encounter_chance.clamp(0.0, 1.0)) {
        return None;
    }
    let max_tier = (sector + 1).clamp(1, MAX_TIER);
    Some(rng.random_range(1..=max_tier))
}

pub fn miniboss_power(sector: i32, sublevel: i32, rules: &ExplorationRules) -> i64 {
    rules.miniboss_power * sector as i64 * sublevel as i64
}

/// The stage unlocked by clearing `(sector, sublevel)`, or `None` after the final one.
pub fn next_stage(sector: i32, sublevel: i32, rules: &ExplorationRules) -> Option<(i32, i32)> {
    if sublevel < rules.sublevels {
        Some((sector, sublevel + 1))
    } else if sector < rules.max_sector {
        Some((sector + 1, 1))
    } else {
        None
    }
}

/// The stage whose miniboss must fall before `(sector, sublevel)` opens.
pub fn previous_stage(sector: i32, sublevel: i32, rules: &ExplorationRules) -> Option<(i32, i32)> {
    if sublevel > 1 {
        Some((sector, sublevel - 1))
    } else if sector > 1 {
        Some((sector - 1, rules.sublevels))
    } else {
        None
    }
}

/// Whether a stage is open given the stages whose miniboss is defeated.
pub fn is_unlocked(
    sector: i32,
    sublevel: i32,
    cleared: &[(i32, i32)],
    rules: &ExplorationRules,
) -> bool {
    match previous_stage(sector, sublevel, rules) {
        None => true,
        Some(prev) => cleared.contains(&prev),
    }
}

/// The first stage whose miniboss is still standing, or `None` when everything is cleared.
pub fn frontier(cleared: &[(i32, i32)], rules: &ExplorationRules) -> Option<(i32, i32)> {
    let mut stage = (1, 1);
    loop {
        if !cleared.contains(&stage) {
            return Some(stage);
        }
        stage = next_stage(stage.0, stage.1, rules)?;
    }
}

/// Miniboss rewards are five explorations' worth.
pub fn miniboss_rewards(sector: i32, sublevel: i32, rules: &ExplorationRules) -> (i64, i64) {
    let (rikis, xp) = explore_rewards(sector, sublevel, rules);
    (rikis * 5, xp * 5)
}

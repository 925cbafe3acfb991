//! Time-based regeneration of energy and stamina.

use crate::config::sections::ResourceRules;
use crate::database::models::Player;
use chrono::{DateTime, Duration, Utc};

/// Regenerates one pool. Returns `(new_value, new_timestamp)`.
///
/// Only whole intervals are consumed so partial progress carries over. A full pool does
/// not bank time: its timestamp is pinned to `now`.
pub fn regen_pool(
    current: i32,
    max: i32,
    updated: DateTime<Utc>,
    now: DateTime<Utc>,
    interval_minutes: i64,
) -> (i32, DateTime<Utc>) {
    if current >= max || interval_minutes <= 0 {
        return (current, now.max(updated));
    }
    let elapsed = (now - updated).num_minutes();
    if elapsed < interval_minutes {
        return (current, updated);
    }
    let ticks = elapsed / interval_minutes;
    let new_value = (current as i64 + ticks).min(max as i64) as i32;
    if new_value >= max {
        (new_value, now)
    } else {
        (new_value, updated + Duration::minutes(ticks * interval_minutes))
    }
}

/// Applies regeneration to both pools. Returns true when anything changed.
pub fn regenerate(player: &mut Player, now: DateTime<Utc>, rules: &ResourceRules) -> bool {
    let (energy, energy_ts) = regen_pool(
        player.energy,
        player.max_energy,
        player.energy_updated,
        now,
        rules.energy_regen_minutes,
    );
    let (stamina, stamina_ts) = regen_pool(
        player.stamina,
        player.max_stamina,
        player.stamina_updated,
        now,
        rules.stamina_regen_minutes,
    );
    let changed = energy != player.energy
        || stamina != player.stamina
        || energy_ts != player.energy_updated
        || stamina_ts != player.stamina_updated;
    player.energy = energy;
    player.energy_updated = energy_ts;
    player.stamina = stamina;
    player.stamina_updated = stamina_ts;
    changed
}

/// Minutes until the next point of a pool, or `None` when it is full.
pub fn minutes_to_next(
    current: i32,
    max: i32,
    updated: DateTime<Utc>,
    now: DateTime<Utc>,
    interval_minutes: i64,
) -> Option<i64> {
    if current >= max {
        return None;
    }
    let elapsed = (now - updated).num_minutes().max(0);
    Some(interval_minutes - elapsed % interval_minutes.max(1))
}

//! Shrine yields, cooldowns and upgrade costs.

use crate::config::sections::{ShrineKind, ShrineRules};
use crate::error::{RpgError, RpgResult};
use chrono::{DateTime, Duration, Utc};

pub fn kind<'a>(rules: &'a ShrineRules, key: &str) -> RpgResult<&'a ShrineKind> {
    rules.kinds.get(key).ok_or_else(|| {
        let known: Vec<&str> = rules.kinds.keys().map(String::as_str).collect();
        RpgError::validation(format!(
            "Unknown shrine `{key}`. Available: {}.",
            known.join(", ")
        ))
    })
}

pub fn shrine_yield(kind: &ShrineKind, level: i32) -> i64 {
    (kind.base_yield * kind.yield_growth.powi(level.max(1) - 1)).round() as i64
}

/// Cost to upgrade from `level` to `level + 1`.
pub fn upgrade_cost(kind: &ShrineKind, level: i32) -> i64 {
    (kind.upgrade_base_cost as f64 * kind.upgrade_growth.powi(level.max(1) - 1)).round() as i64
}

/// Ok when collection is allowed, otherwise the remaining cooldown.
pub fn collect_ready(
    kind: &ShrineKind,
    last_collected: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), Duration> {
    let ready_at = last_collected + Duration::hours(kind.cooldown_hours);
    if now >= ready_at {
        Ok(())
    } else {
        Err(ready_at - now)
    }
}

//! Guild rules: names, capacity, upgrades and rank permissions.

use crate::config::sections::GuildRules;
use crate::database::models::GuildRole;
use crate::error::{RpgError, RpgResult};

pub fn validate_name(name: &str, rules: &GuildRules) -> RpgResult<String> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len < rules.name_min_len || len > rules.name_max_len {
        return Err(RpgError::validation(format!(
            "Guild names must be {} to {} characters long.",
            rules.name_min_len, rules.name_max_len
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_')
    {
        return Err(RpgError::validation(
            "Guild names may only contain letters, numbers, spaces, `-` and `_`.",
        ));
    }
    Ok(trimmed.to_string())
}

pub fn max_members(level: i32, rules: &GuildRules) -> i32 {
    rules.base_members + rules.members_per_level * (level.max(1) - 1)
}

/// Treasury cost to upgrade from `level`.
pub fn upgrade_cost(level: i32, rules: &GuildRules) -> i64 {
    rules.upgrade_cost * level.max(1) as i64
}

impl GuildRole {
    fn rank(&self) -> u8 {
        match self {
            GuildRole::Leader => 2,
            GuildRole::Officer => 1,
            GuildRole::Member => 0,
        }
    }

    pub fn outranks(&self, other: GuildRole) -> bool {
        self.rank() > other.rank()
    }

    pub fn can_upgrade(&self) -> bool {
        matches!(self, GuildRole::Leader | GuildRole::Officer)
    }

    pub fn can_promote(&self) -> bool {
        *self == GuildRole::Leader
    }

    pub fn can_kick(&self, target: GuildRole) -> bool {
        self.can_upgrade() && self.outranks(target)
    }
}

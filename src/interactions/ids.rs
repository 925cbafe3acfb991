//! Centralized custom_id string constants for interaction components.
//! The handler routes on the segment before the first `_`.

// Ascension tower attacks
pub const ASCEND_PREFIX: &str = "ascend_"; // followed by attack key (x1, x5, x20)
pub const ASCEND_REFRESH: &str = "ascend_refresh";

// Summoning
pub const SUMMON_AGAIN_PREFIX: &str = "summon_again_"; // followed by pull count

// Leaderboard tabs
pub const LEADERBOARD_PREFIX: &str = "leaderboard_"; // followed by board key

// Help menu
pub const HELP_SELECT: &str = "help_select_command";

pub fn ascend_attack(key: &str) -> String {
    format!("{ASCEND_PREFIX}{key}")
}

pub fn summon_again(count: i32) -> String {
    format!("{SUMMON_AGAIN_PREFIX}{count}")
}

pub fn leaderboard_tab(key: &str) -> String {
    format!("{LEADERBOARD_PREFIX}{key}")
}

/// Parses the pull count out of a `summon_again_*` id.
pub fn parse_summon_again(id: &str) -> Option<i32> {
    id.strip_prefix(SUMMON_AGAIN_PREFIX)?.parse().ok()
}

/// Parses the attack key out of an `ascend_*` id; `None` for non-attack ids.
pub fn parse_ascend(id: &str) -> Option<&str> {
    id.strip_prefix(ASCEND_PREFIX)
        .filter(|key| *key != "refresh")
}

pub fn parse_leaderboard(id: &str) -> Option<&str> {
    id.strip_prefix(LEADERBOARD_PREFIX)
}

/// Component family a custom_id belongs to.
pub fn family(id: &str) -> &str {
    id.split('_').next().unwrap_or(id)
}

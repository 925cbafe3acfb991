//! Contains the business logic for player progression and leveling.

use crate::config::sections::LevelingRules;
use crate::database::models::Player;

/// XP needed to advance from `level` to `level + 1`: `base × level^exponent`.
pub fn xp_to_next(level: i32, rules: &LevelingRules) -> i64 {
    let needed = rules.base_xp * (level.max(1) as f64).powf(rules.exponent);
    needed.round().max(1.0) as i64
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelUpRewards {
    pub rikis: i64,
    pub grace: i32,
    pub gems: i32,
    pub max_energy: i32,
    pub max_stamina: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpResult {
    pub new_level: i32,
    pub new_experience: i64,
    pub levels_gained: i32,
    pub rewards: LevelUpRewards,
}

impl LevelUpResult {
    pub fn did_level_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Adds XP and resolves any number of level-ups. Experience is stored as progress
/// towards the next level. At `max_level` further XP is discarded.
pub fn apply_experience(
    level: i32,
    experience: i64,
    gained: i64,
    rules: &LevelingRules,
) -> LevelUpResult {
    let mut new_level = level;
    let mut xp = experience + gained.max(0);
    let mut rewards = LevelUpRewards::default();
    let mut levels_gained = 0;

    while new_level < rules.max_level {
        let needed = xp_to_next(new_level, rules);
        if xp < needed {
            break;
        }
        xp -= needed;
        new_level += 1;
        levels_gained += 1;

        rewards.rikis += rules.rikis_per_level;
        rewards.grace += rules.grace_per_level;
        rewards.max_energy += rules.energy_per_level;
        rewards.max_stamina += rules.stamina_per_level;
        if rules.milestone_interval > 0 && new_level % rules.milestone_interval == 0 {
            rewards.gems += rules.milestone_gems;
        }
    }
    if new_level >= rules.max_level {
        xp = 0;
    }

    LevelUpResult {
        new_level,
        new_experience: xp,
        levels_gained,
        rewards,
    }
}

/// Applies a level-up result to a player in memory. Leveling refills energy and stamina.
pub fn apply_to_player(player: &mut Player, result: &LevelUpResult) {
    player.level = result.new_level;
    player.experience = result.new_experience;
    if !result.did_level_up() {
        return;
    }
    let r = result.rewards;
    player.rikis += r.rikis;
    player.grace += r.grace;
    player.gems += r.gems;
    player.max_energy += r.max_energy;
    player.max_stamina += r.max_stamina;
    player.energy = player.energy.max(player.max_energy);
    player.stamina = player.stamina.max(player.max_stamina);
}

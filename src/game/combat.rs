//! Ascension tower combat: enemy scaling, attack resolution and floor rewards.

use crate::config::sections::AscensionRules;
use crate::error::{RpgError, RpgResult};
use rand::Rng;

pub fn is_boss_floor(floor: i32, rules: &AscensionRules) -> bool {
    rules.boss_interval > 0 && floor % rules.boss_interval == 0
}

/// Enemy HP at `floor`: `base_hp × hp_growth^(floor-1)`, boosted on boss floors.
pub fn enemy_hp(floor: i32, rules: &AscensionRules) -> i64 {
    let mut hp = rules.base_hp * rules.hp_growth.powi(floor.max(1) - 1);
    if is_boss_floor(floor, rules) {
        hp *= rules.boss_multiplier;
    }
    hp.round().max(1.0) as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    Single,
    Five,
    Twenty,
}

impl AttackKind {
    pub fn strikes(&self) -> i32 {
        match self {
            AttackKind::Single => 1,
            AttackKind::Five => 5,
            AttackKind::Twenty => 20,
        }
    }

    /// One stamina per strike.
    pub fn stamina_cost(&self) -> i32 {
        self.strikes()
    }

    pub fn key(&self) -> &'static str {
        match self {
            AttackKind::Single => "x1",
            AttackKind::Five => "x5",
            AttackKind::Twenty => "x20",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "x1" | "1" => Some(AttackKind::Single),
            "x5" | "5" => Some(AttackKind::Five),
            "x20" | "20" => Some(AttackKind::Twenty),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    pub damage: i64,
    pub strikes: i32,
    pub crits: i32,
}

/// Each strike deals `power`, critting with `crit_chance` for `crit_multiplier`.
pub fn resolve_attack(
    power: i64,
    kind: AttackKind,
    rules: &AscensionRules,
    rng: &mut impl Rng,
) -> RpgResult<AttackOutcome> {
    if power <= 0 {
        return Err(RpgError::validation(
            "You have no power to attack with. Summon some maidens first!",
        ));
    }
    let chance = rules.crit_chance.clamp(0.0, 1.0);
    let mut damage = 0_i64;
    let mut crits = 0;
    for _ in 0..kind.strikes() {
        if rng.random_bool(chance) {
            crits += 1;
            damage += (power as f64 * rules.crit_multiplier).round() as i64;
        } else {
            damage += power;
        }
    }
    Ok(AttackOutcome {
        damage,
        strikes: kind.strikes(),
        crits,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloorRewards {
    pub rikis: i64,
    pub xp: i64,
    pub gems: i32,
}

pub fn floor_rewards(floor: i32, rules: &AscensionRules) -> FloorRewards {
    FloorRewards {
        rikis: rules.base_rikis * floor as i64,
        xp: rules.base_xp * floor as i64,
        gems: if is_boss_floor(floor, rules) {
            rules.boss_gems
        } else {
            0
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TowerState {
    pub floor: i32,
    pub highest_floor: i32,
    pub enemy_hp: i64,
    pub enemy_max_hp: i64,
}

impl TowerState {
    pub fn fresh(rules: &AscensionRules) -> Self {
        let hp = enemy_hp(1, rules);
        Self {
            floor: 1,
            highest_floor: 0,
            enemy_hp: hp,
            enemy_max_hp: hp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageResult {
    pub state: TowerState,
    /// Set when the enemy fell; holds the rewards for the cleared floor.
    pub cleared: Option<(i32, FloorRewards)>,
}

/// Applies damage to the current enemy. Overkill does not carry to the next floor.
pub fn apply_damage(state: TowerState, damage: i64, rules: &AscensionRules) -> DamageResult {
    let remaining = (state.enemy_hp - damage.max(0)).max(0);
    if remaining > 0 {
        return DamageResult {
            state: TowerState {
                enemy_hp: remaining,
                ..state
            },
            cleared: None,
        };
    }
    let cleared_floor = state.floor;
    let next = cleared_floor + 1;
    let hp = enemy_hp(next, rules);
    DamageResult {
        state: TowerState {
            floor: next,
            highest_floor: state.highest_floor.max(cleared_floor),
            enemy_hp: hp,
            enemy_max_hp: hp,
        },
        cleared: Some((cleared_floor, floor_rewards(cleared_floor, rules))),
    }
}

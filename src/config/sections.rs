//! Typed game-balance sections stored as JSON blobs in `game_config`.
//!
//! Each section's `Default` impl is the hardcoded fallback. Fields missing from a stored
//! blob keep their default value thanks to `#[serde(default)]`, so admins can override a
//! single number without restating the whole section.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_TIER: i32 = 12;

/// A top-level key in `game_config` with a typed shape.
pub trait ConfigSection: DeserializeOwned + Serialize + Default + Send + Sync {
    const KEY: &'static str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelingRules {
    pub base_xp: f64,
    pub exponent: f64,
    pub max_level: i32,
    pub rikis_per_level: i64,
    pub grace_per_level: i32,
    pub energy_per_level: i32,
    pub stamina_per_level: i32,
    pub milestone_interval: i32,
    pub milestone_gems: i32,
}

impl Default for LevelingRules {
    fn default() -> Self {
        Self {
            base_xp: 50.0,
            exponent: 2.0,
            max_level: 500,
            rikis_per_level: 500,
            grace_per_level: 5,
            energy_per_level: 5,
            stamina_per_level: 2,
            milestone_interval: 10,
            milestone_gems: 25,
        }
    }
}

impl ConfigSection for LevelingRules {
    const KEY: &'static str = "leveling";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceRules {
    pub starting_rikis: i64,
    pub starting_grace: i32,
    pub starting_gems: i32,
    pub starting_energy: i32,
    pub starting_stamina: i32,
    pub energy_regen_minutes: i64,
    pub stamina_regen_minutes: i64,
}

impl Default for ResourceRules {
    fn default() -> Self {
        Self {
            starting_rikis: 1_000,
            starting_grace: 10,
            starting_gems: 0,
            starting_energy: 100,
            starting_stamina: 50,
            energy_regen_minutes: 5,
            stamina_regen_minutes: 10,
        }
    }
}

impl ConfigSection for ResourceRules {
    const KEY: &'static str = "resources";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerRules {
    /// Index `tier - 1`.
    pub tier_multipliers: Vec<f64>,
}

impl Default for PowerRules {
    fn default() -> Self {
        Self {
            tier_multipliers: (0..MAX_TIER).map(|i| 1.5_f64.powi(i)).collect(),
        }
    }
}

impl ConfigSection for PowerRules {
    const KEY: &'static str = "power";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionRules {
    /// Success chance in percent, index `tier - 1` (tiers 1..=11).
    pub rates: Vec<f64>,
    pub base_cost: i64,
    pub cost_growth: f64,
    pub max_cost: i64,
    pub shards_per_failure: i32,
    pub shards_for_guarantee: i32,
    /// Keys are two lowercase element names joined by `+` in alphabetical order.
    pub element_combinations: BTreeMap<String, String>,
}

impl Default for FusionRules {
    fn default() -> Self {
        let combos = [
            ("infernal+umbral", "abyssal"),
            ("earth+infernal", "tempest"),
            ("infernal+tempest", "radiant"),
            ("infernal+radiant", "infernal"),
            ("abyssal+infernal", "umbral"),
            ("earth+umbral", "abyssal"),
            ("tempest+umbral", "umbral"),
            ("radiant+umbral", "tempest"),
            ("abyssal+umbral", "abyssal"),
            ("earth+tempest", "earth"),
            ("earth+radiant", "radiant"),
            ("abyssal+earth", "earth"),
            ("radiant+tempest", "radiant"),
            ("abyssal+tempest", "umbral"),
            ("abyssal+radiant", "infernal"),
        ];
        Self {
            rates: vec![
                75.0, 70.0, 65.0, 60.0, 55.0, 50.0, 45.0, 40.0, 35.0, 30.0, 25.0,
            ],
            base_cost: 1_000,
            cost_growth: 2.5,
            max_cost: 5_000_000,
            shards_per_failure: 10,
            shards_for_guarantee: 100,
            element_combinations: combos
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl ConfigSection for FusionRules {
    const KEY: &'static str = "fusion";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GachaRules {
    pub grace_per_summon: i32,
    pub max_batch: i32,
    /// Relative weights, index `tier - 1`.
    pub tier_weights: Vec<f64>,
    /// Player level at which each tier enters the pool, index `tier - 1`.
    pub unlock_levels: Vec<i32>,
    pub pity_threshold: i32,
    pub pity_top_tiers: usize,
}

impl Default for GachaRules {
    fn default() -> Self {
        Self {
            grace_per_summon: 5,
            max_batch: 10,
            tier_weights: vec![
                40.0, 25.0, 15.0, 9.0, 5.0, 3.0, 1.5, 0.8, 0.4, 0.2, 0.07, 0.03,
            ],
            unlock_levels: vec![1, 1, 1, 10, 20, 30, 40, 50, 60, 70, 80, 90],
            pity_threshold: 25,
            pity_top_tiers: 2,
        }
    }
}

impl ConfigSection for GachaRules {
    const KEY: &'static str = "gacha";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AscensionRules {
    pub base_hp: f64,
    pub hp_growth: f64,
    pub boss_interval: i32,
    pub boss_multiplier: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub base_rikis: i64,
    pub base_xp: i64,
    pub boss_gems: i32,
}

impl Default for AscensionRules {
    fn default() -> Self {
        Self {
            base_hp: 1_000.0,
            hp_growth: 1.10,
            boss_interval: 10,
            boss_multiplier: 3.0,
            crit_chance: 0.05,
            crit_multiplier: 1.5,
            base_rikis: 50,
            base_xp: 10,
            boss_gems: 10,
        }
    }
}

impl ConfigSection for AscensionRules {
    const KEY: &'static str = "ascension";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorationRules {
    pub max_sector: i32,
    pub sublevels: i32,
    pub base_energy: i32,
    pub sector_energy: i32,
    pub base_progress: f64,
    pub progress_decay: f64,
    pub base_rikis: i64,
    pub base_xp: i64,
    pub encounter_chance: f64,
    pub miniboss_power: i64,
}

impl Default for ExplorationRules {
    fn default() -> Self {
        Self {
            max_sector: 7,
            sublevels: 9,
            base_energy: 5,
            sector_energy: 2,
            base_progress: 7.0,
            progress_decay: 0.5,
            base_rikis: 40,
            base_xp: 6,
            encounter_chance: 0.08,
            miniboss_power: 500,
        }
    }
}

impl ConfigSection for ExplorationRules {
    const KEY: &'static str = "exploration";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShrineYield {
    Rikis,
    Grace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShrineKind {
    pub display_name: String,
    pub yields: ShrineYield,
    pub build_cost: i64,
    pub cooldown_hours: i64,
    pub base_yield: f64,
    pub yield_growth: f64,
    pub upgrade_base_cost: i64,
    pub upgrade_growth: f64,
    pub max_level: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShrineRules {
    pub kinds: BTreeMap<String, ShrineKind>,
}

impl Default for ShrineRules {
    fn default() -> Self {
        let mut kinds = BTreeMap::new();
        kinds.insert(
            "lesser".to_string(),
            ShrineKind {
                display_name: "Lesser Shrine".to_string(),
                yields: ShrineYield::Rikis,
                build_cost: 5_000,
                cooldown_hours: 4,
                base_yield: 400.0,
                yield_growth: 1.25,
                upgrade_base_cost: 10_000,
                upgrade_growth: 1.8,
                max_level: 12,
            },
        );
        kinds.insert(
            "radiant".to_string(),
            ShrineKind {
                display_name: "Radiant Shrine".to_string(),
                yields: ShrineYield::Grace,
                build_cost: 25_000,
                cooldown_hours: 12,
                base_yield: 3.0,
                yield_growth: 1.2,
                upgrade_base_cost: 40_000,
                upgrade_growth: 2.0,
                max_level: 12,
            },
        );
        Self { kinds }
    }
}

impl ConfigSection for ShrineRules {
    const KEY: &'static str = "shrines";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyRules {
    pub rikis: i64,
    pub grace: i32,
    pub streak_bonus: i64,
    pub max_streak_bonus: i64,
    pub weekly_gems: i32,
}

impl Default for DailyRules {
    fn default() -> Self {
        Self {
            rikis: 1_000,
            grace: 5,
            streak_bonus: 100,
            max_streak_bonus: 1_000,
            weekly_gems: 10,
        }
    }
}

impl ConfigSection for DailyRules {
    const KEY: &'static str = "daily";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildRules {
    pub creation_cost: i64,
    pub base_members: i32,
    pub members_per_level: i32,
    pub upgrade_cost: i64,
    pub max_level: i32,
    pub name_min_len: usize,
    pub name_max_len: usize,
}

impl Default for GuildRules {
    fn default() -> Self {
        Self {
            creation_cost: 50_000,
            base_members: 10,
            members_per_level: 2,
            upgrade_cost: 100_000,
            max_level: 20,
            name_min_len: 3,
            name_max_len: 32,
        }
    }
}

impl ConfigSection for GuildRules {
    const KEY: &'static str = "guilds";
}

/// Every section at its default value, keyed the way `game_config` stores them.
pub fn defaults_document() -> serde_json::Value {
    fn put<T: ConfigSection>(doc: &mut serde_json::Map<String, serde_json::Value>) {
        // Plain structs of numbers, strings and maps always serialize.
        if let Ok(v) = serde_json::to_value(T::default()) {
            doc.insert(T::KEY.to_string(), v);
        }
    }
    let mut doc = serde_json::Map::new();
    put::<LevelingRules>(&mut doc);
    put::<ResourceRules>(&mut doc);
    put::<PowerRules>(&mut doc);
    put::<FusionRules>(&mut doc);
    put::<GachaRules>(&mut doc);
    put::<AscensionRules>(&mut doc);
    put::<ExplorationRules>(&mut doc);
    put::<ShrineRules>(&mut doc);
    put::<DailyRules>(&mut doc);
    put::<GuildRules>(&mut doc);
    serde_json::Value::Object(doc)
}

/// Checks that `value` still reads as the typed section stored under `key`.
/// Keys without a typed section are accepted as they are.
pub fn validate_section(key: &str, value: &serde_json::Value) -> Result<(), serde_json::Error> {
    fn check<T: ConfigSection>(
        key: &str,
        value: &serde_json::Value,
    ) -> Option<Result<(), serde_json::Error>> {
        (key == T::KEY).then(|| serde_json::from_value::<T>(value.clone()).map(drop))
    }
    check::<LevelingRules>(key, value)
        .or_else(|| check::<ResourceRules>(key, value))
        .or_else(|| check::<PowerRules>(key, value))
        .or_else(|| check::<FusionRules>(key, value))
        .or_else(|| check::<GachaRules>(key, value))
        .or_else(|| check::<AscensionRules>(key, value))
        .or_else(|| check::<ExplorationRules>(key, value))
        .or_else(|| check::<ShrineRules>(key, value))
        .or_else(|| check::<DailyRules>(key, value))
        .or_else(|| check::<GuildRules>(key, value))
        .unwrap_or(Ok(()))
}

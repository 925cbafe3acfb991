//! Contains all the data structures that map to database tables or query results.

use serde::{Deserialize, Serialize};
use sqlx::Type;
use sqlx::types::Json;
use sqlx::types::chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Type, Serialize, Deserialize)]
#[sqlx(type_name = "element_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Infernal,
    Umbral,
    Earth,
    Tempest,
    Radiant,
    Abyssal,
}

impl Element {
    pub const ALL: [Element; 6] = [
        Element::Infernal,
        Element::Umbral,
        Element::Earth,
        Element::Tempest,
        Element::Radiant,
        Element::Abyssal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Infernal => "infernal",
            Element::Umbral => "umbral",
            Element::Earth => "earth",
            Element::Tempest => "tempest",
            Element::Radiant => "radiant",
            Element::Abyssal => "abyssal",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Element::Infernal => "Infernal",
            Element::Umbral => "Umbral",
            Element::Earth => "Earth",
            Element::Tempest => "Tempest",
            Element::Radiant => "Radiant",
            Element::Abyssal => "Abyssal",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Element {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::ALL
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(type_name = "guild_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GuildRole {
    Leader,
    Officer,
    Member,
}

impl GuildRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuildRole::Leader => "Leader",
            GuildRole::Officer => "Officer",
            GuildRole::Member => "Member",
        }
    }
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Player {
    pub discord_id: i64,
    pub username: String,
    pub level: i32,
    pub experience: i64,
    pub rikis: i64,
    pub grace: i32,
    pub gems: i32,
    pub energy: i32,
    pub max_energy: i32,
    pub stamina: i32,
    pub max_stamina: i32,
    pub energy_updated: DateTime<Utc>,
    pub stamina_updated: DateTime<Utc>,
    pub total_power: i64,
    pub pity_counter: i32,
    pub total_summons: i32,
    /// Fusion shards keyed by tier (as a string, JSON object keys).
    pub fusion_shards: Json<BTreeMap<String, i32>>,
    pub daily_streak: i32,
    pub last_daily: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Player {
    pub fn shards_for_tier(&self, tier: i32) -> i32 {
        self.fusion_shards
            .get(&tier.to_string())
            .copied()
            .unwrap_or(0)
    }

    pub fn add_shards(&mut self, tier: i32, amount: i32) {
        let entry = self.fusion_shards.0.entry(tier.to_string()).or_insert(0);
        *entry = (*entry + amount).max(0);
    }
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct MaidenBase {
    pub id: i32,
    pub name: String,
    pub element: Element,
    pub base_atk: i64,
    pub base_def: i64,
    pub rarity_weight: f64,
    pub description: Option<String>,
}

/// An owned maiden stack joined with its catalogue entry.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct OwnedMaiden {
    pub id: i64,
    pub player_id: i64,
    pub maiden_base_id: i32,
    pub tier: i32,
    pub quantity: i32,
    pub times_fused: i32,
    pub acquired_at: DateTime<Utc>,
    pub name: String,
    pub element: Element,
    pub base_atk: i64,
    pub base_def: i64,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Guild {
    pub id: i32,
    pub name: String,
    pub leader_id: i64,
    pub level: i32,
    pub treasury: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct GuildMember {
    pub player_id: i64,
    pub guild_id: i32,
    pub role: GuildRole,
    pub contribution: i64,
    pub joined_at: DateTime<Utc>,
    pub username: String,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Shrine {
    pub id: i32,
    pub player_id: i64,
    pub shrine_type: String,
    pub level: i32,
    pub last_collected: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct AscensionProgress {
    pub player_id: i64,
    pub current_floor: i32,
    pub highest_floor: i32,
    pub enemy_hp: i64,
    pub enemy_max_hp: i64,
    pub total_attacks: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct SectorProgress {
    pub player_id: i64,
    pub sector: i32,
    pub sublevel: i32,
    pub progress: f64,
    pub miniboss_defeated: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct LeaderboardEntry {
    pub discord_id: i64,
    pub username: String,
    pub score: i64,
}

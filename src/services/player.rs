//! Registration, profile and collection views, plus the XP/power helpers shared by
//! every service that rewards a player.

use super::{player_id, publish};
use crate::AppState;
use crate::config::sections::{LevelingRules, PowerRules, ResourceRules};
use crate::database::models::{GuildRole, OwnedMaiden, Player};
use crate::database::{ascension, guilds, ledger, maidens, players};
use crate::error::RpgResult;
use crate::game::{leveling, power, resources};
use chrono::Utc;
use serde_json::json;
use serenity::model::id::UserId;
use sqlx::{Postgres, Transaction};
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Adds XP to a player in memory and returns what happened.
pub fn grant_xp(player: &mut Player, xp: i64, rules: &LevelingRules) -> leveling::LevelUpResult {
    let result = leveling::apply_experience(player.level, player.experience, xp, rules);
    leveling::apply_to_player(player, &result);
    result
}

/// Recomputes `total_power` from the player's current stacks.
pub async fn refresh_power(
    tx: &mut Transaction<'_, Postgres>,
    player: &mut Player,
    rules: &PowerRules,
) -> RpgResult<i64> {
    let owned = maidens::player_maidens(tx, player.discord_id).await?;
    player.total_power = power::total_power(&owned, rules);
    Ok(player.total_power)
}

/// Publishes `player.level_up` when a reward crossed at least one level.
pub async fn announce_level_up(
    state: &AppState,
    user: UserId,
    result: Option<&leveling::LevelUpResult>,
) {
    let Some(r) = result.filter(|r| r.did_level_up()) else {
        return;
    };
    publish(
        state,
        "player.level_up",
        json!({
            "player_id": user.get(),
            "level": r.new_level,
            "levels_gained": r.levels_gained,
            "gems": r.rewards.gems,
        }),
    )
    .await;
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub player: Player,
    pub created: bool,
}

#[instrument(level = "info", skip(state), fields(user_id = user.get()))]
pub async fn register(state: &AppState, user: UserId, username: &str) -> RpgResult<Registration> {
    let rules = state.config.section::<ResourceRules>().await;
    let rules = &rules;
    let reg = state
        .db
        .retrying("player.register", move || register_once(state, user, username, rules))
        .await?;
    if reg.created {
        info!(target = "player", user_id = user.get(), "new player registered");
        publish(
            state,
            "player.registered",
            json!({ "player_id": user.get(), "username": username }),
        )
        .await;
    }
    Ok(reg)
}

async fn register_once(
    state: &AppState,
    user: UserId,
    username: &str,
    rules: &ResourceRules,
) -> RpgResult<Registration> {
    let pid = player_id(user);
    let mut tx = state.db.begin().await?;
    let reg = match players::create_player(&mut tx, pid, username, rules).await? {
        Some(player) => {
            ledger::record(
                &mut tx,
                pid,
                "register",
                json!({ "rikis": rules.starting_rikis, "grace": rules.starting_grace }),
            )
            .await?;
            Registration {
                player,
                created: true,
            }
        }
        None => Registration {
            player: players::get_player(&mut tx, pid).await?,
            created: false,
        },
    };
    tx.commit().await?;
    Ok(reg)
}

#[derive(Debug, Clone)]
pub struct ProfileView {
    pub player: Player,
    pub xp_to_next: i64,
    pub maiden_count: i64,
    pub highest_floor: i32,
    pub guild: Option<(String, GuildRole)>,
    pub energy_next_in: Option<i64>,
    pub stamina_next_in: Option<i64>,
}

/// Read-only profile; regeneration and power are computed, not persisted.
#[instrument(level = "debug", skip(state), fields(user_id = user.get()))]
pub async fn profile(state: &AppState, user: UserId) -> RpgResult<ProfileView> {
    let leveling_rules = state.config.section::<LevelingRules>().await;
    let resource_rules = state.config.section::<ResourceRules>().await;
    let power_rules = state.config.section::<PowerRules>().await;
    let (leveling_rules, resource_rules, power_rules) =
        (&leveling_rules, &resource_rules, &power_rules);
    state
        .db
        .retrying("player.profile", move || async move {
            let pid = player_id(user);
            let now = Utc::now();
            let mut tx = state.db.begin_read_only().await?;
            let mut player = players::get_player(&mut tx, pid).await?;
            resources::regenerate(&mut player, now, resource_rules);
            let owned = maidens::player_maidens(&mut tx, pid).await?;
            player.total_power = power::total_power(&owned, power_rules);
            let guild = match guilds::membership(&mut tx, pid).await? {
                Some(m) => Some((guilds::get_guild(&mut tx, m.guild_id).await?.name, m.role)),
                None => None,
            };
            let highest_floor = ascension::highest_floor(&mut tx, pid).await?;
            tx.commit().await?;
            Ok(ProfileView {
                xp_to_next: leveling::xp_to_next(player.level, leveling_rules),
                maiden_count: owned.iter().map(|m| m.quantity as i64).sum(),
                highest_floor,
                guild,
                energy_next_in: resources::minutes_to_next(
                    player.energy,
                    player.max_energy,
                    player.energy_updated,
                    now,
                    resource_rules.energy_regen_minutes,
                ),
                stamina_next_in: resources::minutes_to_next(
                    player.stamina,
                    player.max_stamina,
                    player.stamina_updated,
                    now,
                    resource_rules.stamina_regen_minutes,
                ),
                player,
            })
        })
        .await
}

#[derive(Debug, Clone)]
pub struct CollectionView {
    pub maidens: Vec<OwnedMaiden>,
    pub total_power: i64,
    pub shards: BTreeMap<String, i32>,
}

#[instrument(level = "debug", skip(state), fields(user_id = user.get()))]
pub async fn collection(state: &AppState, user: UserId) -> RpgResult<CollectionView> {
    let power_rules = state.config.section::<PowerRules>().await;
    let power_rules = &power_rules;
    state
        .db
        .retrying("player.collection", move || async move {
            let pid = player_id(user);
            let mut tx = state.db.begin_read_only().await?;
            let player = players::get_player(&mut tx, pid).await?;
            let owned = maidens::player_maidens(&mut tx, pid).await?;
            tx.commit().await?;
            Ok(CollectionView {
                total_power: power::total_power(&owned, power_rules),
                maidens: owned,
                shards: player.fusion_shards.0,
            })
        })
        .await
}

//! Ascension tower attacks.

use super::player::{announce_level_up, grant_xp, refresh_power};
use super::{player_id, publish};
use crate::AppState;
use crate::config::sections::{AscensionRules, LevelingRules, PowerRules, ResourceRules};
use crate::database::{ascension, ledger, players};
use crate::error::{RpgError, RpgResult};
use crate::game::combat::{self, AttackKind, AttackOutcome, FloorRewards, TowerState};
use crate::game::leveling::LevelUpResult;
use crate::game::resources;
use chrono::Utc;
use serde_json::json;
use serenity::model::id::UserId;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct AttackReport {
    pub kind: AttackKind,
    pub outcome: AttackOutcome,
    pub power: i64,
    pub stamina_left: i32,
    pub max_stamina: i32,
    /// Tower state after the attack.
    pub tower: TowerState,
    pub boss_floor: bool,
    pub cleared: Option<(i32, FloorRewards)>,
    pub level_up: Option<LevelUpResult>,
}

struct Rules {
    ascension: AscensionRules,
    leveling: LevelingRules,
    power: PowerRules,
    resources: ResourceRules,
}

/// Current tower state without attacking; creates the row on first visit.
#[instrument(level = "debug", skip(state), fields(user_id = user.get()))]
pub async fn status(state: &AppState, user: UserId) -> RpgResult<(TowerState, i32, i32)> {
    let rules: AscensionRules = state.config.section().await;
    let resource_rules: ResourceRules = state.config.section().await;
    let (rules, resource_rules) = (&rules, &resource_rules);
    state
        .db
        .retrying("ascension.status", move || async move {
            let pid = player_id(user);
            let mut tx = state.db.begin().await?;
            let mut player = players::lock_player(&mut tx, pid).await?;
            if resources::regenerate(&mut player, Utc::now(), resource_rules) {
                players::save_player(&mut tx, &player).await?;
            }
            let row = ascension::lock_or_create(&mut tx, pid, TowerState::fresh(rules)).await?;
            tx.commit().await?;
            Ok((
                TowerState {
                    floor: row.current_floor,
                    highest_floor: row.highest_floor,
                    enemy_hp: row.enemy_hp,
                    enemy_max_hp: row.enemy_max_hp,
                },
                player.stamina,
                player.max_stamina,
            ))
        })
        .await
}

#[instrument(level = "info", skip(state), fields(user_id = user.get(), kind = kind.key()))]
pub async fn attack(state: &AppState, user: UserId, kind: AttackKind) -> RpgResult<AttackReport> {
    let rules = Rules {
        ascension: state.config.section().await,
        leveling: state.config.section().await,
        power: state.config.section().await,
        resources: state.config.section().await,
    };
    let rules = &rules;
    let report = state
        .db
        .retrying("ascension.attack", move || attack_once(state, user, kind, rules))
        .await?;

    publish(
        state,
        "ascension.attack",
        json!({
            "player_id": user.get(),
            "strikes": report.outcome.strikes,
            "damage": report.outcome.damage,
            "crits": report.outcome.crits,
            "floor": report.tower.floor,
        }),
    )
    .await;
    if let Some((floor, rewards)) = report.cleared {
        publish(
            state,
            "ascension.floor_cleared",
            json!({
                "player_id": user.get(),
                "floor": floor,
                "boss": combat::is_boss_floor(floor, &rules.ascension),
                "rikis": rewards.rikis,
                "xp": rewards.xp,
                "gems": rewards.gems,
            }),
        )
        .await;
        state.invalidate_leaderboards().await;
    }
    announce_level_up(state, user, report.level_up.as_ref()).await;
    Ok(report)
}

async fn attack_once(
    state: &AppState,
    user: UserId,
    kind: AttackKind,
    rules: &Rules,
) -> RpgResult<AttackReport> {
    let pid = player_id(user);
    let mut tx = state.db.begin().await?;
    let mut player = players::lock_player(&mut tx, pid).await?;
    resources::regenerate(&mut player, Utc::now(), &rules.resources);

    let cost = kind.stamina_cost();
    if player.stamina < cost {
        return Err(RpgError::insufficient(
            "stamina",
            cost as i64,
            player.stamina as i64,
        ));
    }
    let power = refresh_power(&mut tx, &mut player, &rules.power).await?;
    let row =
        ascension::lock_or_create(&mut tx, pid, TowerState::fresh(&rules.ascension)).await?;
    let tower = TowerState {
        floor: row.current_floor,
        highest_floor: row.highest_floor,
        enemy_hp: row.enemy_hp,
        enemy_max_hp: row.enemy_max_hp,
    };
    let boss_floor = combat::is_boss_floor(tower.floor, &rules.ascension);

    let outcome = {
        let mut rng = rand::rng();
        combat::resolve_attack(power, kind, &rules.ascension, &mut rng)?
    };
    let result = combat::apply_damage(tower, outcome.damage, &rules.ascension);

    // A full pool was pinned to now by `regenerate`, so regen counts from this spend.
    player.stamina -= cost;
    let mut level_up = None;
    if let Some((_, rewards)) = result.cleared {
        player.rikis += rewards.rikis;
        player.gems += rewards.gems;
        level_up = Some(grant_xp(&mut player, rewards.xp, &rules.leveling));
    }

    ascension::save(&mut tx, pid, &result.state, outcome.strikes as i64).await?;
    players::save_player(&mut tx, &player).await?;
    if let Some((floor, rewards)) = result.cleared {
        ledger::record(
            &mut tx,
            pid,
            "ascension_clear",
            json!({ "floor": floor, "rikis": rewards.rikis, "gems": rewards.gems, "xp": rewards.xp }),
        )
        .await?;
    }
    tx.commit().await?;

    Ok(AttackReport {
        kind,
        outcome,
        power,
        stamina_left: player.stamina,
        max_stamina: player.max_stamina,
        tower: result.state,
        boss_floor,
        cleared: result.cleared,
        level_up,
    })
}

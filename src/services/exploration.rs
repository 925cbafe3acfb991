//! Sector exploration and miniboss challenges.

use super::player::{announce_level_up, grant_xp, refresh_power};
use super::{player_id, publish};
use crate::AppState;
use crate::config::sections::{ExplorationRules, LevelingRules, PowerRules, ResourceRules};
use crate::database::models::{Element, SectorProgress};
use crate::database::{exploration, ledger, maidens, players};
use crate::error::{RpgError, RpgResult};
use crate::game::exploration as rules_fn;
use crate::game::leveling::LevelUpResult;
use crate::game::{gacha, resources};
use chrono::Utc;
use serde_json::json;
use serenity::model::id::UserId;
use tracing::instrument;

struct Rules {
    exploration: ExplorationRules,
    leveling: LevelingRules,
    power: PowerRules,
    resources: ResourceRules,
}

async fn load_rules(state: &AppState) -> Rules {
    Rules {
        exploration: state.config.section().await,
        leveling: state.config.section().await,
        power: state.config.section().await,
        resources: state.config.section().await,
    }
}

#[derive(Debug, Clone)]
pub struct Encounter {
    pub name: String,
    pub element: Element,
    pub tier: i32,
}

#[derive(Debug, Clone)]
pub struct ExploreReport {
    pub sector: i32,
    pub sublevel: i32,
    pub energy_spent: i32,
    pub energy_left: i32,
    pub max_energy: i32,
    pub progress: f64,
    pub progress_gained: f64,
    pub rikis: i64,
    pub xp: i64,
    pub encounter: Option<Encounter>,
    pub miniboss_ready: bool,
    pub level_up: Option<LevelUpResult>,
}

#[instrument(level = "info", skip(state), fields(user_id = user.get()))]
pub async fn explore(
    state: &AppState,
    user: UserId,
    sector: i32,
    sublevel: i32,
) -> RpgResult<ExploreReport> {
    let rules = load_rules(state).await;
    rules_fn::validate_stage(sector, sublevel, &rules.exploration)?;
    let catalogue = maidens::all_bases(state.db.pool()).await?;
    let (rules, catalogue) = (&rules, catalogue.as_slice());
    let report = state
        .db
        .retrying("exploration.explore", move || async move {
            let pid = player_id(user);
            let mut tx = state.db.begin().await?;
            let mut player = players::lock_player(&mut tx, pid).await?;
            resources::regenerate(&mut player, Utc::now(), &rules.resources);

            let cleared = exploration::cleared_stages(&mut tx, pid).await?;
            if !rules_fn::is_unlocked(sector, sublevel, &cleared, &rules.exploration) {
                let (ps, pl) = rules_fn::previous_stage(sector, sublevel, &rules.exploration)
                    .unwrap_or((1, 1));
                return Err(RpgError::validation(format!(
                    "Sector {sector}-{sublevel} is locked. Defeat the miniboss of {ps}-{pl} first."
                )));
            }
            let cost = rules_fn::energy_cost(sector, sublevel, &rules.exploration);
            if player.energy < cost {
                return Err(RpgError::insufficient(
                    "energy",
                    cost as i64,
                    player.energy as i64,
                ));
            }

            let mut progress = exploration::lock_or_create(&mut tx, pid, sector, sublevel).await?;
            let before = progress.progress;
            progress.progress =
                (before + rules_fn::progress_gain(sector, &rules.exploration)).min(100.0);
            let (rikis, xp) = rules_fn::explore_rewards(sector, sublevel, &rules.exploration);

            let found = {
                let mut rng = rand::rng();
                rules_fn::roll_encounter(sector, &rules.exploration, &mut rng).and_then(|tier| {
                    gacha::pick_weighted(catalogue, |b| b.rarity_weight, &mut rng)
                        .map(|base| (base, tier))
                })
            };

            player.energy -= cost;
            player.rikis += rikis;
            let level_up = grant_xp(&mut player, xp, &rules.leveling);
            let mut encounter = None;
            if let Some((base, tier)) = found {
                maidens::add_maiden(&mut tx, pid, base.id, tier, 1).await?;
                refresh_power(&mut tx, &mut player, &rules.power).await?;
                encounter = Some(Encounter {
                    name: base.name.clone(),
                    element: base.element,
                    tier,
                });
            }

            exploration::save(&mut tx, &progress).await?;
            players::save_player(&mut tx, &player).await?;
            ledger::record(
                &mut tx,
                pid,
                "explore",
                json!({
                    "sector": sector,
                    "sublevel": sublevel,
                    "energy": -cost,
                    "rikis": rikis,
                    "xp": xp,
                    "maiden_tier": encounter.as_ref().map(|e| e.tier),
                }),
            )
            .await?;
            tx.commit().await?;

            Ok(ExploreReport {
                sector,
                sublevel,
                energy_spent: cost,
                energy_left: player.energy,
                max_energy: player.max_energy,
                progress: progress.progress,
                progress_gained: progress.progress - before,
                rikis,
                xp,
                encounter,
                miniboss_ready: progress.progress >= 100.0 && !progress.miniboss_defeated,
                level_up: Some(level_up),
            })
        })
        .await?;

    publish(
        state,
        "exploration.explored",
        json!({
            "player_id": user.get(),
            "sector": sector,
            "sublevel": sublevel,
            "progress": report.progress,
            "encounter_tier": report.encounter.as_ref().map(|e| e.tier),
        }),
    )
    .await;
    announce_level_up(state, user, report.level_up.as_ref()).await;
    Ok(report)
}

#[derive(Debug, Clone)]
pub struct MinibossReport {
    pub sector: i32,
    pub sublevel: i32,
    pub victory: bool,
    pub power: i64,
    pub required: i64,
    pub unlocked: Option<(i32, i32)>,
    pub rikis: i64,
    pub xp: i64,
    pub level_up: Option<LevelUpResult>,
}

/// Challenges a miniboss. Without an explicit stage, targets the player's frontier.
#[instrument(level = "info", skip(state), fields(user_id = user.get()))]
pub async fn miniboss(
    state: &AppState,
    user: UserId,
    stage: Option<(i32, i32)>,
) -> RpgResult<MinibossReport> {
    let rules = load_rules(state).await;
    if let Some((sector, sublevel)) = stage {
        rules_fn::validate_stage(sector, sublevel, &rules.exploration)?;
    }
    let rules = &rules;
    let report = state
        .db
        .retrying("exploration.miniboss", move || async move {
            let pid = player_id(user);
            let mut tx = state.db.begin().await?;
            let mut player = players::lock_player(&mut tx, pid).await?;
            let cleared = exploration::cleared_stages(&mut tx, pid).await?;
            let (sector, sublevel) = match stage {
                Some(s) => s,
                None => rules_fn::frontier(&cleared, &rules.exploration).ok_or_else(|| {
                    RpgError::validation("Every miniboss has already fallen. Well done!")
                })?,
            };
            if !rules_fn::is_unlocked(sector, sublevel, &cleared, &rules.exploration) {
                return Err(RpgError::validation(format!(
                    "Sector {sector}-{sublevel} is still locked."
                )));
            }
            let mut progress: SectorProgress =
                exploration::lock_or_create(&mut tx, pid, sector, sublevel).await?;
            if progress.miniboss_defeated {
                return Err(RpgError::validation(format!(
                    "The miniboss of {sector}-{sublevel} is already defeated."
                )));
            }
            if progress.progress < 100.0 {
                return Err(RpgError::validation(format!(
                    "Explore {sector}-{sublevel} fully first ({:.1}% / 100%).",
                    progress.progress
                )));
            }

            let power = refresh_power(&mut tx, &mut player, &rules.power).await?;
            let required = rules_fn::miniboss_power(sector, sublevel, &rules.exploration);
            let victory = power >= required;
            let (mut rikis, mut xp, mut level_up, mut unlocked) = (0, 0, None, None);
            if victory {
                (rikis, xp) = rules_fn::miniboss_rewards(sector, sublevel, &rules.exploration);
                player.rikis += rikis;
                level_up = Some(grant_xp(&mut player, xp, &rules.leveling));
                progress.miniboss_defeated = true;
                unlocked = rules_fn::next_stage(sector, sublevel, &rules.exploration);
                exploration::save(&mut tx, &progress).await?;
                ledger::record(
                    &mut tx,
                    pid,
                    "miniboss",
                    json!({ "sector": sector, "sublevel": sublevel, "rikis": rikis, "xp": xp }),
                )
                .await?;
            }
            players::save_player(&mut tx, &player).await?;
            tx.commit().await?;
            Ok(MinibossReport {
                sector,
                sublevel,
                victory,
                power,
                required,
                unlocked,
                rikis,
                xp,
                level_up,
            })
        })
        .await?;

    publish(
        state,
        "exploration.miniboss",
        json!({
            "player_id": user.get(),
            "sector": report.sector,
            "sublevel": report.sublevel,
            "victory": report.victory,
        }),
    )
    .await;
    announce_level_up(state, user, report.level_up.as_ref()).await;
    Ok(report)
}

/// Stage overview for the explore menu.
pub async fn overview(state: &AppState, user: UserId) -> RpgResult<Vec<SectorProgress>> {
    state
        .db
        .retrying("exploration.overview", move || async move {
            let mut tx = state.db.begin_read_only().await?;
            let rows = exploration::all_progress(&mut tx, player_id(user)).await?;
            tx.commit().await?;
            Ok(rows)
        })
        .await
}

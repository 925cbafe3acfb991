//! Guild lifecycle, treasury and rank management.

use super::{player_id, publish};
use crate::AppState;
use crate::config::sections::GuildRules;
use crate::database::models::{Guild, GuildMember, GuildRole};
use crate::database::{guilds, ledger, players};
use crate::error::{RpgError, RpgResult};
use crate::game::guild as calc;
use serde_json::json;
use serenity::model::id::UserId;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct GuildInfo {
    pub guild: Guild,
    pub members: Vec<GuildMember>,
    pub max_members: i32,
    /// `None` at max level.
    pub upgrade_cost: Option<i64>,
}

#[instrument(level = "info", skip(state), fields(user_id = user.get()))]
pub async fn create(state: &AppState, user: UserId, name: &str) -> RpgResult<Guild> {
    let rules: GuildRules = state.config.section().await;
    let name = calc::validate_name(name, &rules)?;
    let (rules, name_ref) = (&rules, name.as_str());
    let guild = state
        .db
        .retrying("guild.create", move || async move {
            let pid = player_id(user);
            let mut tx = state.db.begin().await?;
            let mut player = players::lock_player(&mut tx, pid).await?;
            if guilds::membership(&mut tx, pid).await?.is_some() {
                return Err(RpgError::validation("Leave your current guild first."));
            }
            if guilds::find_by_name(&mut tx, name_ref).await?.is_some() {
                return Err(RpgError::validation(format!(
                    "The name **{name_ref}** is already taken."
                )));
            }
            if player.rikis < rules.creation_cost {
                return Err(RpgError::insufficient(
                    "rikis",
                    rules.creation_cost,
                    player.rikis,
                ));
            }
            player.rikis -= rules.creation_cost;
            players::save_player(&mut tx, &player).await?;
            let guild = guilds::create_guild(&mut tx, name_ref, pid).await?;
            ledger::record(
                &mut tx,
                pid,
                "guild_create",
                json!({ "guild_id": guild.id, "rikis": -rules.creation_cost }),
            )
            .await?;
            tx.commit().await?;
            Ok(guild)
        })
        .await?;
    publish(
        state,
        "guild.created",
        json!({ "player_id": user.get(), "guild_id": guild.id, "name": guild.name }),
    )
    .await;
    Ok(guild)
}

#[instrument(level = "info", skip(state), fields(user_id = user.get()))]
pub async fn join(state: &AppState, user: UserId, name: &str) -> RpgResult<Guild> {
    let rules: GuildRules = state.config.section().await;
    let rules = &rules;
    let guild = state
        .db
        .retrying("guild.join", move || async move {
            let pid = player_id(user);
            let mut tx = state.db.begin().await?;
            players::lock_player(&mut tx, pid).await?;
            if guilds::membership(&mut tx, pid).await?.is_some() {
                return Err(RpgError::validation("You are already in a guild."));
            }
            let guild = guilds::find_by_name(&mut tx, name.trim())
                .await?
                .ok_or_else(|| RpgError::not_found(format!("a guild named **{}**", name.trim())))?;
            let count = guilds::member_count(&mut tx, guild.id).await?;
            let cap = calc::max_members(guild.level, rules);
            if count >= cap as i64 {
                return Err(RpgError::validation(format!(
                    "**{}** is full ({count}/{cap}).",
                    guild.name
                )));
            }
            guilds::add_member(&mut tx, guild.id, pid, GuildRole::Member).await?;
            tx.commit().await?;
            Ok(guild)
        })
        .await?;
    publish(
        state,
        "guild.joined",
        json!({ "player_id": user.get(), "guild_id": guild.id }),
    )
    .await;
    Ok(guild)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    Left,
    Disbanded,
}

#[instrument(level = "info", skip(state), fields(user_id = user.get()))]
pub async fn leave(state: &AppState, user: UserId) -> RpgResult<(String, LeaveOutcome)> {
    let (name, outcome, guild_id) = state
        .db
        .retrying("guild.leave", move || async move {
            let pid = player_id(user);
            let mut tx = state.db.begin().await?;
            let member = guilds::require_membership(&mut tx, pid).await?;
            let guild = guilds::lock_guild(&mut tx, member.guild_id).await?;
            let outcome = if member.role == GuildRole::Leader {
                if guilds::member_count(&mut tx, guild.id).await? > 1 {
                    return Err(RpgError::validation(
                        "Leaders cannot leave while members remain. Kick everyone or pass leadership first.",
                    ));
                }
                guilds::remove_member(&mut tx, pid).await?;
                guilds::delete_guild(&mut tx, guild.id).await?;
                LeaveOutcome::Disbanded
            } else {
                guilds::remove_member(&mut tx, pid).await?;
                LeaveOutcome::Left
            };
            tx.commit().await?;
            Ok((guild.name, outcome, guild.id))
        })
        .await?;
    let topic = match outcome {
        LeaveOutcome::Left => "guild.left",
        LeaveOutcome::Disbanded => "guild.disbanded",
    };
    publish(
        state,
        topic,
        json!({ "player_id": user.get(), "guild_id": guild_id }),
    )
    .await;
    Ok((name, outcome))
}

#[instrument(level = "info", skip(state), fields(user_id = user.get()))]
pub async fn donate(state: &AppState, user: UserId, amount: i64) -> RpgResult<Guild> {
    if amount <= 0 {
        return Err(RpgError::validation("Donations must be a positive amount."));
    }
    let guild = state
        .db
        .retrying("guild.donate", move || async move {
            let pid = player_id(user);
            let mut tx = state.db.begin().await?;
            let mut player = players::lock_player(&mut tx, pid).await?;
            let member = guilds::require_membership(&mut tx, pid).await?;
            let mut guild = guilds::lock_guild(&mut tx, member.guild_id).await?;
            if player.rikis < amount {
                return Err(RpgError::insufficient("rikis", amount, player.rikis));
            }
            player.rikis -= amount;
            players::save_player(&mut tx, &player).await?;
            guilds::add_contribution(&mut tx, guild.id, pid, amount).await?;
            ledger::record(
                &mut tx,
                pid,
                "guild_donate",
                json!({ "guild_id": guild.id, "rikis": -amount }),
            )
            .await?;
            tx.commit().await?;
            guild.treasury += amount;
            Ok(guild)
        })
        .await?;
    publish(
        state,
        "guild.donated",
        json!({ "player_id": user.get(), "guild_id": guild.id, "amount": amount }),
    )
    .await;
    Ok(guild)
}

#[instrument(level = "info", skip(state), fields(user_id = user.get()))]
pub async fn upgrade(state: &AppState, user: UserId) -> RpgResult<(Guild, i64)> {
    let rules: GuildRules = state.config.section().await;
    let rules = &rules;
    let (guild, cost) = state
        .db
        .retrying("guild.upgrade", move || async move {
            let pid = player_id(user);
            let mut tx = state.db.begin().await?;
            let member = guilds::require_membership(&mut tx, pid).await?;
            if !member.role.can_upgrade() {
                return Err(RpgError::forbidden(
                    "Only the leader or an officer can upgrade the guild.",
                ));
            }
            let mut guild = guilds::lock_guild(&mut tx, member.guild_id).await?;
            if guild.level >= rules.max_level {
                return Err(RpgError::validation(format!(
                    "**{}** is already at max level ({}).",
                    guild.name, rules.max_level
                )));
            }
            let cost = calc::upgrade_cost(guild.level, rules);
            if guild.treasury < cost {
                return Err(RpgError::insufficient("treasury rikis", cost, guild.treasury));
            }
            guild.treasury -= cost;
            guild.level += 1;
            guilds::save_guild(&mut tx, &guild).await?;
            tx.commit().await?;
            Ok((guild, cost))
        })
        .await?;
    publish(
        state,
        "guild.upgraded",
        json!({ "player_id": user.get(), "guild_id": guild.id, "level": guild.level }),
    )
    .await;
    Ok((guild, cost))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankChange {
    Promote,
    Demote,
}

/// Leader-only: members become officers and officers become members.
#[instrument(level = "info", skip(state), fields(user_id = user.get(), target = target.get()))]
pub async fn change_rank(
    state: &AppState,
    user: UserId,
    target: UserId,
    change: RankChange,
) -> RpgResult<GuildRole> {
    let (guild_id, role) = state
        .db
        .retrying("guild.rank", move || async move {
            let mut tx = state.db.begin().await?;
            let actor = guilds::require_membership(&mut tx, player_id(user)).await?;
            if !actor.role.can_promote() {
                return Err(RpgError::forbidden("Only the guild leader can change ranks."));
            }
            let subject = same_guild_member(&mut tx, &actor, target).await?;
            let new_role = match (change, subject.role) {
                (RankChange::Promote, GuildRole::Member) => GuildRole::Officer,
                (RankChange::Demote, GuildRole::Officer) => GuildRole::Member,
                (RankChange::Promote, _) => {
                    return Err(RpgError::validation(format!(
                        "**{}** cannot be promoted further.",
                        subject.username
                    )));
                }
                (RankChange::Demote, _) => {
                    return Err(RpgError::validation(format!(
                        "**{}** cannot be demoted.",
                        subject.username
                    )));
                }
            };
            guilds::set_role(&mut tx, subject.player_id, new_role).await?;
            tx.commit().await?;
            Ok((actor.guild_id, new_role))
        })
        .await?;
    let topic = match change {
        RankChange::Promote => "guild.promoted",
        RankChange::Demote => "guild.demoted",
    };
    publish(
        state,
        topic,
        json!({
            "player_id": user.get(),
            "target_id": target.get(),
            "guild_id": guild_id,
            "role": role.as_str(),
        }),
    )
    .await;
    Ok(role)
}

#[instrument(level = "info", skip(state), fields(user_id = user.get(), target = target.get()))]
pub async fn kick(state: &AppState, user: UserId, target: UserId) -> RpgResult<String> {
    let (guild_id, username) = state
        .db
        .retrying("guild.kick", move || async move {
            let mut tx = state.db.begin().await?;
            let actor = guilds::require_membership(&mut tx, player_id(user)).await?;
            if actor.player_id == player_id(target) {
                return Err(RpgError::validation("Use `guild leave` to leave your guild."));
            }
            let subject = same_guild_member(&mut tx, &actor, target).await?;
            if !actor.role.can_kick(subject.role) {
                return Err(RpgError::forbidden(format!(
                    "A {} cannot kick a {}.",
                    actor.role.as_str(),
                    subject.role.as_str()
                )));
            }
            guilds::lock_guild(&mut tx, actor.guild_id).await?;
            guilds::remove_member(&mut tx, subject.player_id).await?;
            tx.commit().await?;
            Ok((actor.guild_id, subject.username))
        })
        .await?;
    publish(
        state,
        "guild.kicked",
        json!({ "player_id": user.get(), "target_id": target.get(), "guild_id": guild_id }),
    )
    .await;
    Ok(username)
}

async fn same_guild_member(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    actor: &GuildMember,
    target: UserId,
) -> RpgResult<GuildMember> {
    guilds::membership(tx, player_id(target))
        .await?
        .filter(|m| m.guild_id == actor.guild_id)
        .ok_or_else(|| RpgError::not_found("that player in your guild"))
}

/// Guild overview; with no name, shows the caller's own guild.
#[instrument(level = "debug", skip(state), fields(user_id = user.get()))]
pub async fn info(state: &AppState, user: UserId, name: Option<&str>) -> RpgResult<GuildInfo> {
    let rules: GuildRules = state.config.section().await;
    let rules = &rules;
    state
        .db
        .retrying("guild.info", move || async move {
            let mut tx = state.db.begin_read_only().await?;
            let guild = match name {
                Some(n) => guilds::lookup_by_name(&mut tx, n.trim())
                    .await?
                    .ok_or_else(|| RpgError::not_found(format!("a guild named **{}**", n.trim())))?,
                None => {
                    let member = guilds::require_membership(&mut tx, player_id(user)).await?;
                    guilds::get_guild(&mut tx, member.guild_id).await?
                }
            };
            let members = guilds::members(&mut tx, guild.id).await?;
            tx.commit().await?;
            Ok(GuildInfo {
                max_members: calc::max_members(guild.level, rules),
                upgrade_cost: (guild.level < rules.max_level)
                    .then(|| calc::upgrade_cost(guild.level, rules)),
                guild,
                members,
            })
        })
        .await
}

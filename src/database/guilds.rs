//! Guild and guild membership queries.

use super::models::{Guild, GuildMember, GuildRole};
use crate::error::{RpgError, RpgResult};
use sqlx::{Postgres, Transaction};

const MEMBER_COLUMNS: &str =
    "gm.player_id, gm.guild_id, gm.role, gm.contribution, gm.joined_at, p.username";

pub async fn membership(
    tx: &mut Transaction<'_, Postgres>,
    player_id: i64,
) -> RpgResult<Option<GuildMember>> {
    let sql = format!(
        "SELECT {MEMBER_COLUMNS} FROM guild_members gm JOIN players p ON p.discord_id = gm.player_id \
         WHERE gm.player_id = $1"
    );
    Ok(sqlx::query_as::<_, GuildMember>(&sql)
        .bind(player_id)
        .fetch_optional(&mut **tx)
        .await?)
}

/// Membership of the caller; errors when they are not in a guild.
pub async fn require_membership(
    tx: &mut Transaction<'_, Postgres>,
    player_id: i64,
) -> RpgResult<GuildMember> {
    membership(tx, player_id)
        .await?
        .ok_or_else(|| RpgError::validation("You are not in a guild."))
}

pub async fn lock_guild(tx: &mut Transaction<'_, Postgres>, guild_id: i32) -> RpgResult<Guild> {
    sqlx::query_as::<_, Guild>(
        "SELECT id, name, leader_id, level, treasury, created_at FROM guilds WHERE id = $1 FOR UPDATE",
    )
    .bind(guild_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| RpgError::not_found(format!("guild #{guild_id}")))
}

pub async fn find_by_name(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
) -> RpgResult<Option<Guild>> {
    Ok(sqlx::query_as::<_, Guild>(
        "SELECT id, name, leader_id, level, treasury, created_at FROM guilds WHERE LOWER(name) = LOWER($1) FOR UPDATE",
    )
    .bind(name)
    .fetch_optional(&mut **tx)
    .await?)
}

pub async fn create_guild(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    leader_id: i64,
) -> RpgResult<Guild> {
    let guild = sqlx::query_as::<_, Guild>(
        "INSERT INTO guilds (name, leader_id) VALUES ($1, $2) \
         RETURNING id, name, leader_id, level, treasury, created_at",
    )
    .bind(name)
    .bind(leader_id)
    .fetch_one(&mut **tx)
    .await?;
    add_member(tx, guild.id, leader_id, GuildRole::Leader).await?;
    Ok(guild)
}

pub async fn add_member(
    tx: &mut Transaction<'_, Postgres>,
    guild_id: i32,
    player_id: i64,
    role: GuildRole,
) -> RpgResult<()> {
    sqlx::query("INSERT INTO guild_members (player_id, guild_id, role) VALUES ($1, $2, $3)")
        .bind(player_id)
        .bind(guild_id)
        .bind(role)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn remove_member(tx: &mut Transaction<'_, Postgres>, player_id: i64) -> RpgResult<()> {
    sqlx::query("DELETE FROM guild_members WHERE player_id = $1")
        .bind(player_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn set_role(
    tx: &mut Transaction<'_, Postgres>,
    player_id: i64,
    role: GuildRole,
) -> RpgResult<()> {
    sqlx::query("UPDATE guild_members SET role = $2 WHERE player_id = $1")
        .bind(player_id)
        .bind(role)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn members(
    tx: &mut Transaction<'_, Postgres>,
    guild_id: i32,
) -> RpgResult<Vec<GuildMember>> {
    let sql = format!(
        "SELECT {MEMBER_COLUMNS} FROM guild_members gm JOIN players p ON p.discord_id = gm.player_id \
         WHERE gm.guild_id = $1 ORDER BY gm.role, gm.contribution DESC"
    );
    Ok(sqlx::query_as::<_, GuildMember>(&sql)
        .bind(guild_id)
        .fetch_all(&mut **tx)
        .await?)
}

pub async fn member_count(tx: &mut Transaction<'_, Postgres>, guild_id: i32) -> RpgResult<i64> {
    Ok(
        sqlx::query_scalar("SELECT COUNT(*) FROM guild_members WHERE guild_id = $1")
            .bind(guild_id)
            .fetch_one(&mut **tx)
            .await?,
    )
}

pub async fn add_contribution(
    tx: &mut Transaction<'_, Postgres>,
    guild_id: i32,
    player_id: i64,
    amount: i64,
) -> RpgResult<()> {
    sqlx::query("UPDATE guilds SET treasury = treasury + $2 WHERE id = $1")
        .bind(guild_id)
        .bind(amount)
        .execute(&mut **tx)
        .await?;
    sqlx::query("UPDATE guild_members SET contribution = contribution + $2 WHERE player_id = $1")
        .bind(player_id)
        .bind(amount)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn save_guild(tx: &mut Transaction<'_, Postgres>, guild: &Guild) -> RpgResult<()> {
    sqlx::query("UPDATE guilds SET leader_id = $2, level = $3, treasury = $4 WHERE id = $1")
        .bind(guild.id)
        .bind(guild.leader_id)
        .bind(guild.level)
        .bind(guild.treasury)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn delete_guild(tx: &mut Transaction<'_, Postgres>, guild_id: i32) -> RpgResult<()> {
    sqlx::query("DELETE FROM guilds WHERE id = $1")
        .bind(guild_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Unlocked read for views.
pub async fn get_guild(tx: &mut Transaction<'_, Postgres>, guild_id: i32) -> RpgResult<Guild> {
    sqlx::query_as::<_, Guild>(
        "SELECT id, name, leader_id, level, treasury, created_at FROM guilds WHERE id = $1",
    )
    .bind(guild_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| RpgError::not_found(format!("guild #{guild_id}")))
}

/// Unlocked lookup by name for views.
pub async fn lookup_by_name(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
) -> RpgResult<Option<Guild>> {
    Ok(sqlx::query_as::<_, Guild>(
        "SELECT id, name, leader_id, level, treasury, created_at FROM guilds WHERE LOWER(name) = LOWER($1)",
    )
    .bind(name)
    .fetch_optional(&mut **tx)
    .await?)
}

//! `/guild` and its subcommands.

use super::{Reply, finish_prefix, finish_slash, opt_i64, opt_str, opt_user, subcommand};
use crate::AppState;
use crate::database::models::GuildRole;
use crate::error::{RpgError, RpgResult};
use crate::services::guild::{self, GuildInfo, LeaveOutcome, RankChange};
use crate::ui::style::{COLOR_ALERT, COLOR_INFO, COLOR_SUCCESS, EMOJI_RIKIS, fmt_num};
use serenity::builder::{CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedFooter};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::*;

/// Members listed in the info embed.
const MEMBER_LIST_LIMIT: usize = 15;

/// A parsed guild action, shared by slash and prefix entry points.
enum Action {
    Create(String),
    Join(String),
    Leave,
    Donate(i64),
    Upgrade,
    Rank(UserId, RankChange),
    Kick(UserId),
    Info(Option<String>),
}

fn sub(name: &str, description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::SubCommand, name, description)
}

fn name_option(required: bool) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "name", "Guild name.").required(required)
}

fn member_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::User, "member", "Guild member.").required(true)
}

pub fn register() -> CreateCommand {
    CreateCommand::new("guild")
        .description("Create, join and manage guilds.")
        .add_option(sub("create", "Found a new guild.").add_sub_option(name_option(true)))
        .add_option(sub("join", "Join an existing guild.").add_sub_option(name_option(true)))
        .add_option(sub("leave", "Leave your guild."))
        .add_option(
            sub("donate", "Donate rikis to the treasury.").add_sub_option(
                CreateCommandOption::new(CommandOptionType::Integer, "amount", "Rikis to donate.")
                    .required(true)
                    .min_int_value(1),
            ),
        )
        .add_option(sub("upgrade", "Spend treasury to level up the guild."))
        .add_option(sub("promote", "Promote a member to officer.").add_sub_option(member_option()))
        .add_option(sub("demote", "Demote an officer to member.").add_sub_option(member_option()))
        .add_option(sub("kick", "Remove a member.").add_sub_option(member_option()))
        .add_option(sub("info", "Show guild details.").add_sub_option(name_option(false)))
}

fn usage(prefix: &str) -> RpgError {
    RpgError::validation(format!(
        "Usage: `{prefix}guild create|join <name>`, `{prefix}guild donate <amount>`, \
         `{prefix}guild promote|demote|kick @member`, `{prefix}guild leave|upgrade|info [name]`."
    ))
}

fn info_embed(info: &GuildInfo) -> CreateEmbed {
    let g = &info.guild;
    let mut roster: Vec<String> = info
        .members
        .iter()
        .take(MEMBER_LIST_LIMIT)
        .map(|m| {
            let badge = match m.role {
                GuildRole::Leader => "👑",
                GuildRole::Officer => "🛡️",
                GuildRole::Member => "▫️",
            };
            format!(
                "{badge} {} · {EMOJI_RIKIS} {}",
                m.username,
                fmt_num(m.contribution)
            )
        })
        .collect();
    if info.members.len() > MEMBER_LIST_LIMIT {
        roster.push(format!("…and {} more", info.members.len() - MEMBER_LIST_LIMIT));
    }
    let upgrade = match info.upgrade_cost {
        Some(cost) => format!("{EMOJI_RIKIS} {}", fmt_num(cost)),
        None => "Max level".to_string(),
    };
    CreateEmbed::new()
        .title(format!("Guild · {}", g.name))
        .field("Level", g.level.to_string(), true)
        .field(
            "Members",
            format!("{}/{}", info.members.len(), info.max_members),
            true,
        )
        .field("Treasury", format!("{EMOJI_RIKIS} {}", fmt_num(g.treasury)), true)
        .field("Next Upgrade", upgrade, true)
        .field("Roster", roster.join("\n"), false)
        .footer(CreateEmbedFooter::new(format!(
            "Founded {}",
            g.created_at.format("%Y-%m-%d")
        )))
        .color(COLOR_INFO)
}

fn done(title: &str, description: String) -> Reply {
    Reply::embed(
        CreateEmbed::new()
            .title(title)
            .description(description)
            .color(COLOR_SUCCESS),
    )
}

async fn execute(state: &AppState, user: UserId, action: Action) -> RpgResult<Reply> {
    match action {
        Action::Create(name) => {
            let g = guild::create(state, user, &name).await?;
            Ok(done("Guild Founded", format!("**{}** is open for members.", g.name)))
        }
        Action::Join(name) => {
            let g = guild::join(state, user, &name).await?;
            Ok(done("Guild Joined", format!("Welcome to **{}**!", g.name)))
        }
        Action::Leave => {
            let (name, outcome) = guild::leave(state, user).await?;
            let text = match outcome {
                LeaveOutcome::Left => format!("You left **{name}**."),
                LeaveOutcome::Disbanded => format!("**{name}** has been disbanded."),
            };
            Ok(Reply::embed(
                CreateEmbed::new()
                    .title("Guild Left")
                    .description(text)
                    .color(COLOR_ALERT),
            ))
        }
        Action::Donate(amount) => {
            let g = guild::donate(state, user, amount).await?;
            Ok(done(
                "Donation Received",
                format!(
                    "You donated {EMOJI_RIKIS} {}. Treasury: {}.",
                    fmt_num(amount),
                    fmt_num(g.treasury)
                ),
            ))
        }
        Action::Upgrade => {
            let (g, cost) = guild::upgrade(state, user).await?;
            Ok(done(
                "Guild Upgraded",
                format!(
                    "**{}** reached level {} ({EMOJI_RIKIS} -{}).",
                    g.name,
                    g.level,
                    fmt_num(cost)
                ),
            ))
        }
        Action::Rank(target, change) => {
            let role = guild::change_rank(state, user, target, change).await?;
            Ok(done(
                "Rank Changed",
                format!("<@{}> is now a {}.", target.get(), role.as_str()),
            ))
        }
        Action::Kick(target) => {
            let name = guild::kick(state, user, target).await?;
            Ok(done(
                "Member Removed",
                format!("<@{}> was removed from **{name}**.", target.get()),
            ))
        }
        Action::Info(name) => {
            let info = guild::info(state, user, name.as_deref()).await?;
            Ok(Reply::embed(info_embed(&info)))
        }
    }
}

fn slash_action(interaction: &CommandInteraction, prefix: &str) -> RpgResult<Action> {
    let (name, options) = subcommand(interaction).ok_or_else(|| usage(prefix))?;
    let text = |key: &str| opt_str(options, key).map(str::to_string);
    let member = || opt_user(options, "member").ok_or_else(|| usage(prefix));
    Ok(match name {
        "create" => Action::Create(text("name").ok_or_else(|| usage(prefix))?),
        "join" => Action::Join(text("name").ok_or_else(|| usage(prefix))?),
        "leave" => Action::Leave,
        "donate" => Action::Donate(opt_i64(options, "amount").ok_or_else(|| usage(prefix))?),
        "upgrade" => Action::Upgrade,
        "promote" => Action::Rank(member()?, RankChange::Promote),
        "demote" => Action::Rank(member()?, RankChange::Demote),
        "kick" => Action::Kick(member()?),
        "info" => Action::Info(text("name")),
        _ => return Err(usage(prefix)),
    })
}

fn prefix_action(msg: &Message, args: &[&str], prefix: &str) -> RpgResult<Action> {
    let Some((sub, rest)) = args.split_first() else {
        return Ok(Action::Info(None));
    };
    let joined = rest.join(" ");
    let member = || {
        msg.mentions
            .first()
            .map(|u| u.id)
            .or_else(|| rest.first().and_then(|r| r.parse::<u64>().ok()).map(UserId::new))
            .ok_or_else(|| usage(prefix))
    };
    Ok(match sub.to_lowercase().as_str() {
        "create" if !joined.is_empty() => Action::Create(joined),
        "join" if !joined.is_empty() => Action::Join(joined),
        "leave" => Action::Leave,
        "donate" => Action::Donate(
            rest.first()
                .and_then(|a| a.parse().ok())
                .ok_or_else(|| usage(prefix))?,
        ),
        "upgrade" => Action::Upgrade,
        "promote" => Action::Rank(member()?, RankChange::Promote),
        "demote" => Action::Rank(member()?, RankChange::Demote),
        "kick" => Action::Kick(member()?),
        "info" => Action::Info((!joined.is_empty()).then_some(joined)),
        _ => return Err(usage(prefix)),
    })
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let prefix = state.prefix.read().await.clone();
    let result = match slash_action(interaction, &prefix) {
        Ok(action) => execute(&state, interaction.user.id, action).await,
        Err(e) => Err(e),
    };
    finish_slash(ctx, interaction, "guild", result).await;
}

pub async fn run_prefix(ctx: &Context, msg: &Message, args: &[&str]) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let prefix = state.prefix.read().await.clone();
    let result = match prefix_action(msg, args, &prefix) {
        Ok(action) => execute(&state, msg.author.id, action).await,
        Err(e) => Err(e),
    };
    finish_prefix(ctx, msg, "guild", result).await;
}

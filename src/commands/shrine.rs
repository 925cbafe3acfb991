//! `/shrine build|collect|upgrade|list`.

use super::{Reply, finish_prefix, finish_slash, opt_str, subcommand};
use crate::AppState;
use crate::config::sections::{ShrineRules, ShrineYield};
use crate::error::{RpgError, RpgResult, format_duration};
use crate::game::shrine as calc;
use crate::services::shrine::{self, ShrineStatus};
use crate::ui::style::{COLOR_GOLD, COLOR_INFO, COLOR_SUCCESS, EMOJI_GRACE, EMOJI_RIKIS, fmt_num};
use serenity::builder::{CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedFooter};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::*;

fn yield_emoji(y: ShrineYield) -> &'static str {
    match y {
        ShrineYield::Rikis => EMOJI_RIKIS,
        ShrineYield::Grace => EMOJI_GRACE,
    }
}

fn type_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "type", "Shrine type, e.g. lesser.")
        .required(true)
}

pub fn register() -> CreateCommand {
    CreateCommand::new("shrine")
        .description("Build and manage passive-income shrines.")
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "list", "Show your shrines."),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "build", "Build a shrine.")
                .add_sub_option(type_option()),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "collect",
            "Collect from every ready shrine.",
        ))
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "upgrade", "Upgrade a shrine.")
                .add_sub_option(type_option()),
        )
}

fn status_line(s: &ShrineStatus) -> String {
    let ready = match s.ready_in {
        None => "ready".to_string(),
        Some(d) => format!("ready in {}", format_duration(d)),
    };
    let upgrade = match s.upgrade_cost {
        Some(cost) => format!("upgrade {EMOJI_RIKIS} {}", fmt_num(cost)),
        None => "max level".to_string(),
    };
    format!(
        "**{}** Lv {}/{} · {} {} per collect · {ready} · {upgrade}",
        s.display_name,
        s.level,
        s.max_level,
        yield_emoji(s.yields),
        fmt_num(s.amount)
    )
}

async fn list(state: &AppState, user: UserId, prefix: &str) -> RpgResult<Reply> {
    let shrines = shrine::list(state, user).await?;
    let rules: ShrineRules = state.config.section().await;
    let description = if shrines.is_empty() {
        "You have no shrines yet.".to_string()
    } else {
        shrines.iter().map(status_line).collect::<Vec<_>>().join("\n")
    };
    let buildable: Vec<String> = rules
        .kinds
        .iter()
        .filter(|(key, _)| !shrines.iter().any(|s| &s.key == *key))
        .map(|(key, kind)| {
            format!(
                "`{key}` {} · {} {} per {}h · cost {EMOJI_RIKIS} {}",
                kind.display_name,
                yield_emoji(kind.yields),
                fmt_num(calc::shrine_yield(kind, 1)),
                kind.cooldown_hours,
                fmt_num(kind.build_cost)
            )
        })
        .collect();
    let mut embed = CreateEmbed::new()
        .title("Your Shrines")
        .description(description)
        .footer(CreateEmbedFooter::new(format!(
            "{prefix}shrine build <type> · {prefix}shrine collect · {prefix}shrine upgrade <type>"
        )))
        .color(COLOR_INFO);
    if !buildable.is_empty() {
        embed = embed.field("Available to Build", buildable.join("\n"), false);
    }
    Ok(Reply::embed(embed))
}

async fn execute(
    state: &AppState,
    user: UserId,
    action: &str,
    shrine_type: Option<&str>,
    prefix: &str,
) -> RpgResult<Reply> {
    let require_type = || {
        shrine_type
            .map(|t| t.trim().to_lowercase())
            .ok_or_else(|| RpgError::validation(format!("Usage: `{prefix}shrine {action} <type>`.")))
    };
    match action {
        "list" => list(state, user, prefix).await,
        "build" => {
            let key = require_type()?;
            let status = shrine::build(state, user, &key).await?;
            Ok(Reply::embed(
                CreateEmbed::new()
                    .title(format!("{} Built", status.display_name))
                    .description(status_line(&status))
                    .color(COLOR_SUCCESS),
            ))
        }
        "collect" => {
            let report = shrine::collect(state, user).await?;
            let lines: Vec<String> = report
                .collected
                .iter()
                .map(|(name, y, amount)| format!("{name}: {} +{}", yield_emoji(*y), fmt_num(*amount)))
                .collect();
            Ok(Reply::embed(
                CreateEmbed::new()
                    .title("Shrines Collected")
                    .description(lines.join("\n"))
                    .field(
                        "Total",
                        format!(
                            "{EMOJI_RIKIS} +{} · {EMOJI_GRACE} +{}",
                            fmt_num(report.rikis_total),
                            fmt_num(report.grace_total)
                        ),
                        false,
                    )
                    .color(COLOR_GOLD),
            ))
        }
        "upgrade" => {
            let key = require_type()?;
            let (level, cost) = shrine::upgrade(state, user, &key).await?;
            Ok(Reply::embed(
                CreateEmbed::new()
                    .title("Shrine Upgraded")
                    .description(format!(
                        "Your `{key}` shrine is now level {level} ({EMOJI_RIKIS} -{}).",
                        fmt_num(cost)
                    ))
                    .color(COLOR_SUCCESS),
            ))
        }
        other => Err(RpgError::validation(format!(
            "Unknown shrine action `{other}`. Use build, collect, upgrade or list."
        ))),
    }
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let prefix = state.prefix.read().await.clone();
    let (action, options) = subcommand(interaction).unwrap_or(("list", &[][..]));
    let result = execute(
        &state,
        interaction.user.id,
        action,
        opt_str(options, "type"),
        &prefix,
    )
    .await;
    finish_slash(ctx, interaction, "shrine", result).await;
}

pub async fn run_prefix(ctx: &Context, msg: &Message, args: &[&str]) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let prefix = state.prefix.read().await.clone();
    let action = args.first().map(|a| a.to_lowercase()).unwrap_or_else(|| "list".into());
    let result = execute(&state, msg.author.id, &action, args.get(1).copied(), &prefix).await;
    finish_prefix(ctx, msg, "shrine", result).await;
}

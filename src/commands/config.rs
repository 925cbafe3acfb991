//! `/config show|set|reload`: live game-balance values (admin only).

use super::{Reply, finish_prefix, finish_slash, opt_str, subcommand};
use crate::AppState;
use crate::error::{RpgError, RpgResult};
use crate::ui::style::{COLOR_INFO, COLOR_SUCCESS};
use serde_json::Value;
use serenity::builder::{CreateCommand, CreateCommandOption, CreateEmbed};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::*;
use tracing::info;

/// Discord caps embed descriptions at 4096 chars; leave room for the code fence.
const MAX_VALUE_CHARS: usize = 3900;

pub fn register() -> CreateCommand {
    CreateCommand::new("config")
        .description("View or update game balance values (admin only).")
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "show", "Show a value or list keys.")
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::String, "path", "Dot path, e.g. fusion.rates")
                        .required(false),
                ),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "set", "Set a value at a dot path.")
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::String, "path", "Dot path.")
                        .required(true),
                )
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::String, "value", "JSON value.")
                        .required(true),
                ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "reload",
            "Reload every value from the database.",
        ))
}

/// Bare words that aren't valid JSON are stored as strings.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn render_value(value: &Value) -> String {
    let mut text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    if text.len() > MAX_VALUE_CHARS {
        let mut cut = MAX_VALUE_CHARS;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("\n…");
    }
    format!("```json\n{text}\n```")
}

async fn execute(
    state: &AppState,
    user: UserId,
    action: &str,
    path: Option<&str>,
    value: Option<&str>,
) -> RpgResult<Reply> {
    if !state.is_admin(user) {
        return Err(RpgError::forbidden("Only bot administrators can manage config."));
    }
    let embed = match (action, path) {
        ("show", None) => {
            let keys = state.config.keys().await;
            let listing = if keys.is_empty() {
                "No stored values; every section uses its defaults.".to_string()
            } else {
                keys.iter().map(|k| format!("`{k}`")).collect::<Vec<_>>().join(" · ")
            };
            CreateEmbed::new()
                .title("Game Config")
                .description(listing)
                .color(COLOR_INFO)
        }
        ("show", Some(path)) => {
            let value = state
                .config
                .get_value(path)
                .await
                .ok_or_else(|| RpgError::not_found(format!("a config value at `{path}`")))?;
            CreateEmbed::new()
                .title(format!("Config · {path}"))
                .description(render_value(&value))
                .color(COLOR_INFO)
        }
        ("set", Some(path)) => {
            let raw = value.ok_or_else(|| RpgError::validation("Usage: `config set <path> <json>`."))?;
            let parsed = parse_value(raw);
            state.config.set(path, parsed.clone()).await?;
            info!(target = "admin", user_id = user.get(), path, "config value set");
            CreateEmbed::new()
                .title(format!("Config Updated · {path}"))
                .description(render_value(&parsed))
                .color(COLOR_SUCCESS)
        }
        ("reload", _) => {
            state.config.invalidate().await;
            let count = state.config.refresh().await?;
            info!(target = "admin", user_id = user.get(), keys = count, "config reloaded");
            CreateEmbed::new()
                .title("Config Reloaded")
                .description(format!("Loaded {count} key(s) from the database."))
                .color(COLOR_SUCCESS)
        }
        _ => {
            return Err(RpgError::validation(
                "Usage: `config show [path]`, `config set <path> <json>`, `config reload`.",
            ));
        }
    };
    Ok(Reply::embed(embed))
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer_ephemeral(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let (action, options) = subcommand(interaction).unwrap_or(("show", &[][..]));
    let result = execute(
        &state,
        interaction.user.id,
        action,
        opt_str(options, "path"),
        opt_str(options, "value"),
    )
    .await;
    finish_slash(ctx, interaction, "config", result).await;
}

pub async fn run_prefix(ctx: &Context, msg: &Message, args: &[&str]) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let action = args.first().map(|a| a.to_lowercase()).unwrap_or_else(|| "show".into());
    let value = (args.len() > 2).then(|| args[2..].join(" "));
    let result = execute(
        &state,
        msg.author.id,
        &action,
        args.get(1).copied(),
        value.as_deref(),
    )
    .await;
    finish_prefix(ctx, msg, "config", result).await;
}

//! Views or changes the runtime command prefix.

use crate::AppState;
use serenity::builder::{
    CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::model::channel::Message;
use serenity::model::permissions::Permissions;
use serenity::prelude::*;
use tracing::{info, warn};

const MAX_PREFIX_LEN: usize = 5;

pub fn register() -> CreateCommand {
    CreateCommand::new("prefix")
        .description("View or change the command prefix (admin only to change).")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "new_prefix", "The new prefix")
                .required(false),
        )
}

/// Server owners, members with an Administrator role and configured bot admins pass.
fn is_prefix_admin(ctx: &Context, msg: &Message, state: &AppState) -> bool {
    if state.is_admin(msg.author.id) {
        return true;
    }
    let Some(guild) = msg.guild_id.and_then(|id| ctx.cache.guild(id)) else {
        return false;
    };
    if guild.owner_id == msg.author.id {
        return true;
    }
    msg.member.as_ref().is_some_and(|member| {
        member.roles.iter().any(|role_id| {
            guild
                .roles
                .get(role_id)
                .is_some_and(|role| role.permissions.contains(Permissions::ADMINISTRATOR))
        })
    })
}

fn validate(new_prefix: &str) -> Result<String, String> {
    let trimmed = new_prefix.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_PREFIX_LEN {
        return Err(format!(
            "Prefixes must be 1 to {MAX_PREFIX_LEN} characters without spaces."
        ));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err("Prefixes cannot contain spaces.".to_string());
    }
    Ok(trimmed.to_string())
}

async fn apply(state: &AppState, new_prefix: &str, by: u64) -> String {
    match validate(new_prefix) {
        Ok(p) => {
            *state.prefix.write().await = p.clone();
            info!(target = "admin", by, prefix = %p, "prefix changed");
            format!("Prefix has been updated to `{p}`")
        }
        Err(e) => e,
    }
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let requested = interaction
        .data
        .options
        .first()
        .and_then(|o| o.value.as_str());
    let content = match requested {
        Some(p) if state.is_admin(interaction.user.id) => {
            apply(&state, p, interaction.user.id.get()).await
        }
        Some(_) => "You must be a bot administrator to change the prefix.".to_string(),
        None => format!("The current prefix is `{}`.", state.prefix.read().await),
    };
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );
    interaction.create_response(&ctx.http, response).await.ok();
}

pub async fn run_prefix(ctx: &Context, msg: &Message, args: &[&str]) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let content = match (args.first(), args.get(1)) {
        (Some(&"set"), Some(new_prefix)) => {
            if is_prefix_admin(ctx, msg, &state) {
                apply(&state, new_prefix, msg.author.id.get()).await
            } else {
                "You must be an administrator to use this command.".to_string()
            }
        }
        (Some(&"set"), None) => {
            let current = state.prefix.read().await.clone();
            format!("Usage: `{current}prefix set <new_prefix>`")
        }
        _ => {
            let current = state.prefix.read().await.clone();
            format!(
                "The current prefix is `{current}`. Use `{current}prefix set <new_prefix>` to change it."
            )
        }
    };
    if let Err(e) = msg.reply(ctx, content).await {
        warn!(target = "command", command = "prefix", error = ?e, "reply failed");
    }
}


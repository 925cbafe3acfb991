//! Slash and prefix commands. Each command exposes `register`, `run_slash` and `run_prefix`;
//! game commands share one `execute` path that returns a [`Reply`].

pub mod admin;
pub mod ascend;
pub mod config;
pub mod daily;
pub mod explore;
pub mod fusion;
pub mod guild;
pub mod help;
pub mod leaderboard;
pub mod ping;
pub mod prefix;
pub mod profile;
pub mod shrine;
pub mod start;
pub mod summon;

use crate::error::RpgResult;
use crate::ui::style::rpg_error_embed;
use serenity::builder::{CreateActionRow, CreateEmbed, CreateMessage, EditInteractionResponse};
use serenity::model::application::{CommandDataOption, CommandDataOptionValue, CommandInteraction};
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::Context;
use tracing::{debug, error};

/// What a command sends back.
pub struct Reply {
    pub embed: CreateEmbed,
    pub components: Vec<CreateActionRow>,
}

impl Reply {
    pub fn embed(embed: CreateEmbed) -> Self {
        Self {
            embed,
            components: Vec::new(),
        }
    }

    pub fn with_components(mut self, components: Vec<CreateActionRow>) -> Self {
        self.components = components;
        self
    }
}

/// Turns a command result into something sendable, logging failures.
pub fn into_reply(command: &str, user: UserId, result: RpgResult<Reply>) -> Reply {
    match result {
        Ok(reply) => reply,
        Err(e) => {
            if e.is_user_error() {
                debug!(target = "command", command, user_id = user.get(), error = %e, "rejected");
            } else {
                error!(target = "command", command, user_id = user.get(), error = ?e, "failed");
            }
            Reply::embed(rpg_error_embed(&e))
        }
    }
}

/// Edits the deferred response of a slash command.
pub async fn finish_slash(
    ctx: &Context,
    interaction: &CommandInteraction,
    command: &str,
    result: RpgResult<Reply>,
) {
    let reply = into_reply(command, interaction.user.id, result);
    let builder = EditInteractionResponse::new()
        .embed(reply.embed)
        .components(reply.components);
    if let Err(e) = interaction.edit_response(&ctx.http, builder).await {
        error!(target = "command", command, error = ?e, "edit_response failed");
    }
}

/// Replies to a prefix command message.
pub async fn finish_prefix(ctx: &Context, msg: &Message, command: &str, result: RpgResult<Reply>) {
    let reply = into_reply(command, msg.author.id, result);
    let builder = CreateMessage::new()
        .embed(reply.embed)
        .components(reply.components)
        .reference_message(msg);
    if let Err(e) = msg.channel_id.send_message(&ctx.http, builder).await {
        error!(target = "command", command, error = ?e, "send_message failed");
    }
}

/// Name and nested options of the first subcommand, if the command uses them.
pub fn subcommand(interaction: &CommandInteraction) -> Option<(&str, &[CommandDataOption])> {
    let first = interaction.data.options.first()?;
    match &first.value {
        CommandDataOptionValue::SubCommand(nested) => Some((first.name.as_str(), nested)),
        _ => None,
    }
}

pub fn opt_i64(options: &[CommandDataOption], name: &str) -> Option<i64> {
    options
        .iter()
        .find(|o| o.name == name)
        .and_then(|o| o.value.as_i64())
}

pub fn opt_str<'a>(options: &'a [CommandDataOption], name: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|o| o.name == name)
        .and_then(|o| o.value.as_str())
}

pub fn opt_user(options: &[CommandDataOption], name: &str) -> Option<UserId> {
    options
        .iter()
        .find(|o| o.name == name)
        .and_then(|o| o.value.as_user_id())
}

/// Parses a positional prefix argument.
pub fn arg<T: std::str::FromStr>(args: &[&str], index: usize) -> Option<T> {
    args.get(index).and_then(|a| a.parse().ok())
}

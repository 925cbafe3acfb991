use crate::{AppState, commands, interactions};
use serenity::async_trait;
use serenity::client::Context;
use serenity::model::application::Interaction;
use serenity::model::{channel::Message, gateway::Ready, id::GuildId};
use serenity::prelude::EventHandler;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

/// Prefix commands and their aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Prefix,
    Help,
    Start,
    Profile,
    Collection,
    Summon,
    Fuse,
    Redeem,
    Ascend,
    Explore,
    Miniboss,
    Shrine,
    Daily,
    Guild,
    Leaderboard,
    Config,
    Health,
    Unknown,
}

impl FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ping" => Ok(Command::Ping),
            "prefix" => Ok(Command::Prefix),
            "help" | "h" => Ok(Command::Help),
            "start" | "register" => Ok(Command::Start),
            "profile" | "p" | "me" => Ok(Command::Profile),
            "collection" | "coll" | "maidens" => Ok(Command::Collection),
            "summon" | "s" | "pull" => Ok(Command::Summon),
            "fuse" | "f" => Ok(Command::Fuse),
            "redeem" => Ok(Command::Redeem),
            "ascend" | "asc" | "tower" => Ok(Command::Ascend),
            "explore" | "e" | "ex" => Ok(Command::Explore),
            "miniboss" | "mb" => Ok(Command::Miniboss),
            "shrine" | "sh" => Ok(Command::Shrine),
            "daily" | "d" => Ok(Command::Daily),
            "guild" | "g" => Ok(Command::Guild),
            "leaderboard" | "lb" | "top" => Ok(Command::Leaderboard),
            "config" => Ok(Command::Config),
            "health" => Ok(Command::Health),
            _ => Ok(Command::Unknown),
        }
    }
}

pub struct Handler {
    /// Restricts prefix commands and command registration to one guild when set.
    pub guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            error!(target = "handler", "AppState missing from TypeMap");
            return;
        };
        match &interaction {
            Interaction::Command(command) => {
                debug!(target = "handler", command = %command.data.name, user_id = command.user.id.get(), "slash command");
                match command.data.name.as_str() {
                    "ping" => commands::ping::run_slash(&ctx, command).await,
                    "prefix" => commands::prefix::run_slash(&ctx, command).await,
                    "help" => commands::help::run_slash(&ctx, command).await,
                    "start" => commands::start::run_slash(&ctx, command).await,
                    "profile" => commands::profile::run::run_slash(&ctx, command).await,
                    "collection" => {
                        commands::profile::run::run_collection_slash(&ctx, command).await
                    }
                    "summon" => commands::summon::run::run_slash(&ctx, command).await,
                    "fuse" => commands::fusion::run_slash(&ctx, command).await,
                    "redeem" => commands::fusion::run_redeem_slash(&ctx, command).await,
                    "ascend" => commands::ascend::run::run_slash(&ctx, command).await,
                    "explore" => commands::explore::run_slash(&ctx, command).await,
                    "miniboss" => commands::explore::run_miniboss_slash(&ctx, command).await,
                    "shrine" => commands::shrine::run_slash(&ctx, command).await,
                    "daily" => commands::daily::run_slash(&ctx, command).await,
                    "guild" => commands::guild::run_slash(&ctx, command).await,
                    "leaderboard" => commands::leaderboard::run::run_slash(&ctx, command).await,
                    "config" => commands::config::run_slash(&ctx, command).await,
                    "health" => commands::admin::run_slash(&ctx, command).await,
                    other => warn!(target = "handler", command = other, "unknown slash command"),
                }
            }
            Interaction::Component(component) => {
                interactions::route(&ctx, component, app_state).await;
            }
            _ => {}
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        if let Some(guild) = self.guild_id
            && msg.guild_id != Some(guild)
        {
            return;
        }
        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            return;
        };
        let prefix_string = app_state.prefix.read().await.clone();
        let Some(command_body) = msg.content.strip_prefix(&prefix_string) else {
            return;
        };
        let mut args = command_body.split_whitespace();
        let Some(command_str) = args.next() else {
            return;
        };
        let command = Command::from_str(command_str).unwrap_or(Command::Unknown);
        let args: Vec<&str> = args.collect();
        if command != Command::Unknown {
            debug!(target = "handler", ?command, user_id = msg.author.id.get(), "prefix command");
        }
        match command {
            Command::Ping => commands::ping::run_prefix(&ctx, &msg).await,
            Command::Prefix => commands::prefix::run_prefix(&ctx, &msg, &args).await,
            Command::Help => commands::help::run_prefix(&ctx, &msg, &args).await,
            Command::Start => commands::start::run_prefix(&ctx, &msg).await,
            Command::Profile => commands::profile::run::run_prefix(&ctx, &msg).await,
            Command::Collection => {
                commands::profile::run::run_collection_prefix(&ctx, &msg).await
            }
            Command::Summon => commands::summon::run::run_prefix(&ctx, &msg, &args).await,
            Command::Fuse => commands::fusion::run_prefix(&ctx, &msg, &args).await,
            Command::Redeem => commands::fusion::run_redeem_prefix(&ctx, &msg, &args).await,
            Command::Ascend => commands::ascend::run::run_prefix(&ctx, &msg, &args).await,
            Command::Explore => commands::explore::run_prefix(&ctx, &msg, &args).await,
            Command::Miniboss => commands::explore::run_miniboss_prefix(&ctx, &msg, &args).await,
            Command::Shrine => commands::shrine::run_prefix(&ctx, &msg, &args).await,
            Command::Daily => commands::daily::run_prefix(&ctx, &msg).await,
            Command::Guild => commands::guild::run_prefix(&ctx, &msg, &args).await,
            Command::Leaderboard => {
                commands::leaderboard::run::run_prefix(&ctx, &msg, &args).await
            }
            Command::Config => commands::config::run_prefix(&ctx, &msg, &args).await,
            Command::Health => commands::admin::run_prefix(&ctx, &msg).await,
            Command::Unknown => {}
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(target = "handler", user = %ready.user.name, guilds = ready.guilds.len(), "connected");
        let commands_to_register = all_commands();
        let count = commands_to_register.len();
        let result = match self.guild_id {
            Some(guild) => guild
                .set_commands(&ctx.http, commands_to_register)
                .await
                .map(|_| ()),
            None => serenity::model::application::Command::set_global_commands(
                &ctx.http,
                commands_to_register,
            )
            .await
            .map(|_| ()),
        };
        match result {
            Ok(()) => info!(
                target = "handler",
                count,
                scope = if self.guild_id.is_some() { "guild" } else { "global" },
                "registered slash commands"
            ),
            Err(e) => error!(target = "handler", error = ?e, "registering slash commands failed"),
        }
    }
}

/// Every slash command definition.
pub fn all_commands() -> Vec<serenity::builder::CreateCommand> {
    vec![
        commands::ping::register(),
        commands::prefix::register(),
        commands::help::register(),
        commands::start::register(),
        commands::profile::run::register(),
        commands::profile::run::register_collection(),
        commands::summon::run::register(),
        commands::fusion::register(),
        commands::fusion::register_redeem(),
        commands::ascend::run::register(),
        commands::explore::register(),
        commands::explore::register_miniboss(),
        commands::shrine::register(),
        commands::daily::register(),
        commands::guild::register(),
        commands::leaderboard::run::register(),
        commands::config::register(),
        commands::admin::register(),
    ]
}

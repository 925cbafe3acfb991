//! Implements the `/summon` command.

use super::ui::{create_summon_buttons, create_summon_embed};
use crate::AppState;
use crate::commands::{Reply, arg, finish_prefix, finish_slash, opt_i64};
use crate::config::sections::GachaRules;
use crate::error::RpgResult;
use crate::services::summon;
use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::*;

pub fn register() -> CreateCommand {
    CreateCommand::new("summon")
        .description("Spend grace to summon maidens.")
        .add_option(
            CreateCommandOption::new(CommandOptionType::Integer, "count", "How many to summon.")
                .required(false)
                .add_int_choice("×1", 1)
                .add_int_choice("×5", 5)
                .add_int_choice("×10", 10),
        )
}

/// Shared by the command and the "summon again" button.
pub async fn execute(state: &AppState, user: UserId, count: i32) -> RpgResult<Reply> {
    let outcome = summon::summon(state, user, count).await?;
    let rules: GachaRules = state.config.section().await;
    Ok(Reply::embed(create_summon_embed(&outcome)).with_components(vec![
        create_summon_buttons(count, outcome.grace_left, rules.grace_per_summon),
    ]))
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let count = opt_i64(&interaction.data.options, "count").unwrap_or(1) as i32;
    let result = execute(&state, interaction.user.id, count).await;
    finish_slash(ctx, interaction, "summon", result).await;
}

pub async fn run_prefix(ctx: &Context, msg: &Message, args: &[&str]) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let count = arg::<i32>(args, 0).unwrap_or(1);
    let result = execute(&state, msg.author.id, count).await;
    finish_prefix(ctx, msg, "summon", result).await;
}

//! Implements the run logic for the `/leaderboard` command.

use super::ui::{create_leaderboard_buttons, create_leaderboard_embed};
use crate::AppState;
use crate::commands::{Reply, finish_prefix, finish_slash, opt_str};
use crate::database::leaderboard::LeaderboardType;
use crate::error::{RpgError, RpgResult};
use crate::services::leaderboard;
use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::model::channel::Message;
use serenity::prelude::*;

pub fn register() -> CreateCommand {
    CreateCommand::new("leaderboard")
        .description("View the server leaderboards.")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "board", "Which ranking to show.")
                .required(false)
                .add_string_choice("Level", "level")
                .add_string_choice("Power", "power")
                .add_string_choice("Floor", "floor"),
        )
}

pub fn parse_board(key: Option<&str>) -> RpgResult<LeaderboardType> {
    match key {
        None => Ok(LeaderboardType::Level),
        Some(k) => LeaderboardType::from_key(&k.to_lowercase()).ok_or_else(|| {
            RpgError::validation(format!("Unknown leaderboard `{k}`. Use level, power or floor."))
        }),
    }
}

/// Shared by the command and the tab buttons.
pub async fn execute(state: &AppState, board: LeaderboardType) -> RpgResult<Reply> {
    let entries = leaderboard::top(state, board).await?;
    Ok(Reply::embed(create_leaderboard_embed(&entries, board))
        .with_components(vec![create_leaderboard_buttons(board)]))
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let result = match parse_board(opt_str(&interaction.data.options, "board")) {
        Ok(board) => execute(&state, board).await,
        Err(e) => Err(e),
    };
    finish_slash(ctx, interaction, "leaderboard", result).await;
}

pub async fn run_prefix(ctx: &Context, msg: &Message, args: &[&str]) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let result = match parse_board(args.first().copied()) {
        Ok(board) => execute(&state, board).await,
        Err(e) => Err(e),
    };
    finish_prefix(ctx, msg, "leaderboard", result).await;
}

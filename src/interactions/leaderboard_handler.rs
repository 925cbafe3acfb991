//! Handles all component interactions for the `leaderboard` command family.

use super::ids;
use super::util::{defer_component, edit_with_reply};
use crate::AppState;
use crate::commands::leaderboard::run::{execute, parse_board};
use crate::database::leaderboard::LeaderboardType;
use serenity::model::application::ComponentInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

pub async fn handle(ctx: &Context, component: &ComponentInteraction, app_state: Arc<AppState>) {
    defer_component(ctx, component).await;
    // Unknown tabs fall back to the level board.
    let board = parse_board(ids::parse_leaderboard(&component.data.custom_id)).unwrap_or(LeaderboardType::Level);
    let result = execute(&app_state, board).await;
    edit_with_reply(ctx, component, "leaderboard", result).await;
}

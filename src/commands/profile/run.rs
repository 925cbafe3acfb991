//! Implements the `/profile` and `/collection` commands.

use super::ui::{create_collection_embed, create_profile_embed};
use crate::commands::{Reply, finish_prefix, finish_slash};
use crate::error::RpgResult;
use crate::services::player;
use crate::AppState;
use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::model::channel::Message;
use serenity::model::user::User;
use serenity::prelude::*;

pub fn register() -> CreateCommand {
    CreateCommand::new("profile")
        .description("View your or another player's profile.")
        .add_option(
            CreateCommandOption::new(CommandOptionType::User, "user", "The player to view.")
                .required(false),
        )
}

pub fn register_collection() -> CreateCommand {
    CreateCommand::new("collection").description("List the maidens you own.")
}

async fn profile(state: &AppState, user: &User) -> RpgResult<Reply> {
    let view = player::profile(state, user.id).await?;
    Ok(Reply::embed(create_profile_embed(user, &view)))
}

async fn collection(state: &AppState, user: &User) -> RpgResult<Reply> {
    let view = player::collection(state, user.id).await?;
    Ok(Reply::embed(create_collection_embed(user, &view)))
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let target = match interaction
        .data
        .options
        .first()
        .and_then(|o| o.value.as_user_id())
    {
        Some(id) => id
            .to_user(&ctx.http)
            .await
            .unwrap_or_else(|_| interaction.user.clone()),
        None => interaction.user.clone(),
    };
    let result = profile(&state, &target).await;
    finish_slash(ctx, interaction, "profile", result).await;
}

pub async fn run_prefix(ctx: &Context, msg: &Message) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let target = msg
        .mentions
        .first()
        .cloned()
        .unwrap_or_else(|| msg.author.clone());
    let result = profile(&state, &target).await;
    finish_prefix(ctx, msg, "profile", result).await;
}

pub async fn run_collection_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let result = collection(&state, &interaction.user).await;
    finish_slash(ctx, interaction, "collection", result).await;
}

pub async fn run_collection_prefix(ctx: &Context, msg: &Message) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let result = collection(&state, &msg.author).await;
    finish_prefix(ctx, msg, "collection", result).await;
}

//! `/start`: registers a new player.

use super::{Reply, finish_prefix, finish_slash};
use crate::error::RpgResult;
use crate::services::player;
use crate::ui::style::{COLOR_INFO, COLOR_SUCCESS, EMOJI_ENERGY, EMOJI_GRACE, EMOJI_RIKIS, EMOJI_STAMINA, fmt_num};
use crate::AppState;
use serenity::builder::{CreateCommand, CreateEmbed, CreateEmbedFooter};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::model::user::User;
use serenity::prelude::*;

pub fn register() -> CreateCommand {
    CreateCommand::new("start").description("Begin your journey and create your profile.")
}

async fn execute(state: &AppState, user: &User, prefix: &str) -> RpgResult<Reply> {
    let reg = player::register(state, user.id, &user.name).await?;
    let p = &reg.player;
    let embed = if reg.created {
        CreateEmbed::new()
            .title(format!("Welcome to Lumen, {}!", user.name))
            .description(
                "Your journey begins. Summon maidens with grace, fuse them into stronger tiers \
                 and climb the Ascension tower.",
            )
            .field(
                "Starting Resources",
                format!(
                    "{EMOJI_RIKIS} {} rikis\n{EMOJI_GRACE} {} grace\n{EMOJI_ENERGY} {} energy\n{EMOJI_STAMINA} {} stamina",
                    fmt_num(p.rikis),
                    p.grace,
                    p.energy,
                    p.stamina
                ),
                false,
            )
            .field(
                "Next Steps",
                format!("`{prefix}summon` · `{prefix}daily` · `{prefix}explore 1 1` · `{prefix}help`"),
                false,
            )
            .color(COLOR_SUCCESS)
    } else {
        CreateEmbed::new()
            .title("Already Registered")
            .description(format!(
                "You started your journey on {}. Check `{prefix}profile`.",
                p.created_at.format("%Y-%m-%d")
            ))
            .color(COLOR_INFO)
    };
    Ok(Reply::embed(
        embed.footer(CreateEmbedFooter::new(format!("Level {}", p.level))),
    ))
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let prefix = state.prefix.read().await.clone();
    let result = execute(&state, &interaction.user, &prefix).await;
    finish_slash(ctx, interaction, "start", result).await;
}

pub async fn run_prefix(ctx: &Context, msg: &Message) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let prefix = state.prefix.read().await.clone();
    let result = execute(&state, &msg.author, &prefix).await;
    finish_prefix(ctx, msg, "start", result).await;
}

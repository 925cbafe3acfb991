//! `/daily`: claims the once-per-day reward.

use super::{Reply, finish_prefix, finish_slash};
use crate::AppState;
use crate::error::RpgResult;
use crate::services::daily;
use crate::ui::style::{COLOR_GOLD, EMOJI_GEMS, EMOJI_GRACE, EMOJI_RIKIS, fmt_num};
use serenity::builder::{CreateCommand, CreateEmbed, CreateEmbedFooter};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::*;

pub fn register() -> CreateCommand {
    CreateCommand::new("daily").description("Claim your daily reward.")
}

async fn execute(state: &AppState, user: UserId) -> RpgResult<Reply> {
    let claim = daily::claim(state, user).await?;
    let r = claim.reward;
    let mut rewards = format!(
        "{EMOJI_RIKIS} +{} rikis\n{EMOJI_GRACE} +{} grace",
        fmt_num(r.rikis),
        r.grace
    );
    if r.gems > 0 {
        rewards.push_str(&format!("\n{EMOJI_GEMS} +{} gems (weekly bonus)", r.gems));
    }
    let embed = CreateEmbed::new()
        .title("Daily Reward Claimed")
        .description(rewards)
        .field("Streak", format!("🔥 {} day(s)", claim.streak), true)
        .footer(CreateEmbedFooter::new(
            "Come back tomorrow (UTC) to keep your streak going.",
        ))
        .color(COLOR_GOLD);
    Ok(Reply::embed(embed))
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let result = execute(&state, interaction.user.id).await;
    finish_slash(ctx, interaction, "daily", result).await;
}

pub async fn run_prefix(ctx: &Context, msg: &Message) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let result = execute(&state, msg.author.id).await;
    finish_prefix(ctx, msg, "daily", result).await;
}

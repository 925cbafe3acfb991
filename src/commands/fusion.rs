//! `/fuse` and `/redeem`.

use super::{Reply, arg, finish_prefix, finish_slash, opt_i64};
use crate::AppState;
use crate::error::{RpgError, RpgResult};
use crate::services::fusion::{self, FusionOutcome, RedeemOutcome};
use crate::ui::style::{
    COLOR_ALERT, COLOR_GOLD, COLOR_SUCCESS, EMOJI_RIKIS, EMOJI_SHARD, element_emoji, fmt_num,
    tier_label,
};
use serenity::builder::{CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedFooter};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::*;

pub fn register() -> CreateCommand {
    CreateCommand::new("fuse")
        .description("Fuse two maidens of the same tier into a higher tier.")
        .add_option(
            CreateCommandOption::new(CommandOptionType::Integer, "first", "First maiden #id.")
                .required(true)
                .min_int_value(1),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::Integer, "second", "Second maiden #id.")
                .required(true)
                .min_int_value(1),
        )
}

pub fn register_redeem() -> CreateCommand {
    CreateCommand::new("redeem")
        .description("Trade fusion shards for a maiden one tier higher.")
        .add_option(
            CreateCommandOption::new(CommandOptionType::Integer, "tier", "Shard tier to redeem.")
                .required(true)
                .min_int_value(1),
        )
}

fn fusion_embed(o: &FusionOutcome) -> CreateEmbed {
    let rate = format!("{:.0}%", o.success_rate * 100.0);
    let embed = match &o.result {
        Some(m) => CreateEmbed::new()
            .title("Fusion Succeeded!")
            .description(format!(
                "{} **{}** {} joins your collection.",
                element_emoji(m.element),
                m.name,
                tier_label(m.tier)
            ))
            .color(COLOR_SUCCESS),
        None => CreateEmbed::new()
            .title("Fusion Failed")
            .description(format!(
                "The fusion fizzled. You gained {EMOJI_SHARD} {} tier {} shard(s) ({} total).",
                o.shards_gained, o.parent_tier, o.shards_total
            ))
            .color(COLOR_ALERT),
    };
    embed
        .field("Success Rate", rate, true)
        .field(
            format!("{EMOJI_RIKIS} Cost"),
            format!("{} · {} left", fmt_num(o.cost), fmt_num(o.rikis_left)),
            true,
        )
        .footer(CreateEmbedFooter::new(format!(
            "Fused tier {} maidens",
            o.parent_tier
        )))
}

fn redeem_embed(o: &RedeemOutcome) -> CreateEmbed {
    let m = &o.maiden;
    CreateEmbed::new()
        .title("Shards Redeemed")
        .description(format!(
            "{} **{}** {} answered the call.",
            element_emoji(m.element),
            m.name,
            tier_label(m.tier)
        ))
        .field(
            format!("{EMOJI_SHARD} Shards"),
            format!("-{} · {} left", o.shards_spent, o.shards_left),
            true,
        )
        .color(COLOR_GOLD)
}

async fn fuse(state: &AppState, user: UserId, first: Option<i64>, second: Option<i64>) -> RpgResult<Reply> {
    let (Some(first), Some(second)) = (first, second) else {
        return Err(RpgError::validation("Usage: `fuse <maiden id> <maiden id>`."));
    };
    let outcome = fusion::fuse(state, user, first, second).await?;
    Ok(Reply::embed(fusion_embed(&outcome)))
}

async fn redeem(state: &AppState, user: UserId, tier: Option<i64>) -> RpgResult<Reply> {
    let Some(tier) = tier else {
        return Err(RpgError::validation("Usage: `redeem <tier>`."));
    };
    let outcome = fusion::redeem_shards(state, user, tier as i32).await?;
    Ok(Reply::embed(redeem_embed(&outcome)))
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let options = &interaction.data.options;
    let result = fuse(
        &state,
        interaction.user.id,
        opt_i64(options, "first"),
        opt_i64(options, "second"),
    )
    .await;
    finish_slash(ctx, interaction, "fuse", result).await;
}

pub async fn run_prefix(ctx: &Context, msg: &Message, args: &[&str]) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let result = fuse(&state, msg.author.id, arg(args, 0), arg(args, 1)).await;
    finish_prefix(ctx, msg, "fuse", result).await;
}

pub async fn run_redeem_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let tier = opt_i64(&interaction.data.options, "tier");
    let result = redeem(&state, interaction.user.id, tier).await;
    finish_slash(ctx, interaction, "redeem", result).await;
}

pub async fn run_redeem_prefix(ctx: &Context, msg: &Message, args: &[&str]) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let result = redeem(&state, msg.author.id, arg(args, 0)).await;
    finish_prefix(ctx, msg, "redeem", result).await;
}

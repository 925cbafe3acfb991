//! `/health`: runtime diagnostics for administrators.

use super::{Reply, finish_prefix, finish_slash};
use crate::AppState;
use crate::database::health::HealthStatus;
use crate::error::{RpgError, RpgResult};
use crate::services::cache::cache_stats;
use crate::ui::style::{COLOR_ALERT, COLOR_SUCCESS, COLOR_WARN};
use serenity::builder::{CreateCommand, CreateEmbed, CreateEmbedFooter};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::Context;

pub fn register() -> CreateCommand {
    CreateCommand::new("health").description("Show database and runtime health (admin only).")
}

async fn execute(state: &AppState, user: UserId) -> RpgResult<Reply> {
    if !state.is_admin(user) {
        return Err(RpgError::forbidden("Only bot administrators can view health."));
    }
    let snap = state.health.snapshot().await;
    let pool = state.db.pool();
    let (published, listener_failures) = state.events.stats();
    let (hits, misses) = cache_stats();

    let color = match snap.status {
        HealthStatus::Healthy => COLOR_SUCCESS,
        HealthStatus::Degraded => COLOR_WARN,
        HealthStatus::Unhealthy => COLOR_ALERT,
    };
    let latency = snap
        .last_latency
        .map(|l| format!("{} ms", l.as_millis()))
        .unwrap_or_else(|| "n/a".to_string());
    let last_check = snap
        .last_check
        .map(|t| t.format("%H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());

    let mut embed = CreateEmbed::new()
        .title(format!("Health · {}", snap.status.as_str()))
        .field(
            "Database",
            format!(
                "Latency: {latency}\nChecks: {} ({} failed)\nStreak: {} ok / {} failed",
                snap.total_checks,
                snap.total_failures,
                snap.consecutive_successes,
                snap.consecutive_failures
            ),
            false,
        )
        .field(
            "Pool",
            format!("{} open · {} idle", pool.size(), pool.num_idle()),
            true,
        )
        .field(
            "Events",
            format!("{published} published · {listener_failures} listener errors"),
            true,
        )
        .field("Cache", format!("{hits} hits · {misses} misses"), true)
        .footer(CreateEmbedFooter::new(format!("Last check {last_check}")))
        .color(color);
    if let Some(err) = &snap.last_error {
        embed = embed.field("Last Error", format!("`{err}`"), false);
    }
    Ok(Reply::embed(embed))
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer_ephemeral(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let result = execute(&state, interaction.user.id).await;
    finish_slash(ctx, interaction, "health", result).await;
}

pub async fn run_prefix(ctx: &Context, msg: &Message) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let result = execute(&state, msg.author.id).await;
    finish_prefix(ctx, msg, "health", result).await;
}

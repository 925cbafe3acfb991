//! Shared interaction utility helpers (single defer, safe edit, click lock).
use crate::AppState;
use crate::commands::{Reply, into_reply};
use crate::error::RpgResult;
use crate::services::lock::{CLICK_LOCK_TTL, click_key};
use serenity::builder::{
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
};
use serenity::model::application::ComponentInteraction;
use serenity::prelude::Context;
use std::future::Future;

/// Acknowledge a component interaction (non-ephemeral) ignoring duplicate/late errors.
pub async fn defer_component(ctx: &Context, c: &ComponentInteraction) {
    if let Err(e) = c.defer(&ctx.http).await {
        tracing::debug!(target="ui.defer", cid=%c.data.custom_id, error=?e, "defer failed (already acknowledged?)");
    }
}

/// Edit original interaction response; logs failure with a tag for observability.
pub async fn edit_component(
    ctx: &Context,
    c: &ComponentInteraction,
    tag: &str,
    builder: EditInteractionResponse,
) {
    if let Err(e) = c.edit_response(&ctx.http, builder).await {
        tracing::error!(target="ui.edit", cid=%c.data.custom_id, tag=%tag, error=?e, "edit_response failed");
    }
}

/// Replaces the message a button lives on with a command result.
pub async fn edit_with_reply(
    ctx: &Context,
    c: &ComponentInteraction,
    tag: &str,
    result: RpgResult<Reply>,
) {
    let reply = into_reply(tag, c.user.id, result);
    let builder = EditInteractionResponse::new()
        .embed(reply.embed)
        .components(reply.components);
    edit_component(ctx, c, tag, builder).await;
}

async fn reply_busy(ctx: &Context, c: &ComponentInteraction) {
    let msg = CreateInteractionResponseMessage::new()
        .content("⏳ Still processing your last click, hang on a moment.")
        .ephemeral(true);
    if let Err(e) = c
        .create_response(&ctx.http, CreateInteractionResponse::Message(msg))
        .await
    {
        tracing::debug!(target="ui.lock", cid=%c.data.custom_id, error=?e, "busy notice failed");
    }
}

/// Runs `work` while holding the per-user click lock for `action`.
///
/// A concurrent click on the same action gets an ephemeral "still processing" notice
/// and `work` is skipped. If the lock backend itself fails the click still runs.
/// The interaction is deferred before `work` starts.
pub async fn with_click_lock<F, Fut>(
    ctx: &Context,
    c: &ComponentInteraction,
    state: &AppState,
    action: &str,
    work: F,
) where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    let key = click_key(c.user.id.get(), action);
    let token = match state.locks.try_acquire(&key, CLICK_LOCK_TTL).await {
        Ok(Some(token)) => Some(token),
        Ok(None) => {
            tracing::debug!(target="ui.lock", user_id=c.user.id.get(), action, "click rejected; lock held");
            reply_busy(ctx, c).await;
            return;
        }
        Err(e) => {
            tracing::warn!(target="ui.lock", action, error=%e, "lock backend unavailable; proceeding unlocked");
            None
        }
    };
    defer_component(ctx, c).await;
    work().await;
    if let Some(token) = token
        && let Err(e) = state.locks.release(&key, &token).await
    {
        tracing::warn!(target="ui.lock", action, error=%e, "lock release failed; it will expire");
    }
}

//! This module acts as a central router for all component interactions.
//!
//! The main `handler.rs` file delegates here, and this module dispatches to a
//! specialized handler based on the component's "family" (the custom_id segment
//! before the first `_`, e.g. "ascend", "summon").

pub mod ascend_handler;
pub mod ids;
pub mod leaderboard_handler;
pub mod summon_handler;
pub mod util;

use crate::AppState;
use serenity::model::application::ComponentInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

pub async fn route(ctx: &Context, component: &ComponentInteraction, app_state: Arc<AppState>) {
    let family = ids::family(&component.data.custom_id);
    tracing::debug!(target = "ui.route", cid = %component.data.custom_id, family, user_id = component.user.id.get(), "component");
    match family {
        "ascend" => ascend_handler::handle(ctx, component, app_state).await,
        "summon" => summon_handler::handle(ctx, component, app_state).await,
        "leaderboard" => leaderboard_handler::handle(ctx, component, app_state).await,
        "help" => crate::commands::help::handle_interaction(ctx, component).await,
        _ => {
            tracing::warn!(target = "ui.route", cid = %component.data.custom_id, "unhandled component");
        }
    }
}

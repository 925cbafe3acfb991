//! Handles the "summon again" buttons.

use super::ids;
use super::util::{edit_with_reply, with_click_lock};
use crate::AppState;
use crate::commands::summon::run::execute;
use serenity::model::application::ComponentInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

pub async fn handle(ctx: &Context, component: &ComponentInteraction, app_state: Arc<AppState>) {
    let Some(count) = ids::parse_summon_again(&component.data.custom_id) else {
        tracing::warn!(target = "ui.summon", cid = %component.data.custom_id, "unrecognised summon button");
        return;
    };
    let (state, user) = (app_state.as_ref(), component.user.id);
    with_click_lock(ctx, component, state, "summon", move || async move {
        let result = execute(state, user, count).await;
        edit_with_reply(ctx, component, "summon", result).await;
    })
    .await;
}

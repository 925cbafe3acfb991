//! Handles the attack and refresh buttons under the tower view.

use super::ids;
use super::util::{defer_component, edit_with_reply, with_click_lock};
use crate::AppState;
use crate::commands::ascend::run::{attack, status};
use serenity::model::application::ComponentInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

pub async fn handle(ctx: &Context, component: &ComponentInteraction, app_state: Arc<AppState>) {
    let (state, user) = (app_state.as_ref(), component.user.id);
    match ids::parse_ascend(&component.data.custom_id) {
        Some(key) => {
            with_click_lock(ctx, component, state, "ascend", move || async move {
                let result = attack(state, user, key).await;
                edit_with_reply(ctx, component, "ascend", result).await;
            })
            .await;
        }
        None => {
            defer_component(ctx, component).await;
            let result = status(state, user).await;
            edit_with_reply(ctx, component, "ascend", result).await;
        }
    }
}

//! Implements the `/ascend` command and the attack buttons.

use super::ui::{create_attack_buttons, create_attack_embed, create_status_embed};
use crate::AppState;
use crate::commands::{Reply, finish_prefix, finish_slash};
use crate::config::sections::AscensionRules;
use crate::error::{RpgError, RpgResult};
use crate::game::combat::{self, AttackKind};
use crate::services::ascension;
use serenity::builder::CreateCommand;
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::*;

pub fn register() -> CreateCommand {
    CreateCommand::new("ascend").description("Climb the Ascension tower.")
}

/// The tower view with attack buttons.
pub async fn status(state: &AppState, user: UserId) -> RpgResult<Reply> {
    let (tower, stamina, max_stamina) = ascension::status(state, user).await?;
    let rules: AscensionRules = state.config.section().await;
    let boss = combat::is_boss_floor(tower.floor, &rules);
    Ok(
        Reply::embed(create_status_embed(&tower, boss, stamina, max_stamina))
            .with_components(vec![create_attack_buttons(stamina)]),
    )
}

pub async fn attack(state: &AppState, user: UserId, key: &str) -> RpgResult<Reply> {
    let kind = AttackKind::from_key(key)
        .ok_or_else(|| RpgError::validation(format!("Unknown attack `{key}`. Use x1, x5 or x20.")))?;
    let report = ascension::attack(state, user, kind).await?;
    Ok(Reply::embed(create_attack_embed(&report))
        .with_components(vec![create_attack_buttons(report.stamina_left)]))
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let result = status(&state, interaction.user.id).await;
    finish_slash(ctx, interaction, "ascend", result).await;
}

/// `ascend` shows the tower; `ascend x5` attacks directly.
pub async fn run_prefix(ctx: &Context, msg: &Message, args: &[&str]) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let result = match args.first() {
        Some(key) => attack(&state, msg.author.id, key).await,
        None => status(&state, msg.author.id).await,
    };
    finish_prefix(ctx, msg, "ascend", result).await;
}

//! `/explore` and `/miniboss`.

use super::{Reply, arg, finish_prefix, finish_slash, opt_i64};
use crate::AppState;
use crate::database::models::SectorProgress;
use crate::error::{RpgError, RpgResult};
use crate::services::exploration::{self, ExploreReport, MinibossReport};
use crate::ui::style::{
    COLOR_ALERT, COLOR_GOLD, COLOR_INFO, COLOR_PRIMARY, EMOJI_ENERGY, EMOJI_POWER, EMOJI_RIKIS,
    element_emoji, fmt_num, progress_bar, stat_pair, tier_label,
};
use serenity::builder::{CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedFooter};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::model::channel::Message;
use serenity::model::id::UserId;
use serenity::prelude::*;

fn stage_options(command: CreateCommand, required: bool) -> CreateCommand {
    command
        .add_option(
            CreateCommandOption::new(CommandOptionType::Integer, "sector", "Sector number.")
                .required(required)
                .min_int_value(1),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::Integer, "sublevel", "Sublevel number.")
                .required(required)
                .min_int_value(1),
        )
}

pub fn register() -> CreateCommand {
    stage_options(
        CreateCommand::new("explore").description("Explore a sector sublevel for rikis and XP."),
        false,
    )
}

pub fn register_miniboss() -> CreateCommand {
    stage_options(
        CreateCommand::new("miniboss")
            .description("Challenge a fully explored sublevel's miniboss."),
        false,
    )
}

fn stage(sector: Option<i64>, sublevel: Option<i64>) -> RpgResult<Option<(i32, i32)>> {
    match (sector, sublevel) {
        (Some(s), Some(l)) => Ok(Some((s as i32, l as i32))),
        (None, None) => Ok(None),
        _ => Err(RpgError::validation(
            "Give both a sector and a sublevel, e.g. `1 3`.",
        )),
    }
}

fn explore_embed(r: &ExploreReport) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(format!("Sector {} · Sublevel {}", r.sector, r.sublevel))
        .field(
            "Progress",
            format!(
                "{} `{:.1}%` (+{:.1}%)",
                progress_bar(r.progress, 100.0),
                r.progress,
                r.progress_gained
            ),
            false,
        )
        .field(
            "Rewards",
            format!("{EMOJI_RIKIS} +{} · +{} xp", fmt_num(r.rikis), fmt_num(r.xp)),
            true,
        )
        .field(
            format!("{EMOJI_ENERGY} Energy"),
            format!("-{} · {}", r.energy_spent, stat_pair(r.energy_left, r.max_energy)),
            true,
        )
        .color(COLOR_PRIMARY);
    if let Some(e) = &r.encounter {
        embed = embed.field(
            "Encounter!",
            format!(
                "{} **{}** {} joined your collection.",
                element_emoji(e.element),
                e.name,
                tier_label(e.tier)
            ),
            false,
        );
    }
    if let Some(lv) = r.level_up.as_ref().filter(|l| l.did_level_up()) {
        embed = embed.field("Level Up!", format!("You reached level {}.", lv.new_level), false);
    }
    if r.miniboss_ready {
        embed = embed.footer(CreateEmbedFooter::new(
            "The miniboss awaits. Use `miniboss` to challenge it.",
        ));
    }
    embed
}

fn miniboss_embed(r: &MinibossReport) -> CreateEmbed {
    let title = format!("Miniboss · Sector {} · Sublevel {}", r.sector, r.sublevel);
    let power = format!(
        "{EMOJI_POWER} {} vs {} required",
        fmt_num(r.power),
        fmt_num(r.required)
    );
    if !r.victory {
        return CreateEmbed::new()
            .title(title)
            .description("The miniboss was too strong. Grow your power and try again.")
            .field("Power", power, false)
            .color(COLOR_ALERT);
    }
    let unlocked = match r.unlocked {
        Some((s, l)) => format!("Sector {s} · Sublevel {l} unlocked."),
        None => "You have conquered every sector!".to_string(),
    };
    let mut embed = CreateEmbed::new()
        .title(title)
        .description(format!("Victory! {unlocked}"))
        .field("Power", power, false)
        .field(
            "Rewards",
            format!("{EMOJI_RIKIS} +{} · +{} xp", fmt_num(r.rikis), fmt_num(r.xp)),
            false,
        )
        .color(COLOR_GOLD);
    if let Some(lv) = r.level_up.as_ref().filter(|l| l.did_level_up()) {
        embed = embed.field("Level Up!", format!("You reached level {}.", lv.new_level), false);
    }
    embed
}

fn overview_embed(progress: &[SectorProgress]) -> CreateEmbed {
    let lines: Vec<String> = progress
        .iter()
        .map(|p| {
            let mark = if p.miniboss_defeated { "✅" } else { "▫️" };
            format!(
                "{mark} `{}-{}` {} {:.0}%",
                p.sector,
                p.sublevel,
                progress_bar(p.progress, 100.0),
                p.progress
            )
        })
        .collect();
    let description = if lines.is_empty() {
        "You haven't explored yet. Start with `explore 1 1`.".to_string()
    } else {
        lines.join("\n")
    };
    CreateEmbed::new()
        .title("Exploration Progress")
        .description(description)
        .color(COLOR_INFO)
}

async fn explore(state: &AppState, user: UserId, stage: Option<(i32, i32)>) -> RpgResult<Reply> {
    match stage {
        Some((sector, sublevel)) => {
            let report = exploration::explore(state, user, sector, sublevel).await?;
            Ok(Reply::embed(explore_embed(&report)))
        }
        None => {
            let progress = exploration::overview(state, user).await?;
            Ok(Reply::embed(overview_embed(&progress)))
        }
    }
}

async fn miniboss(state: &AppState, user: UserId, stage: Option<(i32, i32)>) -> RpgResult<Reply> {
    let report = exploration::miniboss(state, user, stage).await?;
    Ok(Reply::embed(miniboss_embed(&report)))
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let options = &interaction.data.options;
    let result = match stage(opt_i64(options, "sector"), opt_i64(options, "sublevel")) {
        Ok(stage) => explore(&state, interaction.user.id, stage).await,
        Err(e) => Err(e),
    };
    finish_slash(ctx, interaction, "explore", result).await;
}

pub async fn run_prefix(ctx: &Context, msg: &Message, args: &[&str]) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let result = match stage(arg(args, 0), arg(args, 1)) {
        Ok(stage) => explore(&state, msg.author.id, stage).await,
        Err(e) => Err(e),
    };
    finish_prefix(ctx, msg, "explore", result).await;
}

pub async fn run_miniboss_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let options = &interaction.data.options;
    let result = match stage(opt_i64(options, "sector"), opt_i64(options, "sublevel")) {
        Ok(stage) => miniboss(&state, interaction.user.id, stage).await,
        Err(e) => Err(e),
    };
    finish_slash(ctx, interaction, "miniboss", result).await;
}

pub async fn run_miniboss_prefix(ctx: &Context, msg: &Message, args: &[&str]) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let result = match stage(arg(args, 0), arg(args, 1)) {
        Ok(stage) => miniboss(&state, msg.author.id, stage).await,
        Err(e) => Err(e),
    };
    finish_prefix(ctx, msg, "miniboss", result).await;
}

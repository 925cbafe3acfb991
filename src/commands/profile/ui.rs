//! Embeds for `/profile` and `/collection`.

use crate::services::player::{CollectionView, ProfileView};
use crate::ui::style::{
    COLOR_PRIMARY, EMOJI_ENERGY, EMOJI_GEMS, EMOJI_GRACE, EMOJI_POWER, EMOJI_RIKIS, EMOJI_SHARD,
    EMOJI_STAMINA, element_emoji, fmt_num, progress_bar, stat_pair, tier_label,
};
use serenity::builder::{CreateEmbed, CreateEmbedFooter};
use serenity::model::user::User;

/// Max stacks listed in the collection embed.
const COLLECTION_LIMIT: usize = 20;

fn regen_hint(next_in: Option<i64>) -> String {
    match next_in {
        Some(m) => format!(" (+1 in {m}m)"),
        None => " (full)".to_string(),
    }
}

pub fn create_profile_embed(user: &User, view: &ProfileView) -> CreateEmbed {
    let p = &view.player;
    let xp_line = format!(
        "{} `{}/{}`",
        progress_bar(p.experience as f64, view.xp_to_next as f64),
        fmt_num(p.experience),
        fmt_num(view.xp_to_next)
    );
    let guild = view
        .guild
        .as_ref()
        .map(|(name, role)| format!("{name} ({})", role.as_str()))
        .unwrap_or_else(|| "None".to_string());

    CreateEmbed::new()
        .title(format!("{}'s Profile", user.name))
        .thumbnail(user.face())
        .field(format!("Level {}", p.level), xp_line, false)
        .field(
            "Currencies",
            format!(
                "{EMOJI_RIKIS} {}\n{EMOJI_GRACE} {}\n{EMOJI_GEMS} {}",
                fmt_num(p.rikis),
                p.grace,
                p.gems
            ),
            true,
        )
        .field(
            "Resources",
            format!(
                "{EMOJI_ENERGY} {}{}\n{EMOJI_STAMINA} {}{}",
                stat_pair(p.energy, p.max_energy),
                regen_hint(view.energy_next_in),
                stat_pair(p.stamina, p.max_stamina),
                regen_hint(view.stamina_next_in)
            ),
            true,
        )
        .field(
            "Progress",
            format!(
                "{EMOJI_POWER} Power: **{}**\nMaidens: {}\nSummons: {}\nHighest Floor: {}\nDaily Streak: {}",
                fmt_num(p.total_power),
                view.maiden_count,
                p.total_summons,
                view.highest_floor,
                p.daily_streak
            ),
            false,
        )
        .field("Guild", guild, true)
        .footer(CreateEmbedFooter::new(format!(
            "Adventuring since {}",
            p.created_at.format("%Y-%m-%d")
        )))
        .color(COLOR_PRIMARY)
}

pub fn create_collection_embed(user: &User, view: &CollectionView) -> CreateEmbed {
    let mut lines: Vec<String> = view
        .maidens
        .iter()
        .take(COLLECTION_LIMIT)
        .map(|m| {
            format!(
                "`#{}` {} **{}** {} ×{}",
                m.id,
                element_emoji(m.element),
                m.name,
                tier_label(m.tier),
                m.quantity
            )
        })
        .collect();
    if view.maidens.len() > COLLECTION_LIMIT {
        lines.push(format!(
            "…and {} more stacks",
            view.maidens.len() - COLLECTION_LIMIT
        ));
    }
    let description = if lines.is_empty() {
        "Your collection is empty. Try `summon`!".to_string()
    } else {
        lines.join("\n")
    };
    let shards: Vec<String> = view
        .shards
        .iter()
        .filter(|(_, n)| **n > 0)
        .map(|(tier, n)| format!("T{tier}: {n}"))
        .collect();

    let mut embed = CreateEmbed::new()
        .title(format!("{}'s Collection", user.name))
        .description(description)
        .field(
            format!("{EMOJI_POWER} Total Power"),
            fmt_num(view.total_power),
            true,
        )
        .footer(CreateEmbedFooter::new(
            "Use the #id with `fuse <id> <id>` to fuse two maidens.",
        ))
        .color(COLOR_PRIMARY);
    if !shards.is_empty() {
        embed = embed.field(format!("{EMOJI_SHARD} Fusion Shards"), shards.join(" · "), true);
    }
    embed
}

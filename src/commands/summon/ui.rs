//! Embeds and buttons for summon results.

use crate::interactions::ids;
use crate::services::summon::SummonOutcome;
use crate::ui::buttons::Btn;
use crate::ui::style::{
    COLOR_GOLD, COLOR_PRIMARY, EMOJI_GRACE, EMOJI_POWER, element_emoji, fmt_num, tier_label,
};
use serenity::builder::{CreateActionRow, CreateEmbed, CreateEmbedFooter};

/// Highest tier at which a pull is announced in gold.
const HIGHLIGHT_TIER: i32 = 6;

pub fn create_summon_embed(outcome: &SummonOutcome) -> CreateEmbed {
    let lines: Vec<String> = outcome
        .pulls
        .iter()
        .map(|p| {
            let pity = if p.pity { " ⭐ *pity*" } else { "" };
            format!(
                "{} **{}** {}{pity}",
                element_emoji(p.element),
                p.name,
                tier_label(p.tier)
            )
        })
        .collect();
    let best = outcome.pulls.iter().map(|p| p.tier).max().unwrap_or(1);
    let title = if outcome.pulls.len() == 1 {
        "Summon Result".to_string()
    } else {
        format!("{}× Summon Results", outcome.pulls.len())
    };

    CreateEmbed::new()
        .title(title)
        .description(lines.join("\n"))
        .field(
            format!("{EMOJI_GRACE} Grace"),
            format!("-{} · {} left", outcome.grace_spent, outcome.grace_left),
            true,
        )
        .field(
            format!("{EMOJI_POWER} Power"),
            fmt_num(outcome.total_power),
            true,
        )
        .footer(CreateEmbedFooter::new(format!(
            "Pity {}/{}",
            outcome.pity_counter, outcome.pity_threshold
        )))
        .color(if best >= HIGHLIGHT_TIER {
            COLOR_GOLD
        } else {
            COLOR_PRIMARY
        })
}

pub fn create_summon_buttons(count: i32, grace_left: i32, grace_per_summon: i32) -> CreateActionRow {
    let affordable = |n: i32| grace_left >= n * grace_per_summon;
    let mut buttons = vec![
        Btn::success(&ids::summon_again(count), &format!("Summon ×{count} again"))
            .disabled(!affordable(count)),
    ];
    if count != 1 {
        buttons.push(Btn::secondary(&ids::summon_again(1), "Summon ×1").disabled(!affordable(1)));
    }
    CreateActionRow::Buttons(buttons)
}

//! Handles the UI creation for the `/leaderboard` command.

use crate::database::leaderboard::LeaderboardType;
use crate::database::models::LeaderboardEntry;
use crate::interactions::ids;
use crate::ui::buttons::Btn;
use crate::ui::style::{COLOR_GOLD, fmt_num};
use serenity::builder::{CreateActionRow, CreateEmbed, CreateEmbedFooter};

const BOARDS: [(LeaderboardType, &str); 3] = [
    (LeaderboardType::Level, "Level"),
    (LeaderboardType::Power, "Power"),
    (LeaderboardType::Floor, "Floor"),
];

fn score_text(board: LeaderboardType, score: i64) -> String {
    match board {
        LeaderboardType::Level => format!("Lv {score}"),
        LeaderboardType::Power => format!("{} power", fmt_num(score)),
        LeaderboardType::Floor => format!("Floor {score}"),
    }
}

/// Creates the main embed for a given leaderboard type and its data.
pub fn create_leaderboard_embed(entries: &[LeaderboardEntry], board: LeaderboardType) -> CreateEmbed {
    let lines: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let rank = i + 1;
            let medal = match rank {
                1 => "🥇",
                2 => "🥈",
                3 => "🥉",
                _ => "🔹",
            };
            format!(
                "{medal} **{rank}**. {} - `{}`",
                entry.username,
                score_text(board, entry.score)
            )
        })
        .collect();

    let description = if lines.is_empty() {
        "The leaderboard is currently empty.".to_string()
    } else {
        lines.join("\n")
    };

    CreateEmbed::new()
        .title(board.title())
        .description(description)
        .footer(CreateEmbedFooter::new("Refreshed every minute."))
        .color(COLOR_GOLD)
}

/// Creates the row of buttons used to switch between leaderboards.
pub fn create_leaderboard_buttons(current: LeaderboardType) -> CreateActionRow {
    CreateActionRow::Buttons(
        BOARDS
            .iter()
            .map(|(board, label)| Btn::tab(&ids::leaderboard_tab(board.key()), label, *board == current))
            .collect(),
    )
}

//! Central UI style constants and helpers.
use crate::database::models::Element;
use crate::error::RpgError;
use serenity::builder::CreateEmbed;

pub const COLOR_PRIMARY: u32 = 0x9B59B6; // Purple
pub const COLOR_SUCCESS: u32 = 0x2ECC71; // Green
pub const COLOR_INFO: u32 = 0x3498DB; // Blue
pub const COLOR_GOLD: u32 = 0xFFD700;
pub const COLOR_WARN: u32 = 0xE67E22; // Orange
pub const COLOR_ALERT: u32 = 0xE74C3C; // Red

pub const EMOJI_RIKIS: &str = "💰";
pub const EMOJI_GRACE: &str = "✨";
pub const EMOJI_GEMS: &str = "💎";
pub const EMOJI_ENERGY: &str = "⚡";
pub const EMOJI_STAMINA: &str = "🔥";
pub const EMOJI_POWER: &str = "⚔️";
pub const EMOJI_SHARD: &str = "🔹";

// Standard target widths for padded button labels (approx char counts before Discord trimming)
pub const BTN_W_NARROW: usize = 10;
pub const BTN_W_STD: usize = 14;
pub const BTN_W_PRIMARY: usize = 18;

pub fn stat_pair(current: i32, max: i32) -> String {
    format!("`{}/{}`", current, max)
}

pub fn element_emoji(element: Element) -> &'static str {
    match element {
        Element::Infernal => "🔥",
        Element::Umbral => "🌑",
        Element::Earth => "🌿",
        Element::Tempest => "🌪️",
        Element::Radiant => "☀️",
        Element::Abyssal => "🌊",
    }
}

pub fn tier_label(tier: i32) -> String {
    format!("T{tier}")
}

/// Ten-segment text bar for HP and progress displays.
pub fn progress_bar(current: f64, max: f64) -> String {
    let ratio = if max > 0.0 {
        (current / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * 10.0).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

/// Thousands separators for currency amounts.
pub fn fmt_num(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 { format!("-{out}") } else { out }
}

/// Pads a label to a target visible width using spaces so multi-row action bars align better.
/// Discord collapses long runs of trailing spaces, so at most two are added.
pub fn pad_label(label: &str, target_min: usize) -> String {
    let len = label.chars().count();
    if len >= target_min {
        return label.to_string();
    }
    format!("{label}{pad}", pad = " ".repeat((target_min - len).min(2)))
}

pub fn pad_primary(label: &str) -> String {
    pad_label(label, BTN_W_PRIMARY)
}
pub fn pad_std(label: &str) -> String {
    pad_label(label, BTN_W_STD)
}
pub fn pad_narrow(label: &str) -> String {
    pad_label(label, BTN_W_NARROW)
}

/// Convenience builder for an alert/error-styled embed.
pub fn error_embed<T: Into<String>, U: Into<String>>(title: T, description: U) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(description)
        .color(COLOR_ALERT)
}

/// Error embed for a failed game action. Player mistakes are amber, system failures red.
pub fn rpg_error_embed(err: &RpgError) -> CreateEmbed {
    let color = if err.is_user_error() {
        COLOR_WARN
    } else {
        COLOR_ALERT
    };
    error_embed(err.title(), err.user_message()).color(color)
}

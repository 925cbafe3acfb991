//! Tower embeds and the attack button row.

use crate::game::combat::{AttackKind, TowerState};
use crate::interactions::ids;
use crate::services::ascension::AttackReport;
use crate::ui::buttons::Btn;
use crate::ui::style::{
    COLOR_ALERT, COLOR_GOLD, COLOR_PRIMARY, EMOJI_GEMS, EMOJI_POWER, EMOJI_RIKIS, EMOJI_STAMINA,
    fmt_num, progress_bar, stat_pair,
};
use serenity::builder::{CreateActionRow, CreateEmbed, CreateEmbedFooter};

const ATTACKS: [AttackKind; 3] = [AttackKind::Single, AttackKind::Five, AttackKind::Twenty];

fn enemy_line(tower: &TowerState) -> String {
    format!(
        "{} `{}/{}`",
        progress_bar(tower.enemy_hp as f64, tower.enemy_max_hp as f64),
        fmt_num(tower.enemy_hp),
        fmt_num(tower.enemy_max_hp)
    )
}

fn floor_title(floor: i32, boss: bool) -> String {
    if boss {
        format!("Ascension · Floor {floor} 👑 Boss")
    } else {
        format!("Ascension · Floor {floor}")
    }
}

pub fn create_status_embed(tower: &TowerState, boss: bool, stamina: i32, max_stamina: i32) -> CreateEmbed {
    CreateEmbed::new()
        .title(floor_title(tower.floor, boss))
        .field("Enemy HP", enemy_line(tower), false)
        .field(
            format!("{EMOJI_STAMINA} Stamina"),
            stat_pair(stamina, max_stamina),
            true,
        )
        .field("Highest Floor", tower.highest_floor.to_string(), true)
        .footer(CreateEmbedFooter::new(
            "Each strike costs 1 stamina and hits with your total power.",
        ))
        .color(if boss { COLOR_ALERT } else { COLOR_PRIMARY })
}

pub fn create_attack_embed(report: &AttackReport) -> CreateEmbed {
    let o = &report.outcome;
    let mut description = format!(
        "{EMOJI_POWER} {} strike(s) for **{}** damage",
        o.strikes,
        fmt_num(o.damage)
    );
    if o.crits > 0 {
        description.push_str(&format!(" ({} critical!)", o.crits));
    }
    let mut embed = CreateEmbed::new()
        .title(floor_title(report.tower.floor, report.boss_floor))
        .description(description)
        .field("Enemy HP", enemy_line(&report.tower), false)
        .field(
            format!("{EMOJI_STAMINA} Stamina"),
            stat_pair(report.stamina_left, report.max_stamina),
            true,
        )
        .field(
            format!("{EMOJI_POWER} Power"),
            fmt_num(report.power),
            true,
        )
        .color(COLOR_PRIMARY);
    if let Some((floor, rewards)) = &report.cleared {
        let mut loot = format!(
            "{EMOJI_RIKIS} +{} · +{} xp",
            fmt_num(rewards.rikis),
            fmt_num(rewards.xp)
        );
        if rewards.gems > 0 {
            loot.push_str(&format!(" · {EMOJI_GEMS} +{}", rewards.gems));
        }
        embed = embed
            .field(format!("Floor {floor} cleared!"), loot, false)
            .color(COLOR_GOLD);
    }
    if let Some(lv) = report.level_up.as_ref().filter(|l| l.did_level_up()) {
        embed = embed.field("Level Up!", format!("You reached level {}.", lv.new_level), false);
    }
    embed
}

pub fn create_attack_buttons(stamina: i32) -> CreateActionRow {
    let mut buttons: Vec<_> = ATTACKS
        .iter()
        .map(|kind| {
            Btn::action(
                &ids::ascend_attack(kind.key()),
                &format!("Attack {}", kind.key()),
                stamina >= kind.stamina_cost(),
            )
        })
        .collect();
    buttons.push(Btn::secondary(ids::ASCEND_REFRESH, "Refresh"));
    CreateActionRow::Buttons(buttons)
}

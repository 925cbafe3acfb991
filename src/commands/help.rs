//! Interactive help: a categorized overview, per-command detail pages and a
//! select menu for browsing from either slash or prefix invocations.

use crate::AppState;
use crate::interactions::ids;
use crate::interactions::util::edit_component;
use crate::ui::style::{COLOR_ALERT, COLOR_INFO};
use serenity::all::ComponentInteractionDataKind;
use serenity::builder::{
    CreateActionRow, CreateCommand, CreateCommandOption, CreateEmbed, CreateEmbedFooter,
    CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage, CreateSelectMenu,
    CreateSelectMenuKind, CreateSelectMenuOption, EditInteractionResponse,
};
use serenity::model::application::{CommandInteraction, CommandOptionType, ComponentInteraction};
use serenity::model::channel::Message;
use serenity::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
enum CommandCategory {
    General,
    Collection,
    Adventure,
    Economy,
    Guild,
    Admin,
}

impl CommandCategory {
    const ALL: [CommandCategory; 6] = [
        Self::General,
        Self::Collection,
        Self::Adventure,
        Self::Economy,
        Self::Guild,
        Self::Admin,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Collection => "Maidens",
            Self::Adventure => "Adventure",
            Self::Economy => "Economy",
            Self::Guild => "Guilds",
            Self::Admin => "Admin",
        }
    }
    fn emoji(&self) -> &'static str {
        match self {
            Self::General => "🔧",
            Self::Collection => "✨",
            Self::Adventure => "⚔️",
            Self::Economy => "💰",
            Self::Guild => "🏰",
            Self::Admin => "🛡️",
        }
    }
}

struct CommandInfo {
    name: &'static str,
    description: &'static str,
    usage: &'static [&'static str],
    details: &'static str,
    category: CommandCategory,
}

const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "start",
        description: "Create your profile and begin.",
        usage: &["start"],
        details: "Registers you as a player with starting rikis, grace, energy and stamina.",
        category: CommandCategory::General,
    },
    CommandInfo {
        name: "profile",
        description: "Displays your or another player's profile.",
        usage: &["profile", "p", "profile @user"],
        details: "Shows level and XP, currencies, energy and stamina with regeneration timers, total power, highest floor and guild.",
        category: CommandCategory::General,
    },
    CommandInfo {
        name: "leaderboard",
        description: "View the top players.",
        usage: &["leaderboard", "lb power", "lb floor"],
        details: "Ranks players by level, total power or highest Ascension floor. Use the tabs to switch boards.",
        category: CommandCategory::General,
    },
    CommandInfo {
        name: "ping",
        description: "Checks the bot's latency.",
        usage: &["ping"],
        details: "Pings the Discord gateway to check the bot's heartbeat latency.",
        category: CommandCategory::General,
    },
    CommandInfo {
        name: "help",
        description: "Shows this help menu.",
        usage: &["help", "h", "help <command>"],
        details: "Displays every command or detailed information about a specific one.",
        category: CommandCategory::General,
    },
    CommandInfo {
        name: "summon",
        description: "Spend grace to summon maidens.",
        usage: &["summon", "summon 5", "summon 10"],
        details: "Each pull costs grace. Higher tiers unlock as you level, and a pity counter guarantees a top-tier pull after enough summons.",
        category: CommandCategory::Collection,
    },
    CommandInfo {
        name: "collection",
        description: "List the maidens you own.",
        usage: &["collection", "coll"],
        details: "Lists your maiden stacks with their #id, element, tier and count, plus your fusion shards.",
        category: CommandCategory::Collection,
    },
    CommandInfo {
        name: "fuse",
        description: "Fuse two same-tier maidens.",
        usage: &["fuse <id> <id>"],
        details: "Costs rikis and may fail. Success creates a maiden one tier higher; failure consumes one maiden and grants fusion shards.",
        category: CommandCategory::Collection,
    },
    CommandInfo {
        name: "redeem",
        description: "Trade fusion shards for a higher-tier maiden.",
        usage: &["redeem <tier>"],
        details: "A full set of shards of a tier guarantees a maiden one tier higher.",
        category: CommandCategory::Collection,
    },
    CommandInfo {
        name: "ascend",
        description: "Climb the Ascension tower.",
        usage: &["ascend", "ascend x5"],
        details: "Attack the floor's enemy with your total power. Each strike costs stamina; every few floors a boss waits.",
        category: CommandCategory::Adventure,
    },
    CommandInfo {
        name: "explore",
        description: "Explore a sector sublevel.",
        usage: &["explore", "explore <sector> <sublevel>"],
        details: "Costs energy, earns rikis and XP and fills the sublevel's progress. You may meet a maiden along the way. Without arguments, shows your progress.",
        category: CommandCategory::Adventure,
    },
    CommandInfo {
        name: "miniboss",
        description: "Challenge a sublevel's miniboss.",
        usage: &["miniboss", "miniboss <sector> <sublevel>"],
        details: "Requires 100% progress. Defeating it unlocks the next sublevel.",
        category: CommandCategory::Adventure,
    },
    CommandInfo {
        name: "daily",
        description: "Claim your daily reward.",
        usage: &["daily", "d"],
        details: "Once per UTC day. Consecutive days build a streak for bigger rewards.",
        category: CommandCategory::Economy,
    },
    CommandInfo {
        name: "shrine",
        description: "Build and collect passive-income shrines.",
        usage: &["shrine", "shrine build <type>", "shrine collect", "shrine upgrade <type>"],
        details: "Shrines produce rikis or grace on a cooldown. Upgrades raise the yield.",
        category: CommandCategory::Economy,
    },
    CommandInfo {
        name: "guild",
        description: "Create, join and manage guilds.",
        usage: &[
            "guild info [name]",
            "guild create <name>",
            "guild join <name>",
            "guild donate <amount>",
            "guild promote|demote|kick @member",
            "guild upgrade",
            "guild leave",
        ],
        details: "Guilds pool rikis in a treasury to level up and raise their member cap. Leaders manage ranks; officers can kick members.",
        category: CommandCategory::Guild,
    },
    CommandInfo {
        name: "prefix",
        description: "Views or (admin only) sets the prefix.",
        usage: &["prefix", "prefix set <new_prefix>"],
        details: "Displays the current command prefix. Administrators can change it.",
        category: CommandCategory::Admin,
    },
    CommandInfo {
        name: "config",
        description: "Live game balance values (admin only).",
        usage: &["config show [path]", "config set <path> <json>", "config reload"],
        details: "Reads and writes tunable values such as fusion rates or gacha weights without a restart.",
        category: CommandCategory::Admin,
    },
    CommandInfo {
        name: "health",
        description: "Database and runtime health (admin only).",
        usage: &["health"],
        details: "Shows database health, pool usage, event and cache counters.",
        category: CommandCategory::Admin,
    },
];

/// All command names listed in help.
pub fn all_command_names() -> Vec<&'static str> {
    COMMANDS.iter().map(|c| c.name).collect()
}

pub fn register() -> CreateCommand {
    CreateCommand::new("help")
        .description("Shows information about commands.")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "command",
                "The specific command you want help with",
            )
            .required(false),
        )
}

fn create_command_select_menu() -> CreateActionRow {
    let options = COMMANDS
        .iter()
        .map(|cmd| {
            let mut opt =
                CreateSelectMenuOption::new(cmd.name, cmd.name).description(cmd.description);
            if let Some(em) = cmd.category.emoji().chars().next() {
                opt = opt.emoji(em);
            }
            opt
        })
        .collect();
    let select_menu = CreateSelectMenu::new(ids::HELP_SELECT, CreateSelectMenuKind::String { options })
        .placeholder("Select a command for more details...");
    CreateActionRow::SelectMenu(select_menu)
}

async fn current_prefix(ctx: &Context) -> String {
    match AppState::from_ctx(ctx).await {
        Some(state) => state.prefix.read().await.clone(),
        None => "!".to_string(),
    }
}

fn create_help_embed(prefix: &str, command_name: Option<&str>) -> CreateEmbed {
    let embed = CreateEmbed::new()
        .footer(CreateEmbedFooter::new(format!("Current Prefix: {prefix}")))
        .color(COLOR_INFO);

    let Some(name) = command_name else {
        let mut embed = embed.title("Help Menu").description(format!(
            "Here are my commands. Use `{prefix}help <command>` or the dropdown below for details."
        ));
        for category in CommandCategory::ALL {
            let list = get_commands_in_category(category);
            if !list.is_empty() {
                embed = embed.field(
                    format!("{} {}", category.emoji(), category.name()),
                    list,
                    false,
                );
            }
        }
        return embed;
    };

    let name = name.trim().trim_start_matches(prefix).to_lowercase();
    match COMMANDS.iter().find(|c| c.name == name) {
        Some(cmd) => {
            let usage = cmd
                .usage
                .iter()
                .map(|u| format!("`{prefix}{u}`"))
                .collect::<Vec<_>>()
                .join("\n");
            embed
                .title(format!("{} Command: {}", cmd.category.emoji(), cmd.name))
                .field("Description", cmd.description, false)
                .field("Usage", usage, false)
                .field("Details", cmd.details, false)
        }
        None => embed
            .title("Command Not Found")
            .description(format!("Sorry, I don't know a command called `{name}`."))
            .color(COLOR_ALERT),
    }
}

fn get_commands_in_category(category: CommandCategory) -> String {
    COMMANDS
        .iter()
        .filter(|c| c.category == category)
        .map(|c| format!("`{}`", c.name))
        .collect::<Vec<_>>()
        .join(" ")
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    let command_name = interaction
        .data
        .options
        .first()
        .and_then(|opt| opt.value.as_str());
    let prefix = current_prefix(ctx).await;
    let mut builder =
        CreateInteractionResponseMessage::new().embed(create_help_embed(&prefix, command_name));
    if command_name.is_none() {
        builder = builder.components(vec![create_command_select_menu()]);
    }
    interaction
        .create_response(&ctx.http, CreateInteractionResponse::Message(builder))
        .await
        .ok();
}

pub async fn handle_interaction(ctx: &Context, interaction: &ComponentInteraction) {
    let ComponentInteractionDataKind::StringSelect { values } = &interaction.data.kind else {
        return;
    };
    let Some(selected) = values.first() else {
        return;
    };
    interaction.defer(&ctx.http).await.ok();
    let prefix = current_prefix(ctx).await;
    let builder = EditInteractionResponse::new()
        .embed(create_help_embed(&prefix, Some(selected)))
        .components(vec![create_command_select_menu()]);
    edit_component(ctx, interaction, "help", builder).await;
}

pub async fn run_prefix(ctx: &Context, msg: &Message, args: &[&str]) {
    let command_name = args.first().copied();
    let prefix = current_prefix(ctx).await;
    let mut builder = CreateMessage::new()
        .embed(create_help_embed(&prefix, command_name))
        .reference_message(msg);
    if command_name.is_none() {
        builder = builder.components(vec![create_command_select_menu()]);
    }
    msg.channel_id.send_message(&ctx.http, builder).await.ok();
}

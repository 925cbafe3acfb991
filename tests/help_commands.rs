use lumen_rpg::commands::help::all_command_names;
use std::collections::HashSet;

#[test]
fn help_lists_every_command_once() {
    let names = all_command_names();
    let unique: HashSet<_> = names.iter().collect();
    assert_eq!(unique.len(), names.len());
    for expected in [
        "start",
        "profile",
        "collection",
        "summon",
        "fuse",
        "redeem",
        "ascend",
        "explore",
        "miniboss",
        "daily",
        "shrine",
        "guild",
        "leaderboard",
        "config",
        "health",
        "help",
    ] {
        assert!(names.contains(&expected), "missing {expected} in help");
    }
}

#[test]
fn leaderboard_registers_under_its_name() {
    let command = lumen_rpg::commands::leaderboard::run::register();
    let body = serde_json::to_value(&command).unwrap();
    assert_eq!(body["name"], "leaderboard");
    assert_eq!(body["options"][0]["name"], "board");
}

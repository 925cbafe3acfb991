use lumen_rpg::config::sections::GuildRules;
use lumen_rpg::database::models::GuildRole;
use lumen_rpg::game::guild::{max_members, upgrade_cost, validate_name};

#[test]
fn names_are_trimmed_and_restricted() {
    let rules = GuildRules::default();
    assert_eq!(
        validate_name("  Moon Wardens ", &rules).unwrap(),
        "Moon Wardens"
    );
    assert_eq!(validate_name("night_owls-2", &rules).unwrap(), "night_owls-2");
    assert!(validate_name("ab", &rules).is_err());
    assert!(validate_name("bad!name", &rules).is_err());
    assert!(validate_name(&"x".repeat(33), &rules).is_err());
}

#[test]
fn capacity_and_upgrade_cost_scale_with_level() {
    let rules = GuildRules::default();
    assert_eq!(max_members(1, &rules), 10);
    assert_eq!(max_members(3, &rules), 14);
    assert_eq!(upgrade_cost(1, &rules), 100_000);
    assert_eq!(upgrade_cost(2, &rules), 200_000);
}

#[test]
fn rank_permissions() {
    assert!(GuildRole::Leader.can_promote());
    assert!(!GuildRole::Officer.can_promote());
    assert!(GuildRole::Officer.can_upgrade());
    assert!(!GuildRole::Member.can_upgrade());

    assert!(GuildRole::Leader.can_kick(GuildRole::Officer));
    assert!(GuildRole::Officer.can_kick(GuildRole::Member));
    assert!(!GuildRole::Officer.can_kick(GuildRole::Officer));
    assert!(!GuildRole::Member.can_kick(GuildRole::Member));
    assert!(!GuildRole::Officer.can_kick(GuildRole::Leader));
}

use lumen_rpg::handler::Command;
use lumen_rpg::interactions::ids;

#[test]
fn custom_ids_round_trip_through_their_parsers() {
    assert_eq!(ids::summon_again(5), "summon_again_5");
    assert_eq!(ids::parse_summon_again("summon_again_10"), Some(10));
    assert_eq!(ids::parse_summon_again("summon_again_x"), None);

    assert_eq!(ids::ascend_attack("x5"), "ascend_x5");
    assert_eq!(ids::parse_ascend("ascend_x20"), Some("x20"));
    assert_eq!(ids::parse_ascend(ids::ASCEND_REFRESH), None);

    assert_eq!(ids::parse_leaderboard(&ids::leaderboard_tab("power")), Some("power"));
}

#[test]
fn families_route_on_the_first_segment() {
    assert_eq!(ids::family("leaderboard_power"), "leaderboard");
    assert_eq!(ids::family(ids::ASCEND_REFRESH), "ascend");
    assert_eq!(ids::family(ids::HELP_SELECT), "help");
    assert_eq!(ids::family("summon_again_1"), "summon");
}

#[test]
fn prefix_aliases_resolve() {
    let parse = |s: &str| s.parse::<Command>().unwrap();
    assert_eq!(parse("lb"), Command::Leaderboard);
    assert_eq!(parse("TOP"), Command::Leaderboard);
    assert_eq!(parse("pull"), Command::Summon);
    assert_eq!(parse("mb"), Command::Miniboss);
    assert_eq!(parse("asc"), Command::Ascend);
    assert_eq!(parse("dance"), Command::Unknown);
}

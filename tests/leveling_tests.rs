mod common;

use lumen_rpg::config::sections::LevelingRules;
use lumen_rpg::game::leveling::{apply_experience, apply_to_player, xp_to_next};

#[test]
fn xp_curve_is_base_times_level_squared() {
    let rules = LevelingRules::default();
    assert_eq!(xp_to_next(1, &rules), 50);
    assert_eq!(xp_to_next(2, &rules), 200);
    assert_eq!(xp_to_next(3, &rules), 450);
    assert_eq!(xp_to_next(10, &rules), 5_000);
    // Level 0 is treated as level 1.
    assert_eq!(xp_to_next(0, &rules), 50);
}

#[test]
fn one_gain_can_cross_several_levels() {
    let rules = LevelingRules::default();
    let result = apply_experience(1, 0, 250, &rules);
    assert_eq!(result.new_level, 3);
    assert_eq!(result.levels_gained, 2);
    assert_eq!(result.new_experience, 0);
    assert_eq!(result.rewards.rikis, 1_000);
    assert_eq!(result.rewards.grace, 10);
    assert_eq!(result.rewards.max_energy, 10);
    assert_eq!(result.rewards.max_stamina, 4);
    assert_eq!(result.rewards.gems, 0);
}

#[test]
fn leftover_xp_carries_towards_next_level() {
    let rules = LevelingRules::default();
    let result = apply_experience(1, 30, 40, &rules);
    assert_eq!(result.new_level, 2);
    assert_eq!(result.new_experience, 20);
}

#[test]
fn milestone_levels_grant_gems() {
    let rules = LevelingRules::default();
    let result = apply_experience(9, 0, xp_to_next(9, &rules), &rules);
    assert_eq!(result.new_level, 10);
    assert_eq!(result.rewards.gems, 25);
}

#[test]
fn max_level_discards_extra_xp() {
    let rules = LevelingRules {
        max_level: 3,
        ..LevelingRules::default()
    };
    let result = apply_experience(2, 0, 10_000, &rules);
    assert_eq!(result.new_level, 3);
    assert_eq!(result.levels_gained, 1);
    assert_eq!(result.new_experience, 0);
}

#[test]
fn no_gain_means_no_level_up() {
    let rules = LevelingRules::default();
    let result = apply_experience(4, 10, 0, &rules);
    assert!(!result.did_level_up());
    let negative = apply_experience(4, 10, -500, &rules);
    assert_eq!(negative.new_experience, 10);
}

#[test]
fn applying_a_level_up_refills_pools() {
    let rules = LevelingRules::default();
    let mut p = common::player();
    p.energy = 3;
    p.stamina = 1;
    let result = apply_experience(p.level, p.experience, 50, &rules);
    apply_to_player(&mut p, &result);
    assert_eq!(p.level, 2);
    assert_eq!(p.max_energy, 105);
    assert_eq!(p.energy, 105);
    assert_eq!(p.max_stamina, 52);
    assert_eq!(p.stamina, 52);
    assert_eq!(p.rikis, 1_500);
    assert_eq!(p.grace, 15);
}

mod common;

use chrono::Duration;
use common::at;
use lumen_rpg::config::sections::ResourceRules;
use lumen_rpg::game::resources::{minutes_to_next, regen_pool, regenerate};

#[test]
fn whole_intervals_regenerate_and_remainder_carries() {
    let t0 = at(2024, 3, 10, 12, 0);
    let (value, ts) = regen_pool(10, 100, t0, t0 + Duration::minutes(12), 5);
    assert_eq!(value, 12);
    assert_eq!(ts, t0 + Duration::minutes(10));
}

#[test]
fn regeneration_caps_at_max_and_pins_timestamp() {
    let t0 = at(2024, 3, 10, 12, 0);
    let now = t0 + Duration::minutes(60);
    assert_eq!(regen_pool(98, 100, t0, now, 5), (100, now));
    assert_eq!(regen_pool(100, 100, t0, now, 5), (100, now));
}

#[test]
fn partial_interval_changes_nothing() {
    let t0 = at(2024, 3, 10, 12, 0);
    assert_eq!(regen_pool(10, 100, t0, t0 + Duration::minutes(3), 5), (10, t0));
}

#[test]
fn next_point_countdown() {
    let t0 = at(2024, 3, 10, 12, 0);
    assert_eq!(
        minutes_to_next(10, 100, t0, t0 + Duration::minutes(12), 5),
        Some(3)
    );
    assert_eq!(minutes_to_next(100, 100, t0, t0, 5), None);
}

#[test]
fn regenerate_updates_both_pools_independently() {
    let rules = ResourceRules::default();
    let mut p = common::player();
    let t0 = p.energy_updated;
    p.energy = 50;
    p.stamina = 10;
    let changed = regenerate(&mut p, t0 + Duration::minutes(25), &rules);
    assert!(changed);
    // Energy ticks every 5 minutes, stamina every 10.
    assert_eq!(p.energy, 55);
    assert_eq!(p.stamina, 12);
    assert_eq!(p.energy_updated, t0 + Duration::minutes(25));
    assert_eq!(p.stamina_updated, t0 + Duration::minutes(20));
}

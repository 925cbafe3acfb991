mod common;

use lumen_rpg::config::sections::GachaRules;
use lumen_rpg::error::RpgError;
use lumen_rpg::game::gacha::{
    pick_weighted, plan_summons, settle_summons, summon_cost, unlocked_tiers,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn cost_is_grace_per_summon_within_batch_limits() {
    let rules = GachaRules::default();
    assert_eq!(summon_cost(1, &rules).unwrap(), 5);
    assert_eq!(summon_cost(10, &rules).unwrap(), 50);
    assert!(summon_cost(0, &rules).is_err());
    assert!(summon_cost(11, &rules).is_err());
}

#[test]
fn tiers_unlock_with_level() {
    let rules = GachaRules::default();
    assert_eq!(unlocked_tiers(1, &rules), vec![1, 2, 3]);
    assert_eq!(unlocked_tiers(10, &rules), vec![1, 2, 3, 4]);
    assert_eq!(unlocked_tiers(90, &rules), (1..=12).collect::<Vec<_>>());
}

#[test]
fn pity_forces_a_top_tier_and_resets() {
    let rules = GachaRules::default();
    let mut rng = StdRng::seed_from_u64(11);
    let plan = plan_summons(1, 1, 24, &rules, &mut rng);
    assert_eq!(plan.pulls.len(), 1);
    assert!(plan.pulls[0].pity);
    assert!([2, 3].contains(&plan.pulls[0].tier));
    assert_eq!(plan.pity_counter, 0);
}

#[test]
fn pity_counter_advances_per_pull() {
    let rules = GachaRules::default();
    let mut rng = StdRng::seed_from_u64(5);
    let plan = plan_summons(3, 1, 0, &rules, &mut rng);
    assert_eq!(plan.pity_counter, 3);
    assert!(plan.pulls.iter().all(|p| !p.pity && (1..=3).contains(&p.tier)));

    // Crossing the threshold mid-batch resets and keeps counting.
    let plan = plan_summons(10, 1, 20, &rules, &mut rng);
    assert_eq!(plan.pulls.iter().filter(|p| p.pity).count(), 1);
    assert!(plan.pulls[4].pity);
    assert_eq!(plan.pity_counter, 5);
}

#[test]
fn weighted_pick_skips_zero_weights() {
    let mut rng = StdRng::seed_from_u64(2);
    let items = [("a", 0.0), ("b", 1.0)];
    for _ in 0..20 {
        let picked = pick_weighted(&items, |i| i.1, &mut rng).unwrap();
        assert_eq!(picked.0, "b");
    }
    let empty_weights = [("x", 0.0), ("y", 0.0)];
    assert_eq!(pick_weighted(&empty_weights, |i| i.1, &mut rng).unwrap().0, "x");
    let none: [(&str, f64); 0] = [];
    assert!(pick_weighted(&none, |i| i.1, &mut rng).is_none());
}

#[test]
fn settling_a_batch_spends_grace_and_carries_pity() {
    let rules = GachaRules::default();
    let mut rng = StdRng::seed_from_u64(21);
    let mut p = common::player();
    p.grace = 60;
    p.pity_counter = 20;

    let plan = plan_summons(10, p.level, p.pity_counter, &rules, &mut rng);
    settle_summons(&mut p, &plan, 50).unwrap();
    assert_eq!(p.grace, 10);
    assert_eq!(p.total_summons, 10);
    // The pity pull at 25 reset the counter, then five more pulls followed.
    assert_eq!(p.pity_counter, 5);

    let plan = plan_summons(5, p.level, p.pity_counter, &rules, &mut rng);
    let err = settle_summons(&mut p, &plan, 25).unwrap_err();
    assert!(matches!(
        err,
        RpgError::InsufficientResources {
            required: 25,
            available: 10,
            ..
        }
    ));
    assert_eq!(p.grace, 10);
    assert_eq!(p.pity_counter, 5);
    assert_eq!(p.total_summons, 10);
}

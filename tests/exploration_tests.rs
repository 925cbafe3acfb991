use lumen_rpg::config::sections::ExplorationRules;
use lumen_rpg::game::exploration::{
    energy_cost, explore_rewards, frontier, is_unlocked, miniboss_power, miniboss_rewards,
    next_stage, previous_stage, progress_gain, roll_encounter, validate_stage,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn deeper_stages_cost_more_energy() {
    let rules = ExplorationRules::default();
    assert_eq!(energy_cost(1, 1, &rules), 5);
    assert_eq!(energy_cost(3, 4, &rules), 12);
}

#[test]
fn progress_slows_in_later_sectors() {
    let rules = ExplorationRules::default();
    assert_eq!(progress_gain(1, &rules), 7.0);
    assert_eq!(progress_gain(3, &rules), 3.5);
}

#[test]
fn rewards_scale_with_stage() {
    let rules = ExplorationRules::default();
    assert_eq!(explore_rewards(1, 1, &rules), (44, 6));
    assert_eq!(miniboss_rewards(1, 1, &rules), (220, 30));
    assert_eq!(miniboss_power(2, 3, &rules), 3_000);
}

#[test]
fn stage_bounds_are_validated() {
    let rules = ExplorationRules::default();
    assert!(validate_stage(1, 1, &rules).is_ok());
    assert!(validate_stage(7, 9, &rules).is_ok());
    assert!(validate_stage(0, 1, &rules).is_err());
    assert!(validate_stage(8, 1, &rules).is_err());
    assert!(validate_stage(1, 10, &rules).is_err());
}

#[test]
fn stages_chain_across_sectors() {
    let rules = ExplorationRules::default();
    assert_eq!(next_stage(1, 3, &rules), Some((1, 4)));
    assert_eq!(next_stage(1, 9, &rules), Some((2, 1)));
    assert_eq!(next_stage(7, 9, &rules), None);
    assert_eq!(previous_stage(2, 1, &rules), Some((1, 9)));
    assert_eq!(previous_stage(1, 1, &rules), None);
}

#[test]
fn a_stage_opens_once_the_previous_miniboss_falls() {
    let rules = ExplorationRules::default();
    assert!(is_unlocked(1, 1, &[], &rules));
    assert!(!is_unlocked(1, 2, &[], &rules));
    assert!(is_unlocked(1, 2, &[(1, 1)], &rules));
    assert!(!is_unlocked(2, 1, &[(1, 1)], &rules));
}

#[test]
fn frontier_is_the_first_standing_miniboss() {
    let rules = ExplorationRules::default();
    assert_eq!(frontier(&[], &rules), Some((1, 1)));
    assert_eq!(frontier(&[(1, 1), (1, 2)], &rules), Some((1, 3)));

    let tiny = ExplorationRules {
        max_sector: 1,
        sublevels: 2,
        ..ExplorationRules::default()
    };
    assert_eq!(frontier(&[(1, 1), (1, 2)], &tiny), None);
}

#[test]
fn encounter_chance_bounds() {
    let mut rng = StdRng::seed_from_u64(4);
    let never = ExplorationRules {
        encounter_chance: 0.0,
        ..ExplorationRules::default()
    };
    assert_eq!(roll_encounter(3, &never, &mut rng), None);

    let always = ExplorationRules {
        encounter_chance: 1.0,
        ..ExplorationRules::default()
    };
    for _ in 0..20 {
        let tier = roll_encounter(3, &always, &mut rng).unwrap();
        assert!((1..=4).contains(&tier));
    }
}

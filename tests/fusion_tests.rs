mod common;

use common::maiden;
use lumen_rpg::config::sections::FusionRules;
use lumen_rpg::database::models::Element;
use lumen_rpg::error::RpgError;
use lumen_rpg::game::fusion::{
    FusionRoll, FusionSettlement, combine_elements, fusion_cost, redeem_shards, roll_fusion,
    settle_fusion, success_rate, validate_pair,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn cost_grows_geometrically_and_is_capped() {
    let rules = FusionRules::default();
    assert_eq!(fusion_cost(1, &rules), 1_000);
    assert_eq!(fusion_cost(2, &rules), 2_500);
    assert_eq!(fusion_cost(3, &rules), 6_250);
    assert_eq!(fusion_cost(11, &rules), 5_000_000);
}

#[test]
fn success_rates_cover_tiers_one_to_eleven() {
    let rules = FusionRules::default();
    assert_eq!(success_rate(1, &rules), Some(75.0));
    assert_eq!(success_rate(11, &rules), Some(25.0));
    assert_eq!(success_rate(12, &rules), None);
    assert_eq!(success_rate(0, &rules), None);
}

#[test]
fn pairs_must_share_a_tier_and_owner() {
    let a = maiden(1, 3, 1, Element::Infernal, 100);
    let b = maiden(2, 4, 1, Element::Umbral, 100);
    assert!(matches!(validate_pair(&a, &b), Err(RpgError::Validation(_))));

    let mut other_owner = maiden(3, 3, 1, Element::Umbral, 100);
    other_owner.player_id = 7;
    assert!(validate_pair(&a, &other_owner).is_err());

    let peak = maiden(4, 12, 2, Element::Earth, 100);
    assert!(validate_pair(&peak, &peak).is_err());
}

#[test]
fn a_stack_fuses_with_itself_only_with_two_copies() {
    let single = maiden(1, 2, 1, Element::Earth, 100);
    assert!(validate_pair(&single, &single).is_err());
    let pair = maiden(1, 2, 2, Element::Earth, 100);
    assert!(validate_pair(&pair, &pair).is_ok());
}

#[test]
fn element_combinations_ignore_order() {
    let rules = FusionRules::default();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        combine_elements(Element::Infernal, Element::Umbral, &rules, &mut rng),
        Element::Abyssal
    );
    assert_eq!(
        combine_elements(Element::Umbral, Element::Infernal, &rules, &mut rng),
        Element::Abyssal
    );
    assert_eq!(
        combine_elements(Element::Infernal, Element::Earth, &rules, &mut rng),
        Element::Tempest
    );
    assert_eq!(
        combine_elements(Element::Radiant, Element::Radiant, &rules, &mut rng),
        Element::Radiant
    );
}

#[test]
fn unknown_combination_picks_a_parent() {
    let rules = FusionRules {
        element_combinations: Default::default(),
        ..FusionRules::default()
    };
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..20 {
        let e = combine_elements(Element::Earth, Element::Tempest, &rules, &mut rng);
        assert!(e == Element::Earth || e == Element::Tempest);
    }
}

#[test]
fn guaranteed_rates_decide_the_roll() {
    let mut rng = StdRng::seed_from_u64(3);
    let always = FusionRules {
        rates: vec![100.0; 11],
        ..FusionRules::default()
    };
    let roll = roll_fusion(4, Element::Earth, Element::Earth, &always, &mut rng).unwrap();
    assert_eq!(
        roll,
        FusionRoll::Success {
            tier: 5,
            element: Element::Earth
        }
    );

    let never = FusionRules {
        rates: vec![0.0; 11],
        ..FusionRules::default()
    };
    let roll = roll_fusion(4, Element::Earth, Element::Earth, &never, &mut rng).unwrap();
    assert_eq!(
        roll,
        FusionRoll::Failure {
            shard_tier: 4,
            shards: 10
        }
    );

    assert!(roll_fusion(12, Element::Earth, Element::Earth, &always, &mut rng).is_err());
}

#[test]
fn redeeming_consumes_one_guarantee_worth_of_shards() {
    let rules = FusionRules::default();
    assert_eq!(redeem_shards(1, 150, &rules).unwrap(), 50);
    assert_eq!(redeem_shards(3, 100, &rules).unwrap(), 0);
    assert!(matches!(
        redeem_shards(1, 99, &rules),
        Err(RpgError::InsufficientResources {
            required: 100,
            available: 99,
            ..
        })
    ));
    assert!(redeem_shards(12, 500, &rules).is_err());
}

#[test]
fn shards_accumulate_per_tier_and_never_go_negative() {
    let mut p = common::player();
    assert_eq!(p.shards_for_tier(2), 0);
    p.add_shards(2, 30);
    p.add_shards(2, 10);
    assert_eq!(p.shards_for_tier(2), 40);
    p.add_shards(2, -100);
    assert_eq!(p.shards_for_tier(2), 0);
    assert_eq!(p.shards_for_tier(3), 0);
}

#[test]
fn successful_fusion_eats_both_inputs() {
    let mut p = common::player();
    let roll = FusionRoll::Success {
        tier: 3,
        element: Element::Radiant,
    };
    let settled = settle_fusion(&mut p, 7, 9, 2_500, roll);
    assert_eq!(
        settled,
        FusionSettlement {
            consumed: vec![(7, 1), (9, 1)],
            survivor: None,
            shards_gained: 0,
        }
    );
    assert_eq!(p.rikis, 1_000 - 2_500);
    assert_eq!(p.shards_for_tier(2), 0);

    let mut p = common::player();
    let settled = settle_fusion(&mut p, 7, 7, 1_000, roll);
    assert_eq!(settled.consumed, vec![(7, 2)]);
    assert_eq!(p.rikis, 0);
}

#[test]
fn failed_fusion_keeps_the_first_and_pays_shards() {
    let mut p = common::player();
    p.add_shards(2, 15);
    let roll = FusionRoll::Failure {
        shard_tier: 2,
        shards: 10,
    };
    let settled = settle_fusion(&mut p, 7, 9, 400, roll);
    assert_eq!(settled.consumed, vec![(9, 1)]);
    assert_eq!(settled.survivor, Some(7));
    assert_eq!(settled.shards_gained, 10);
    assert_eq!(p.shards_for_tier(2), 25);
    assert_eq!(p.rikis, 600);

    // One stack with two copies loses a single copy.
    let settled = settle_fusion(&mut p, 7, 7, 0, roll);
    assert_eq!(settled.consumed, vec![(7, 1)]);
    assert_eq!(p.shards_for_tier(2), 35);
}

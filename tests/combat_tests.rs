use lumen_rpg::config::sections::AscensionRules;
use lumen_rpg::game::combat::{
    AttackKind, FloorRewards, TowerState, apply_damage, enemy_hp, floor_rewards, is_boss_floor,
    resolve_attack,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn enemy_hp_scales_and_bosses_are_tougher() {
    let rules = AscensionRules::default();
    assert_eq!(enemy_hp(1, &rules), 1_000);
    assert_eq!(enemy_hp(2, &rules), 1_100);
    assert!(is_boss_floor(10, &rules));
    assert!(!is_boss_floor(9, &rules));
    assert_eq!(enemy_hp(10, &rules), 7_074);
}

#[test]
fn attack_keys_and_costs() {
    assert_eq!(AttackKind::from_key("x5"), Some(AttackKind::Five));
    assert_eq!(AttackKind::from_key("20"), Some(AttackKind::Twenty));
    assert_eq!(AttackKind::from_key("x3"), None);
    assert_eq!(AttackKind::Single.stamina_cost(), 1);
    assert_eq!(AttackKind::Five.stamina_cost(), 5);
    assert_eq!(AttackKind::Twenty.stamina_cost(), 20);
    assert_eq!(AttackKind::Twenty.key(), "x20");
}

#[test]
fn damage_without_crits_is_power_per_strike() {
    let rules = AscensionRules {
        crit_chance: 0.0,
        ..AscensionRules::default()
    };
    let mut rng = StdRng::seed_from_u64(1);
    let outcome = resolve_attack(120, AttackKind::Five, &rules, &mut rng).unwrap();
    assert_eq!(outcome.damage, 600);
    assert_eq!(outcome.strikes, 5);
    assert_eq!(outcome.crits, 0);
}

#[test]
fn guaranteed_crits_multiply_every_strike() {
    let rules = AscensionRules {
        crit_chance: 1.0,
        ..AscensionRules::default()
    };
    let mut rng = StdRng::seed_from_u64(1);
    let outcome = resolve_attack(100, AttackKind::Single, &rules, &mut rng).unwrap();
    assert_eq!(outcome.damage, 150);
    assert_eq!(outcome.crits, 1);
}

#[test]
fn attacking_without_power_is_rejected() {
    let rules = AscensionRules::default();
    let mut rng = StdRng::seed_from_u64(1);
    assert!(resolve_attack(0, AttackKind::Single, &rules, &mut rng).is_err());
}

#[test]
fn partial_damage_keeps_the_floor() {
    let rules = AscensionRules::default();
    let result = apply_damage(TowerState::fresh(&rules), 400, &rules);
    assert_eq!(result.state.floor, 1);
    assert_eq!(result.state.enemy_hp, 600);
    assert_eq!(result.cleared, None);
}

#[test]
fn killing_blow_advances_without_overkill_carry() {
    let rules = AscensionRules::default();
    let result = apply_damage(TowerState::fresh(&rules), 50_000, &rules);
    assert_eq!(result.state.floor, 2);
    assert_eq!(result.state.highest_floor, 1);
    assert_eq!(result.state.enemy_hp, 1_100);
    assert_eq!(result.state.enemy_max_hp, 1_100);
    assert_eq!(
        result.cleared,
        Some((
            1,
            FloorRewards {
                rikis: 50,
                xp: 10,
                gems: 0
            }
        ))
    );
}

#[test]
fn boss_floors_pay_gems() {
    let rules = AscensionRules::default();
    assert_eq!(
        floor_rewards(10, &rules),
        FloorRewards {
            rikis: 500,
            xp: 100,
            gems: 10
        }
    );
}

mod common;

use common::maiden;
use lumen_rpg::config::sections::PowerRules;
use lumen_rpg::database::models::Element;
use lumen_rpg::game::power::{stack_power, tier_multiplier, total_power};

#[test]
fn tier_multipliers_grow_by_half() {
    let rules = PowerRules::default();
    assert_eq!(tier_multiplier(1, &rules), 1.0);
    assert_eq!(tier_multiplier(2, &rules), 1.5);
    assert_eq!(tier_multiplier(3, &rules), 2.25);
    // Out-of-range tiers clamp to the ends of the table.
    assert_eq!(tier_multiplier(0, &rules), 1.0);
    assert_eq!(tier_multiplier(99, &rules), tier_multiplier(12, &rules));
}

#[test]
fn power_is_attack_times_quantity_times_multiplier() {
    let rules = PowerRules::default();
    assert_eq!(stack_power(100, 2, 3, &rules), 450);
    assert_eq!(stack_power(100, 0, 3, &rules), 0);

    let collection = vec![
        maiden(1, 1, 3, Element::Infernal, 100),
        maiden(2, 2, 1, Element::Radiant, 200),
    ];
    assert_eq!(total_power(&collection, &rules), 300 + 300);
    assert_eq!(total_power(&[], &rules), 0);
}

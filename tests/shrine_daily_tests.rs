mod common;

use chrono::Duration;
use common::at;
use lumen_rpg::config::sections::{DailyRules, ShrineRules, ShrineYield};
use lumen_rpg::game::daily::{DailyReward, DailyStatus, daily_reward, daily_status};
use lumen_rpg::game::shrine::{collect_ready, kind, shrine_yield, upgrade_cost};

#[test]
fn shrine_kinds_are_looked_up_by_key() {
    let rules = ShrineRules::default();
    let lesser = kind(&rules, "lesser").unwrap();
    assert_eq!(lesser.yields, ShrineYield::Rikis);
    assert_eq!(kind(&rules, "radiant").unwrap().yields, ShrineYield::Grace);
    assert!(kind(&rules, "golden").is_err());
}

#[test]
fn yields_and_upgrades_grow_with_level() {
    let rules = ShrineRules::default();
    let lesser = kind(&rules, "lesser").unwrap();
    assert_eq!(shrine_yield(lesser, 1), 400);
    assert_eq!(shrine_yield(lesser, 2), 500);
    assert_eq!(shrine_yield(lesser, 3), 625);
    assert_eq!(upgrade_cost(lesser, 1), 10_000);
    assert_eq!(upgrade_cost(lesser, 2), 18_000);
}

#[test]
fn collection_waits_for_cooldown() {
    let rules = ShrineRules::default();
    let lesser = kind(&rules, "lesser").unwrap();
    let t0 = at(2024, 3, 10, 8, 0);
    assert_eq!(
        collect_ready(lesser, t0, t0 + Duration::hours(3)),
        Err(Duration::hours(1))
    );
    assert_eq!(collect_ready(lesser, t0, t0 + Duration::hours(4)), Ok(()));
}

#[test]
fn first_daily_starts_a_streak() {
    let now = at(2024, 3, 10, 15, 0);
    assert_eq!(
        daily_status(None, 0, now),
        DailyStatus::Available { new_streak: 1 }
    );
}

#[test]
fn consecutive_days_extend_the_streak() {
    let now = at(2024, 3, 10, 1, 0);
    let yesterday_late = at(2024, 3, 9, 23, 30);
    assert_eq!(
        daily_status(Some(yesterday_late), 4, now),
        DailyStatus::Available { new_streak: 5 }
    );
}

#[test]
fn a_missed_day_resets_the_streak() {
    let now = at(2024, 3, 10, 15, 0);
    assert_eq!(
        daily_status(Some(at(2024, 3, 8, 15, 0)), 12, now),
        DailyStatus::Available { new_streak: 1 }
    );
}

#[test]
fn claiming_twice_a_day_reports_time_to_midnight() {
    let now = at(2024, 3, 10, 15, 0);
    assert_eq!(
        daily_status(Some(at(2024, 3, 10, 8, 0)), 2, now),
        DailyStatus::Claimed {
            remaining: Duration::hours(9)
        }
    );
}

#[test]
fn streak_bonus_is_capped_and_weeks_pay_gems() {
    let rules = DailyRules::default();
    assert_eq!(
        daily_reward(1, &rules),
        DailyReward {
            rikis: 1_000,
            grace: 5,
            gems: 0
        }
    );
    assert_eq!(
        daily_reward(7, &rules),
        DailyReward {
            rikis: 1_600,
            grace: 5,
            gems: 10
        }
    );
    assert_eq!(daily_reward(20, &rules).rikis, 2_000);
}

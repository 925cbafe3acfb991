//! Daily login rewards with streaks (UTC days).

use crate::config::sections::DailyRules;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyStatus {
    Available { new_streak: i32 },
    Claimed { remaining: Duration },
}

pub fn daily_status(last: Option<DateTime<Utc>>, streak: i32, now: DateTime<Utc>) -> DailyStatus {
    let today = now.date_naive();
    let Some(last_day) = last.map(|l| l.date_naive()) else {
        return DailyStatus::Available { new_streak: 1 };
    };
    if last_day >= today {
        let next_midnight = (today + Duration::days(1))
            .and_hms_opt(0, 0, 0)
            .map(|n| n.and_utc())
            .unwrap_or(now);
        return DailyStatus::Claimed {
            remaining: next_midnight - now,
        };
    }
    if last_day + Duration::days(1) == today {
        DailyStatus::Available {
            new_streak: streak + 1,
        }
    } else {
        DailyStatus::Available { new_streak: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DailyReward {
    pub rikis: i64,
    pub grace: i32,
    pub gems: i32,
}

pub fn daily_reward(streak: i32, rules: &DailyRules) -> DailyReward {
    let bonus = (rules.streak_bonus * (streak.max(1) - 1) as i64).min(rules.max_streak_bonus);
    DailyReward {
        rikis: rules.rikis + bonus,
        grace: rules.grace,
        gems: if streak > 0 && streak % 7 == 0 {
            rules.weekly_gems
        } else {
            0
        },
    }
}

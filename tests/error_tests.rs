use chrono::Duration;
use lumen_rpg::error::{RpgError, format_duration};
use lumen_rpg::ui::style::{fmt_num, progress_bar, stat_pair, tier_label};

#[test]
fn user_messages_are_friendly() {
    assert_eq!(
        RpgError::insufficient("grace", 50, 12).user_message(),
        "You need **50** grace but only have **12**."
    );
    assert_eq!(
        RpgError::not_found("that maiden").user_message(),
        "Could not find that maiden."
    );
    let cooldown = RpgError::Cooldown {
        action: "daily reward",
        remaining: Duration::minutes(125),
    };
    assert_eq!(
        cooldown.user_message(),
        "Daily reward is on cooldown. Try again in **2h 5m**."
    );
}

#[test]
fn internal_errors_do_not_leak_details() {
    let err = RpgError::Internal("connection string postgres://secret".into());
    assert!(!err.is_user_error());
    assert!(!err.user_message().contains("secret"));
    assert_eq!(err.title(), "Error");
}

#[test]
fn transient_classification() {
    assert!(RpgError::Database(sqlx::Error::PoolTimedOut).is_transient());
    assert!(!RpgError::Database(sqlx::Error::RowNotFound).is_transient());
    assert!(!RpgError::validation("x").is_transient());
    assert!(RpgError::validation("x").is_user_error());
    assert!(RpgError::Busy.is_user_error());
}

#[test]
fn durations_format_compactly() {
    assert_eq!(format_duration(Duration::seconds(45)), "45s");
    assert_eq!(format_duration(Duration::seconds(90)), "1m 30s");
    assert_eq!(format_duration(Duration::minutes(90)), "1h 30m");
    assert_eq!(format_duration(Duration::seconds(3_605)), "1h");
    assert_eq!(format_duration(Duration::zero()), "less than a second");
}

#[test]
fn numbers_and_bars() {
    assert_eq!(fmt_num(0), "0");
    assert_eq!(fmt_num(999), "999");
    assert_eq!(fmt_num(1_234_567), "1,234,567");
    assert_eq!(fmt_num(-1_000), "-1,000");
    assert_eq!(progress_bar(5.0, 10.0), "█████░░░░░");
    assert_eq!(progress_bar(3.0, 0.0), "░".repeat(10));
    assert_eq!(progress_bar(20.0, 10.0), "█".repeat(10));
    assert_eq!(tier_label(3), "T3");
    assert_eq!(stat_pair(3, 5), "`3/5`");
}

use lumen_rpg::error::RpgError;
use lumen_rpg::settings::{DEFAULT_LOG_FILTER, Settings};
use std::collections::HashMap;
use std::time::Duration;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

const REQUIRED: [(&str, &str); 2] = [
    ("DISCORD_TOKEN", "token"),
    ("DATABASE_URL", "postgres://localhost/lumen"),
];

#[test]
fn defaults_apply_when_only_required_keys_are_set() {
    let s = Settings::from_lookup(lookup(&REQUIRED)).unwrap();
    assert_eq!(s.discord_token, "token");
    assert_eq!(s.command_prefix, "!");
    assert_eq!(s.db_max_connections, 10);
    assert_eq!(s.config_refresh, Duration::from_secs(300));
    assert_eq!(s.health_check_interval, Duration::from_secs(30));
    assert_eq!(s.guild_id, None);
    assert_eq!(s.redis_url, None);
    assert!(s.admin_ids.is_empty());
}

#[test]
fn missing_or_blank_required_keys_fail() {
    let err = Settings::from_lookup(lookup(&[("DISCORD_TOKEN", "token")])).unwrap_err();
    assert!(matches!(err, RpgError::Config(msg) if msg.contains("DATABASE_URL")));

    let blank = Settings::from_lookup(lookup(&[
        ("DISCORD_TOKEN", "  "),
        ("DATABASE_URL", "postgres://x"),
    ]));
    assert!(blank.is_err());
}

#[test]
fn optional_values_are_parsed() {
    let mut pairs = REQUIRED.to_vec();
    pairs.extend([
        ("GUILD_ID", "123456789"),
        ("REDIS_URL", "redis://127.0.0.1/"),
        ("COMMAND_PREFIX", "?"),
        ("ADMIN_IDS", "1, 2,,3"),
        ("CONFIG_REFRESH_SECS", "60"),
    ]);
    let s = Settings::from_lookup(lookup(&pairs)).unwrap();
    assert_eq!(s.guild_id, Some(123456789));
    assert_eq!(s.redis_url.as_deref(), Some("redis://127.0.0.1/"));
    assert_eq!(s.command_prefix, "?");
    assert_eq!(s.admin_ids, vec![1, 2, 3]);
    assert!(s.is_admin(2));
    assert!(!s.is_admin(4));
    assert_eq!(s.config_refresh, Duration::from_secs(60));
}

#[test]
fn malformed_numbers_are_config_errors() {
    let mut pairs = REQUIRED.to_vec();
    pairs.push(("GUILD_ID", "not-a-number"));
    assert!(matches!(
        Settings::from_lookup(lookup(&pairs)),
        Err(RpgError::Config(_))
    ));
}

#[test]
fn default_log_filter_is_verbose_for_the_crate() {
    assert_eq!(DEFAULT_LOG_FILTER, "info,lumen_rpg=debug");
    assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
}

use lumen_rpg::config::sections::{FusionRules, GachaRules};
use lumen_rpg::config::{ConfigManager, ConfigStore, MemoryConfigStore};
use lumen_rpg::error::RpgError;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

fn store_with_fusion_override() -> Arc<MemoryConfigStore> {
    let mut values = HashMap::new();
    values.insert("fusion".to_string(), json!({ "base_cost": 2000 }));
    Arc::new(MemoryConfigStore::with_values(values))
}

#[tokio::test]
async fn stored_values_override_defaults_per_field() {
    let store = store_with_fusion_override();
    let config = ConfigManager::new(store, Duration::from_secs(60));

    assert_eq!(config.get_value("fusion.base_cost").await, Some(json!(2000)));
    assert_eq!(config.get_value("fusion.cost_growth").await, Some(json!(2.5)));
    assert_eq!(config.get_value("fusion.rates.0").await, Some(json!(75.0)));
    assert_eq!(config.get_value("nothing.here").await, None);
    assert_eq!(config.get("nothing.here", 7_i64).await, 7);
    assert_eq!(config.get("fusion.base_cost", 0_i64).await, 2000);
    // Wrong shape falls back.
    assert_eq!(config.get("fusion.rates", 1_i64).await, 1);

    let fusion: FusionRules = config.section().await;
    assert_eq!(fusion.base_cost, 2000);
    assert_eq!(fusion.cost_growth, 2.5);
    assert_eq!(fusion.shards_for_guarantee, 100);
}

#[tokio::test]
async fn invalid_section_shape_uses_defaults() {
    let mut values = HashMap::new();
    values.insert("gacha".to_string(), json!({ "max_batch": "ten" }));
    let config = ConfigManager::new(
        Arc::new(MemoryConfigStore::with_values(values)),
        Duration::from_secs(60),
    );
    let gacha: GachaRules = config.section().await;
    assert_eq!(gacha, GachaRules::default());
}

#[tokio::test]
async fn set_writes_through_to_the_store() {
    let store = store_with_fusion_override();
    let config = ConfigManager::new(store.clone(), Duration::from_secs(60));

    config.set("gacha.max_batch", json!(20)).await.unwrap();
    let gacha: GachaRules = config.section().await;
    assert_eq!(gacha.max_batch, 20);
    assert_eq!(gacha.grace_per_summon, 5);

    config.set("fusion.rates.1", json!(90.0)).await.unwrap();
    assert_eq!(config.get_value("fusion.rates.1").await, Some(json!(90.0)));
    let fusion: FusionRules = config.section().await;
    assert_eq!(fusion.rates[1], 90.0);
    assert_eq!(fusion.rates[0], 75.0);
    assert_eq!(fusion.base_cost, 2000);

    let saved = store.load_all().await.unwrap();
    assert_eq!(saved["gacha"]["max_batch"], json!(20));
    assert_eq!(config.keys().await, vec!["fusion", "gacha"]);
}

#[tokio::test]
async fn bad_paths_are_rejected() {
    let config = ConfigManager::new(store_with_fusion_override(), Duration::from_secs(60));
    assert!(matches!(
        config.set("", json!(1)).await,
        Err(RpgError::Validation(_))
    ));
    assert!(matches!(
        config.set("fusion.rates.99", json!(1)).await,
        Err(RpgError::Validation(_))
    ));
}

#[tokio::test]
async fn snapshot_is_cached_until_invalidated() {
    let store = store_with_fusion_override();
    let config = ConfigManager::new(store.clone(), Duration::from_secs(3600));
    assert_eq!(config.refresh().await.unwrap(), 1);

    store.put("daily", json!({ "rikis": 5 })).await;
    assert_eq!(config.get_value("daily.rikis").await, Some(json!(1000)));

    config.invalidate().await;
    assert_eq!(config.get_value("daily.rikis").await, Some(json!(5)));
}

#[tokio::test]
async fn failed_reload_keeps_previous_snapshot() {
    let store = store_with_fusion_override();
    let config = ConfigManager::new(store.clone(), Duration::ZERO);
    assert_eq!(config.get_value("fusion.base_cost").await, Some(json!(2000)));

    store.set_failing(true);
    assert!(config.refresh().await.is_err());
    assert_eq!(config.get_value("fusion.base_cost").await, Some(json!(2000)));

    store.set_failing(false);
    store.put("fusion", json!({ "base_cost": 3000 })).await;
    assert_eq!(config.get_value("fusion.base_cost").await, Some(json!(3000)));
}

#[tokio::test]
async fn mistyped_set_is_rejected_and_keeps_saved_values() {
    let store = store_with_fusion_override();
    let config = ConfigManager::new(store.clone(), Duration::from_secs(60));
    config.set("fusion.shards_for_guarantee", json!(40)).await.unwrap();

    assert!(matches!(
        config.set("fusion.base_cost", json!("abc")).await,
        Err(RpgError::Validation(_))
    ));
    assert!(matches!(
        config.set("gacha", json!(5)).await,
        Err(RpgError::Validation(_))
    ));

    let fusion: FusionRules = config.section().await;
    assert_eq!(fusion.base_cost, 2000);
    assert_eq!(fusion.shards_for_guarantee, 40);
    let saved = store.load_all().await.unwrap();
    assert_eq!(saved["fusion"]["base_cost"], json!(2000));
    assert!(!saved.contains_key("gacha"));

    // Keys without a typed section take any shape.
    config.set("motd.text", json!("hello")).await.unwrap();
    assert_eq!(config.get_value("motd.text").await, Some(json!("hello")));
}

#[tokio::test]
async fn bare_section_key_shows_defaults_with_overrides() {
    let config = ConfigManager::new(store_with_fusion_override(), Duration::from_secs(60));
    let fusion = config.get_value("fusion").await.unwrap();
    assert_eq!(fusion["base_cost"], json!(2000));
    assert_eq!(fusion["cost_growth"], json!(2.5));
    assert_eq!(fusion["shards_for_guarantee"], json!(100));

    let daily = config.get_value("daily").await.unwrap();
    assert_eq!(daily["rikis"], json!(1000));
}

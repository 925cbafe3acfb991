use lumen_rpg::services::cache::{get_with_ttl, insert};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[tokio::test]
async fn fresh_entries_hit_and_stale_ones_are_dropped() {
    let map: RwLock<HashMap<u8, (Instant, Vec<i64>)>> = RwLock::new(HashMap::new());
    assert_eq!(get_with_ttl(&map, &1, Duration::from_secs(60)).await, None);

    insert(&map, 1, vec![3, 2, 1]).await;
    assert_eq!(
        get_with_ttl(&map, &1, Duration::from_secs(60)).await,
        Some(vec![3, 2, 1])
    );

    assert_eq!(get_with_ttl(&map, &1, Duration::ZERO).await, None);
    assert!(map.read().await.is_empty());
}

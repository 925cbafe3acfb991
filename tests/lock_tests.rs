use lumen_rpg::services::lock::{ActionLock, MemoryLock, click_key};
use std::time::Duration;

const TTL: Duration = Duration::from_secs(5);

#[test]
fn click_keys_are_scoped_by_user_and_action() {
    assert_eq!(click_key(42, "ascend"), "click:42:ascend");
    assert_ne!(click_key(42, "ascend"), click_key(43, "ascend"));
}

#[tokio::test(start_paused = true)]
async fn a_held_lock_blocks_until_released() {
    let lock = MemoryLock::new();
    let token = lock.try_acquire("click:1:summon", TTL).await.unwrap().unwrap();
    assert!(lock.try_acquire("click:1:summon", TTL).await.unwrap().is_none());
    // Other keys are independent.
    assert!(lock.try_acquire("click:2:summon", TTL).await.unwrap().is_some());

    assert!(lock.release("click:1:summon", &token).await.unwrap());
    assert!(!lock.release("click:1:summon", &token).await.unwrap());
    assert!(lock.try_acquire("click:1:summon", TTL).await.unwrap().is_some());
}

#[tokio::test(start_paused = true)]
async fn only_the_owner_can_release() {
    let lock = MemoryLock::new();
    let owner = lock.try_acquire("a", TTL).await.unwrap().unwrap();
    let stranger = lock.try_acquire("b", TTL).await.unwrap().unwrap();
    assert!(!lock.release("a", &stranger).await.unwrap());
    assert!(lock.try_acquire("a", TTL).await.unwrap().is_none());
    assert!(lock.release("a", &owner).await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn locks_expire_after_their_ttl() {
    let lock = MemoryLock::new();
    let stale = lock.try_acquire("k", TTL).await.unwrap().unwrap();
    tokio::time::advance(Duration::from_secs(4)).await;
    assert!(lock.try_acquire("k", TTL).await.unwrap().is_none());
    tokio::time::advance(Duration::from_secs(2)).await;
    let fresh = lock.try_acquire("k", TTL).await.unwrap().unwrap();
    assert_ne!(stale, fresh);
    // The expired token no longer owns the key.
    assert!(!lock.release("k", &stale).await.unwrap());
}

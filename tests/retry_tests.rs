use lumen_rpg::database::retry::RetryPolicy;
use lumen_rpg::error::{RpgError, RpgResult};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

#[test]
fn backoff_doubles_until_the_cap() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.base_delay_for(1), Duration::from_millis(100));
    assert_eq!(policy.base_delay_for(2), Duration::from_millis(200));
    assert_eq!(policy.base_delay_for(3), Duration::from_millis(400));
    assert_eq!(policy.base_delay_for(10), Duration::from_secs(2));
    assert_eq!(policy.base_delay_for(u32::MAX), Duration::from_secs(2));
}

#[test]
fn jitter_stays_within_its_band() {
    let policy = RetryPolicy::default();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let d = policy.delay_for(1, &mut rng);
        assert!(d >= Duration::from_millis(74) && d <= Duration::from_millis(126));
        assert!(policy.delay_for(8, &mut rng) <= policy.max_delay);
    }

    let exact = RetryPolicy {
        jitter: 0.0,
        ..RetryPolicy::default()
    };
    assert_eq!(exact.delay_for(2, &mut rng), Duration::from_millis(200));
}

async fn flaky(calls: Arc<AtomicU32>, fail_times: u32, err: fn() -> RpgError) -> RpgResult<u32> {
    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
    if n <= fail_times { Err(err()) } else { Ok(n) }
}

fn pool_timeout() -> RpgError {
    RpgError::Database(sqlx::Error::PoolTimedOut)
}

fn bad_input() -> RpgError {
    RpgError::validation("nope")
}

#[tokio::test(start_paused = true)]
async fn transient_failures_are_retried() {
    let calls = Arc::new(AtomicU32::new(0));
    let result = RetryPolicy::default()
        .run("flaky", || flaky(calls.clone(), 2, pool_timeout))
        .await;
    assert_eq!(result.unwrap(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn attempts_are_bounded() {
    let calls = Arc::new(AtomicU32::new(0));
    let result = RetryPolicy::default()
        .run("down", || flaky(calls.clone(), u32::MAX, pool_timeout))
        .await;
    assert!(result.unwrap_err().is_transient());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn user_errors_fail_immediately() {
    let calls = Arc::new(AtomicU32::new(0));
    let result = RetryPolicy::default()
        .run("validate", || flaky(calls.clone(), 1, bad_input))
        .await;
    assert!(matches!(result, Err(RpgError::Validation(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let calls = Arc::new(AtomicU32::new(0));
    let result = RetryPolicy::none()
        .run("once", || flaky(calls.clone(), 1, pool_timeout))
        .await;
    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

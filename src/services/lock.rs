//! Short-lived per-user action locks that stop double clicks from running an action twice.
//!
//! Keys look like `click:{user_id}:{action}`. A lock is owned by the random token returned
//! from `try_acquire`; only that token can release it, and every lock expires after its TTL
//! so a crashed handler cannot wedge a player.

use crate::error::RpgResult;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

pub const CLICK_LOCK_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockToken(String);

impl LockToken {
    fn generate() -> Self {
        LockToken(format!("{:032x}", rand::random::<u128>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn click_key(user_id: u64, action: &str) -> String {
    format!("click:{user_id}:{action}")
}

#[async_trait]
pub trait ActionLock: Send + Sync {
    /// Returns a token when the lock was free, `None` when someone else holds it.
    async fn try_acquire(&self, key: &str, ttl: Duration) -> RpgResult<Option<LockToken>>;

    /// Releases the lock if `token` still owns it. Returns whether anything was removed.
    async fn release(&self, key: &str, token: &LockToken) -> RpgResult<bool>;
}

/// Single-process lock used when no Redis is configured.
#[derive(Default)]
pub struct MemoryLock {
    held: Mutex<HashMap<String, (LockToken, Instant)>>,
}

impl MemoryLock {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActionLock for MemoryLock {
    async fn try_acquire(&self, key: &str, ttl: Duration) -> RpgResult<Option<LockToken>> {
        let now = Instant::now();
        let mut held = self.held.lock().await;
        held.retain(|_, (_, expires)| *expires > now);
        if held.contains_key(key) {
            return Ok(None);
        }
        let token = LockToken::generate();
        held.insert(key.to_string(), (token.clone(), now + ttl));
        Ok(Some(token))
    }

    async fn release(&self, key: &str, token: &LockToken) -> RpgResult<bool> {
        let mut held = self.held.lock().await;
        match held.get(key) {
            Some((owner, _)) if owner == token => {
                held.remove(key);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

const RELEASE_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
else
    return 0
end
"#;

/// Lock shared by every bot process talking to the same Redis.
pub struct RedisLock {
    conn: ConnectionManager,
}

impl RedisLock {
    pub async fn connect(url: &str) -> RpgResult<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl ActionLock for RedisLock {
    async fn try_acquire(&self, key: &str, ttl: Duration) -> RpgResult<Option<LockToken>> {
        let token = LockToken::generate();
        let mut conn = self.conn.clone();
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(token.as_str())
            .arg("NX")
            .arg("PX")
            .arg(ttl.as_millis() as u64)
            .query_async(&mut conn)
            .await?;
        debug!(target = "lock.redis", key, acquired = reply.is_some());
        Ok(reply.map(|_| token))
    }

    async fn release(&self, key: &str, token: &LockToken) -> RpgResult<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = redis::Script::new(RELEASE_SCRIPT)
            .key(key)
            .arg(token.as_str())
            .invoke_async(&mut conn)
            .await?;
        Ok(removed == 1)
    }
}

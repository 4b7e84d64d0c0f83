//! In-memory result store with per-entry expiry

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

/// How entries leave the cache once their TTL is up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryPolicy {
    /// Every `set` spawns its own removal task. Overwriting a key does not
    /// cancel the earlier task, which will remove the newer value early.
    #[default]
    Timer,
    /// Entries carry a deadline checked on read. Overwriting resets it, and
    /// every `set` sweeps out entries already past their deadline.
    Lazy,
}

impl fmt::Display for ExpiryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timer => write!(f, "timer"),
            Self::Lazy => write!(f, "lazy"),
        }
    }
}

impl FromStr for ExpiryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "timer" => Ok(Self::Timer),
            "lazy" => Ok(Self::Lazy),
            _ => Err(format!("Invalid expiry policy: {} (expected timer or lazy)", s)),
        }
    }
}

struct Entry<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> Entry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

type Entries<V> = RwLock<HashMap<String, Entry<V>>>;

/// Shared key/value cache with a fixed time-to-live
///
/// Cloning is cheap and every clone sees the same entries. Readers share a
/// single lock; writers, including expiry tasks, take it exclusively.
/// Timer expiry spawns onto the current tokio runtime.
pub struct TtlCache<V> {
    entries: Arc<Entries<V>>,
    ttl: Option<Duration>,
    policy: ExpiryPolicy,
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
            policy: self.policy,
        }
    }
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a cache; `None` or a zero TTL keeps entries until cleared
    pub fn new(ttl: Option<Duration>, policy: ExpiryPolicy) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: ttl.filter(|ttl| !ttl.is_zero()),
            policy,
        }
    }

    /// Create a cache from a TTL in seconds; zero or negative disables expiry
    pub fn from_secs(ttl_secs: i64, policy: ExpiryPolicy) -> Self {
        let ttl = u64::try_from(ttl_secs).ok().map(Duration::from_secs);
        Self::new(ttl, policy)
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    /// Look up a live entry
    pub async fn get(&self, key: &str) -> Option<V> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(Instant::now()) => {
                    return Some(entry.value.clone())
                }
                Some(_) => {}
            }
        }

        // Past its deadline; drop it unless a writer replaced it meanwhile
        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|entry| entry.is_expired(Instant::now()))
        {
            entries.remove(key);
            debug!("Dropped expired cache entry {}", key);
        }
        None
    }

    /// Insert or replace an entry
    pub async fn set(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let now = Instant::now();
        // A deadline past the clock's range never arrives
        let expires_at = match (self.policy, self.ttl) {
            (ExpiryPolicy::Lazy, Some(ttl)) => now.checked_add(ttl),
            _ => None,
        };

        {
            let mut entries = self.entries.write().await;
            if self.policy == ExpiryPolicy::Lazy {
                let before = entries.len();
                entries.retain(|_, entry| !entry.is_expired(now));
                let swept = before - entries.len();
                if swept > 0 {
                    debug!("Swept {} expired cache entries", swept);
                }
            }
            entries.insert(key.clone(), Entry { value, expires_at });
        }

        if let (ExpiryPolicy::Timer, Some(ttl)) = (self.policy, self.ttl) {
            schedule_removal(Arc::downgrade(&self.entries), key, ttl);
        }
    }

    /// Drop every entry; pending removal tasks are left to run
    pub async fn clear(&self) {
        self.entries.write().await.clear();
        debug!("Cache cleared");
    }

    /// Number of stored entries, including lazily expired ones not yet swept
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn schedule_removal<V>(entries: Weak<Entries<V>>, key: String, ttl: Duration)
where
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(ttl).await;
        let Some(entries) = entries.upgrade() else {
            return;
        };
        if entries.write().await.remove(&key).is_some() {
            debug!("Expired cache entry {}", key);
        }
    });
}

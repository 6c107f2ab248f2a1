//! Remote tier response cache.
//!
//! Memoizes upstream resolution results under a single configured TTL; the
//! upstream records' own TTLs do not affect entry lifetime.

use super::key::CacheKey;
use rustc_hash::FxBuildHasher;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::debug;
use veil_dns_application::ports::CacheMaintenancePort;
use veil_dns_domain::ResolutionResult;

struct ResultEntry {
    result: ResolutionResult,
    expires_at: Instant,
}

pub struct ResultCache {
    entries: RwLock<HashMap<CacheKey, ResultEntry, FxBuildHasher>>,
    max_items: usize,
    ttl: Duration,
}

impl ResultCache {
    pub fn new(max_items: usize, ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::with_hasher(FxBuildHasher)),
            max_items,
            ttl,
        }
    }

    /// Returns a copy of the stored result; expired entries are deleted and
    /// reported as misses.
    pub fn get(&self, key: &CacheKey) -> Option<ResolutionResult> {
        let now = Instant::now();
        {
            let entries = self.entries.read().unwrap();
            let entry = entries.get(key)?;
            if now < entry.expires_at {
                return Some(entry.result.clone());
            }
        }

        let mut entries = self.entries.write().unwrap();
        if entries.get(key).is_some_and(|e| now >= e.expires_at) {
            entries.remove(key);
        }
        None
    }

    pub fn insert(&self, key: CacheKey, result: ResolutionResult) {
        let mut entries = self.entries.write().unwrap();

        if entries.len() >= self.max_items {
            Self::evict_nearest_expiry(&mut entries);
        }

        debug!(key = %key, records = result.records.len(), "Caching resolution result");
        entries.insert(
            key,
            ResultEntry {
                result,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    fn evict_nearest_expiry(entries: &mut HashMap<CacheKey, ResultEntry, FxBuildHasher>) {
        let nearest = entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at)
            .map(|(key, _)| key.clone());
        if let Some(key) = nearest {
            entries.remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| now < entry.expires_at);
        before - entries.len()
    }
}

impl CacheMaintenancePort for ResultCache {
    fn sweep_expired(&self) -> usize {
        ResultCache::sweep_expired(self)
    }

    fn len(&self) -> usize {
        ResultCache::len(self)
    }
}

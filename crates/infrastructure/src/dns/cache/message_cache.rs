//! Local tier response cache.
//!
//! Maps a question key to a pre-assembled DNS message. TTLs follow DNS
//! semantics: the entry lifetime derives from the minimum answer TTL
//! (clamped to the configured bounds), and answer TTLs decay on read by the
//! seconds elapsed since insertion. The stored entry is never modified.

use super::key::CacheKey;
use hickory_proto::op::Message;
use veil_dns_application::ports::CacheMaintenancePort;
use rustc_hash::FxBuildHasher;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::debug;

struct MessageEntry {
    message: Message,
    created_at: Instant,
    expires_at: Instant,
}

pub struct MessageCache {
    entries: RwLock<HashMap<CacheKey, MessageEntry, FxBuildHasher>>,
    max_items: usize,
    default_ttl: Duration,
    min_ttl: Duration,
    max_ttl: Duration,
}

impl MessageCache {
    pub fn new(max_items: usize, default_ttl: Duration, min_ttl: Duration, max_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::with_hasher(FxBuildHasher)),
            max_items,
            default_ttl,
            min_ttl,
            max_ttl,
        }
    }

    /// Returns a copy of the cached message with answer TTLs decremented by
    /// the elapsed seconds (clamped to 1). An expired entry is deleted and
    /// reported as a miss.
    pub fn get(&self, key: &CacheKey) -> Option<Message> {
        let now = Instant::now();
        {
            let entries = self.entries.read().unwrap();
            let entry = entries.get(key)?;
            if now < entry.expires_at {
                let elapsed = now.duration_since(entry.created_at).as_secs() as u32;
                let mut message = entry.message.clone();
                let answers = message
                    .take_answers()
                    .into_iter()
                    .map(|mut record| {
                        let ttl = record.ttl();
                        record.set_ttl(if ttl > elapsed { ttl - elapsed } else { 1 });
                        record
                    })
                    .collect();
                message.insert_answers(answers);
                return Some(message);
            }
        }

        // Expired but present: re-acquire exclusively and delete.
        let mut entries = self.entries.write().unwrap();
        if entries.get(key).is_some_and(|e| now >= e.expires_at) {
            entries.remove(key);
        }
        None
    }

    /// Store a response. The effective TTL is the minimum answer TTL, or
    /// the default for answer-less messages, clamped to [min_ttl, max_ttl].
    pub fn insert(&self, key: CacheKey, message: &Message) {
        if message.queries().is_empty() {
            return;
        }

        let ttl = message
            .answers()
            .iter()
            .map(|record| record.ttl())
            .min()
            .map(|secs| Duration::from_secs(u64::from(secs)))
            .unwrap_or(self.default_ttl)
            .clamp(self.min_ttl, self.max_ttl);

        self.store(key, message.clone(), ttl);
    }

    /// Store a negative (NXDOMAIN) response, bypassing TTL derivation.
    pub fn insert_negative(&self, key: CacheKey, message: &Message, ttl: Duration) {
        self.store(key, message.clone(), ttl);
    }

    fn store(&self, key: CacheKey, message: Message, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.write().unwrap();

        if entries.len() >= self.max_items {
            Self::evict_nearest_expiry(&mut entries);
        }

        debug!(key = %key, ttl_secs = ttl.as_secs(), "Caching response");
        entries.insert(
            key,
            MessageEntry {
                message,
                created_at: now,
                expires_at: now + ttl,
            },
        );
    }

    /// Evict the entry nearest to expiry (not true LRU).
    fn evict_nearest_expiry(entries: &mut HashMap<CacheKey, MessageEntry, FxBuildHasher>) {
        let nearest = entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at)
            .map(|(key, _)| key.clone());
        if let Some(key) = nearest {
            entries.remove(&key);
        }
    }

    /// Remaining lifetime of an entry, if present.
    pub fn entry_ttl(&self, key: &CacheKey) -> Option<Duration> {
        let entries = self.entries.read().unwrap();
        entries
            .get(key)
            .map(|entry| entry.expires_at.saturating_duration_since(Instant::now()))
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

impl CacheMaintenancePort for MessageCache {
    fn sweep_expired(&self) -> usize {
        MessageCache::sweep_expired(self)
    }

    fn len(&self) -> usize {
        MessageCache::len(self)
    }
}

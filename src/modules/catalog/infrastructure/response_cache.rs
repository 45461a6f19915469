use crate::modules::catalog::domain::MediaContent;
use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Vec<MediaContent>,
    created_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Short-TTL cache for content listings and searches, so that screen
/// re-entry and pull-to-refresh do not hammer the API.
#[derive(Debug)]
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    max_entries: usize,
}

impl ResponseCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries,
        }
    }

    pub fn get(&self, key: &str) -> Option<Vec<MediaContent>> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(self.ttl) => return Some(entry.payload.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
        }
        None
    }

    pub fn insert(&self, key: String, payload: Vec<MediaContent>) {
        if self.entries.len() >= self.max_entries {
            self.evict_expired();
        }
        // Still full after eviction: skip caching rather than grow unbounded.
        if self.entries.len() >= self.max_entries {
            return;
        }

        self.entries.insert(
            key,
            CacheEntry {
                payload,
                created_at: Instant::now(),
            },
        );
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    fn evict_expired(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| !entry.is_expired(ttl));
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        // 5 minutes matches how often listings realistically change.
        Self::new(Duration::from_secs(300), 256)
    }
}

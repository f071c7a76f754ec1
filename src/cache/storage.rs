use std::collections::HashMap;

use chrono::Utc;

use crate::logging::log_cache_operation;

#[derive(Clone, Debug)]
struct CacheItem<V> {
    data: V,
    expiry_ms: i64,
}

/// In-memory key-value store with a per-entry expiry.
///
/// Expired entries are only dropped when an access finds them or when
/// [`TtlCache::cleanup`] is called.
#[derive(Clone, Debug)]
pub struct TtlCache<V> {
    entries: HashMap<String, CacheItem<V>>,
    default_ttl_secs: u64,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(default_ttl_secs: u64) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl_secs,
        }
    }

    pub fn set(&mut self, key: &str, data: V, ttl_secs: Option<u64>) {
        self.set_at(key, data, ttl_secs, now_ms());
    }

    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_at(key, now_ms())
    }

    pub fn has(&mut self, key: &str) -> bool {
        self.has_at(key, now_ms())
    }

    pub fn delete(&mut self, key: &str) -> bool {
        let deleted = self.entries.remove(key).is_some();
        if deleted {
            log_cache_operation("DELETE", key, None);
        }
        deleted
    }

    pub fn clear(&mut self) {
        let size = self.entries.len();
        self.entries.clear();
        log_cache_operation("CLEAR", &format!("{size} items"), None);
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn cleanup(&mut self) -> usize {
        self.cleanup_at(now_ms())
    }

    fn set_at(&mut self, key: &str, data: V, ttl_secs: Option<u64>, now: i64) {
        let ttl_secs = ttl_secs.unwrap_or(self.default_ttl_secs);
        let ttl_ms = i64::try_from(ttl_secs.saturating_mul(1_000)).unwrap_or(i64::MAX);
        let expiry_ms = now.saturating_add(ttl_ms);
        self.entries
            .insert(key.to_string(), CacheItem { data, expiry_ms });
        log_cache_operation("SET", key, None);
    }

    fn get_at(&mut self, key: &str, now: i64) -> Option<V> {
        let Some(item) = self.entries.get(key) else {
            log_cache_operation("MISS", key, Some(false));
            return None;
        };
        if now > item.expiry_ms {
            self.entries.remove(key);
            log_cache_operation("EXPIRED", key, Some(false));
            return None;
        }
        log_cache_operation("HIT", key, Some(true));
        Some(item.data.clone())
    }

    fn has_at(&mut self, key: &str, now: i64) -> bool {
        match self.entries.get(key) {
            None => false,
            Some(item) if now > item.expiry_ms => {
                self.entries.remove(key);
                false
            }
            Some(_) => true,
        }
    }

    fn cleanup_at(&mut self, now: i64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, item| now <= item.expiry_ms);
        let cleaned = before - self.entries.len();
        if cleaned > 0 {
            log_cache_operation("CLEANUP", &format!("{cleaned} expired items"), None);
        }
        cleaned
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

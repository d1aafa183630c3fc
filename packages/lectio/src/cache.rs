//! In-memory TTL cache.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Thread-safe map whose entries expire a fixed interval after insertion.
///
/// Expired entries are dropped on the read that finds them; there is no
/// background sweeper. Data is lost on restart.
pub struct TtlCache<V> {
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    /// Create an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a live entry, removing it if it has expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let expired = {
            let entries = self.entries.read().unwrap();
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.value.clone())
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            self.entries.write().unwrap().remove(key);
        }
        None
    }

    /// Store `value` under `key`, stamping its expiry from the cache TTL.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        let entry = Entry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.write().unwrap().insert(key.into(), entry);
    }

    /// Number of entries, counting any not yet dropped expired ones.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("k", 42);
        assert_eq!(cache.get("k"), Some(42));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn miss_on_unknown_key() {
        let cache: TtlCache<i32> = TtlCache::new(Duration::from_secs(60));
        assert_eq!(cache.get("nope"), None);
    }

    #[test]
    fn expired_entry_is_dropped() {
        let cache = TtlCache::new(Duration::from_secs(0));
        cache.insert("k", "v".to_string());
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_refreshes_expiry_and_value() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("k", 1);
        cache.insert("k", 2);
        assert_eq!(cache.get("k"), Some(2));
        assert_eq!(cache.len(), 1);
    }
}

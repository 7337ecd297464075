use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::model::{Units, WeatherRecord};

#[derive(Debug, Clone)]
struct CacheEntry {
    record: WeatherRecord,
    expiry: DateTime<Utc>,
}

/// In-memory TTL cache keyed by `"{zip}_{units}"`.
///
/// Expired entries are dropped lazily when they are next looked up; there
/// is no background sweep and no capacity bound. Two requests that miss
/// on the same key at once will both fetch, and the later `put` wins.
#[derive(Debug)]
pub struct WeatherCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl WeatherCache {
    pub fn new(ttl: std::time::Duration) -> Self {
        let max = Duration::weeks(5200);
        let ttl = Duration::from_std(ttl).unwrap_or(max);

        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn key(zip_code: &str, units: &Units) -> String {
        format!("{zip_code}_{units}")
    }

    pub fn get(&self, key: &str) -> Option<WeatherRecord> {
        self.get_at(key, Utc::now())
    }

    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<WeatherRecord> {
        let mut entries = self.entries.lock();
        let entry = entries.get(key)?;

        if now < entry.expiry {
            info!("Using cached weather for {key}");
            return Some(entry.record.clone());
        }

        entries.remove(key);
        debug!("Evicted expired cache entry {key}");
        None
    }

    pub fn put(&self, key: impl Into<String>, record: WeatherRecord) {
        self.put_at(key, record, Utc::now());
    }

    pub fn put_at(&self, key: impl Into<String>, record: WeatherRecord, now: DateTime<Utc>) {
        let expiry = now.checked_add_signed(self.ttl);
        let expiry = expiry.unwrap_or(DateTime::<Utc>::MAX_UTC);
        let entry = CacheEntry { record, expiry };

        self.entries.lock().insert(key.into(), entry);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

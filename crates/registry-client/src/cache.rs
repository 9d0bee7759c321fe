//! Bounded local copy of the record collection.
//!
//! The server stays the single source of truth. The cache only mirrors what
//! the last list call and subsequent mutations returned, and makes no promise
//! that it matches the server at any given moment.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::dto::Record;

/// Capacity used when none is configured.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Records held in server order, capped at `capacity` entries.
#[derive(Debug, Clone)]
pub struct RecordCache {
    records: Vec<Record>,
    capacity: usize,
    refreshed_at: Option<DateTime<Utc>>,
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl RecordCache {
    /// Create an empty cache holding at most `capacity` records (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity: capacity.max(1),
            refreshed_at: None,
        }
    }

    /// Maximum number of records kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cached records in server order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// When the cache last received data from the server.
    #[must_use]
    pub const fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// Look up a cached record.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Replace the whole collection with a fresh server listing.
    ///
    /// Listings longer than the capacity keep their first `capacity` entries.
    pub fn replace_all(&mut self, mut records: Vec<Record>, now: DateTime<Utc>) {
        if records.len() > self.capacity {
            warn!(
                received = records.len(),
                capacity = self.capacity,
                "record listing exceeds cache capacity; truncating"
            );
            records.truncate(self.capacity);
        }
        self.records = records;
        self.refreshed_at = Some(now);
    }

    /// Insert or replace a record returned by a create or update.
    ///
    /// New records go last; when full, the oldest entry is evicted.
    pub fn upsert(&mut self, record: Record, now: DateTime<Utc>) {
        if let Some(slot) = self.records.iter_mut().find(|cached| cached.id == record.id) {
            *slot = record;
        } else {
            if self.records.len() >= self.capacity {
                self.records.remove(0);
            }
            self.records.push(record);
        }
        self.refreshed_at = Some(now);
    }

    /// Drop a record after the server deleted it. Returns whether it was cached.
    pub fn remove(&mut self, id: u64, now: DateTime<Utc>) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        self.refreshed_at = Some(now);
        self.records.len() != before
    }
}

//! Keyed query cache with idle-time eviction

use std::sync::Arc;
use std::time::{Duration, Instant};

use ahash::AHashMap;
use neo_core::{NeosResponse, QueryParams};

use crate::FetchError;

/// How long an unused entry survives
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Cached state of one query
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Last successful payload
    pub data: Option<Arc<NeosResponse>>,
    /// Error of the most recent attempt, cleared when a new attempt starts
    pub error: Option<FetchError>,
    /// When `data` was stored
    pub fetched_at: Option<Instant>,
    /// Last time the entry was read or released by the view
    pub last_used: Instant,
    /// A request for this key is currently outstanding
    pub in_flight: bool,
}

impl CacheEntry {
    fn new(now: Instant) -> Self {
        Self {
            data: None,
            error: None,
            fetched_at: None,
            last_used: now,
            in_flight: false,
        }
    }
}

/// Query results keyed by parameters.
///
/// Entries for the active key or with a request in flight are never evicted.
#[derive(Debug)]
pub struct QueryCache {
    entries: AHashMap<QueryParams, CacheEntry>,
    active: Option<QueryParams>,
    ttl: Duration,
}

impl QueryCache {
    /// Create a new cache
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: AHashMap::new(),
            active: None,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, params: &QueryParams) -> Option<&CacheEntry> {
        self.entries.get(params)
    }

    pub fn active(&self) -> Option<&QueryParams> {
        self.active.as_ref()
    }

    /// Mark an entry as read
    pub fn touch(&mut self, params: &QueryParams, now: Instant) {
        if let Some(entry) = self.entries.get_mut(params) {
            entry.last_used = now;
        }
    }

    /// Record the start of a request, clearing any previous error
    pub fn begin_fetch(&mut self, params: &QueryParams, now: Instant) {
        let entry = self
            .entries
            .entry(params.clone())
            .or_insert_with(|| CacheEntry::new(now));
        entry.in_flight = true;
        entry.error = None;
        entry.last_used = now;
    }

    /// Record the outcome of a request.
    ///
    /// A failure keeps the last successful payload next to the error.
    pub fn complete(
        &mut self,
        params: &QueryParams,
        result: Result<Arc<NeosResponse>, FetchError>,
        now: Instant,
    ) {
        let entry = self
            .entries
            .entry(params.clone())
            .or_insert_with(|| CacheEntry::new(now));
        entry.in_flight = false;
        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.error = None;
                entry.fetched_at = Some(now);
            }
            Err(error) => entry.error = Some(error),
        }
    }

    /// Change which key the view is subscribed to.
    ///
    /// The released key starts its idle period now.
    pub fn set_active(&mut self, params: Option<QueryParams>, now: Instant) {
        if self.active == params {
            return;
        }
        if let Some(previous) = self.active.take() {
            self.touch(&previous, now);
        }
        self.active = params;
    }

    /// Drop entries idle for longer than the TTL, returning how many went
    pub fn evict_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        let active = self.active.clone();
        self.entries.retain(|key, entry| {
            entry.in_flight
                || active.as_ref() == Some(key)
                || now.saturating_duration_since(entry.last_used) < ttl
        });
        before - self.entries.len()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

//! Deduplicating query client over a [`NeoSource`]
//!
//! At most one request per [`QueryParams`] is outstanding at any time.
//! Concurrent callers for the same key share the outcome of that request.

use std::sync::Arc;
use std::time::Instant;

use ahash::AHashMap;
use neo_core::{NeosResponse, QueryParams};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::cache::QueryCache;
use crate::connectivity::ConnectivityMonitor;
use crate::sources::NeoSource;
use crate::FetchError;

pub type FetchResult = Result<Arc<NeosResponse>, FetchError>;

type SettleCallback = Arc<dyn Fn() + Send + Sync>;

/// Whether `request` started a new fetch or joined one in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Started,
    Deduplicated,
}

/// View-facing state of one query
#[derive(Debug, Clone, Default)]
pub struct QuerySnapshot {
    pub data: Option<Arc<NeosResponse>>,
    pub error: Option<FetchError>,
    pub is_fetching: bool,
    pub fetched_at: Option<Instant>,
}

impl QuerySnapshot {
    /// First load of a key: nothing to show yet
    pub fn is_loading(&self) -> bool {
        self.is_fetching && self.data.is_none()
    }

    /// Background refresh while cached data is shown
    pub fn is_refreshing(&self) -> bool {
        self.is_fetching && self.data.is_some()
    }
}

struct ClientState {
    cache: QueryCache,
    pending: AHashMap<QueryParams, watch::Receiver<Option<FetchResult>>>,
}

#[derive(Clone)]
pub struct QueryClient {
    source: Arc<dyn NeoSource>,
    runtime: Handle,
    state: Arc<Mutex<ClientState>>,
    on_settled: Option<SettleCallback>,
    connectivity: Option<ConnectivityMonitor>,
}

impl QueryClient {
    /// Create a new client spawning its requests on `runtime`
    pub fn new(source: Arc<dyn NeoSource>, runtime: Handle, cache: QueryCache) -> Self {
        Self {
            source,
            runtime,
            state: Arc::new(Mutex::new(ClientState {
                cache,
                pending: AHashMap::new(),
            })),
            on_settled: None,
            connectivity: None,
        }
    }

    /// Run `callback` whenever a request settles
    pub fn with_settle_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_settled = Some(Arc::new(callback));
        self
    }

    /// Report transport failures and successes to `monitor`
    pub fn with_connectivity(mut self, monitor: ConnectivityMonitor) -> Self {
        self.connectivity = Some(monitor);
        self
    }

    pub fn source_name(&self) -> &str {
        self.source.source_name()
    }

    /// Start a fetch for `params` unless one is already in flight
    pub fn request(&self, params: &QueryParams) -> RequestOutcome {
        self.start(params).0
    }

    /// Fetch `params`, sharing any request already in flight for it
    pub async fn fetch_neos(&self, params: &QueryParams) -> FetchResult {
        let (_, mut rx) = self.start(params);
        let settled = rx
            .wait_for(|value| value.is_some())
            .await
            .map_err(|_| FetchError::Cancelled)?;
        let result = (*settled).clone();
        result.unwrap_or(Err(FetchError::Cancelled))
    }

    /// Current state of `params`, marking its entry as used
    pub fn snapshot(&self, params: &QueryParams) -> QuerySnapshot {
        let mut state = self.state.lock();
        state.cache.touch(params, Instant::now());
        match state.cache.get(params) {
            Some(entry) => QuerySnapshot {
                data: entry.data.clone(),
                error: entry.error.clone(),
                is_fetching: entry.in_flight,
                fetched_at: entry.fetched_at,
            },
            None => QuerySnapshot::default(),
        }
    }

    /// Set the key the view currently renders
    pub fn set_active(&self, params: Option<&QueryParams>) {
        self.state.lock().cache.set_active(params.cloned(), Instant::now());
    }

    /// Drop idle cache entries
    pub fn evict_expired(&self) -> usize {
        let evicted = self.state.lock().cache.evict_expired(Instant::now());
        if evicted > 0 {
            debug!(evicted, "evicted idle query results");
        }
        evicted
    }

    pub fn cached_queries(&self) -> usize {
        self.state.lock().cache.len()
    }

    fn start(&self, params: &QueryParams) -> (RequestOutcome, watch::Receiver<Option<FetchResult>>) {
        let mut state = self.state.lock();
        if let Some(rx) = state.pending.get(params) {
            debug!(%params, "joining request in flight");
            return (RequestOutcome::Deduplicated, rx.clone());
        }

        let (tx, rx) = watch::channel(None);
        state.pending.insert(params.clone(), rx.clone());
        state.cache.begin_fetch(params, Instant::now());
        drop(state);

        let client = self.clone();
        let params = params.clone();
        self.runtime.spawn(async move {
            client.run(params, tx).await;
        });

        (RequestOutcome::Started, rx)
    }

    async fn run(self, params: QueryParams, tx: watch::Sender<Option<FetchResult>>) {
        info!(%params, source = self.source.source_name(), "fetching near-earth objects");
        let result = self.source.fetch_neos(&params).await.map(Arc::new);

        match &result {
            Ok(response) => info!(%params, count = response.count, "query settled"),
            Err(e) => warn!(%params, error = %e, "query failed"),
        }

        if let Some(monitor) = &self.connectivity {
            match &result {
                Ok(_) => monitor.note_success(),
                Err(e) if e.is_transport() => monitor.mark_offline(),
                Err(_) => {}
            }
        }

        {
            let mut state = self.state.lock();
            state.pending.remove(&params);
            state.cache.complete(&params, result.clone(), Instant::now());
        }

        let _ = tx.send(Some(result));

        if let Some(callback) = &self.on_settled {
            callback();
        }
    }
}

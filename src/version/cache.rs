//! In-memory release cache with a freshness window and single-flight refresh
//!
//! A refresh fetches the listing, parses it on the blocking pool and replaces the
//! cached records wholesale. Concurrent callers that find the cache stale join the
//! refresh already in flight instead of starting their own. The refresh runs in its
//! own task, so a caller dropping its future does not cancel it for the others.
//! Failed refreshes, including listings where no row could be parsed, never touch
//! the cached value.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::version::error::ResolveError;
use crate::version::listing::ListingParser;
use crate::version::registry::Registry;
use crate::version::tor_version::TorVersion;

type RefreshResult = Result<Arc<[TorVersion]>, ResolveError>;
type RefreshHandle = Shared<BoxFuture<'static, RefreshResult>>;

struct CacheEntry {
    versions: Arc<[TorVersion]>,
    fetched_at: Instant,
    invalidated: bool,
}

impl CacheEntry {
    fn is_fresh(&self, freshness: Duration) -> bool {
        !self.invalidated && self.fetched_at.elapsed() < freshness
    }
}

#[derive(Default)]
struct CacheState {
    entry: Option<CacheEntry>,
    in_flight: Option<RefreshHandle>,
    /// Bumped by every invalidation
    generation: u64,
}

struct Inner {
    registry: Arc<dyn Registry>,
    parser: Arc<ListingParser>,
    freshness: Duration,
    state: Mutex<CacheState>,
}

/// Clears the in-flight marker when a refresh task ends, including by panic.
struct InFlightGuard<'a> {
    inner: &'a Inner,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.inner.lock_state().in_flight = None;
    }
}

impl Inner {
    /// State is only ever replaced wholesale, so a poisoned lock still holds a usable value.
    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `generation` is the invalidation count when the refresh started. A result fetched
    /// before a later invalidation is stored already stale.
    async fn refresh(self: Arc<Self>, generation: u64) -> RefreshResult {
        let _in_flight = InFlightGuard { inner: &self };
        let source = self.registry.source();

        debug!("Refreshing release listing from {}", source);

        let result = self.fetch_and_parse().await;

        match &result {
            Ok(versions) => {
                info!("Cached {} releases from {}", versions.len(), source);
                let mut state = self.lock_state();
                let invalidated = state.generation != generation;
                state.entry = Some(CacheEntry {
                    versions: Arc::clone(versions),
                    fetched_at: Instant::now(),
                    invalidated,
                });
            }
            Err(e) => error!("Failed to refresh release listing from {}: {}", source, e),
        }

        result
    }

    async fn fetch_and_parse(&self) -> RefreshResult {
        let html = self.registry.fetch_listing().await?;

        let parser = Arc::clone(&self.parser);
        let versions = tokio::task::spawn_blocking(move || parser.parse(&html))
            .await
            .map_err(|e| ResolveError::Worker(e.to_string()))??;

        Ok(versions.into())
    }
}

/// Cached view of the releases published by a [`Registry`]
#[derive(Clone)]
pub struct VersionCache {
    inner: Arc<Inner>,
}

impl VersionCache {
    pub fn new(registry: Arc<dyn Registry>, freshness: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry,
                parser: Arc::new(ListingParser::new()),
                freshness,
                state: Mutex::new(CacheState::default()),
            }),
        }
    }

    pub fn freshness(&self) -> Duration {
        self.inner.freshness
    }

    /// Returns the releases in listing order, refreshing them if the cached copy is stale.
    ///
    /// # Returns
    /// * `Ok(versions)` - Cached or freshly fetched releases
    /// * `Err(ResolveError)` - The refresh this call waited on failed
    pub async fn get_versions(&self) -> Result<Arc<[TorVersion]>, ResolveError> {
        let refresh = {
            let mut state = self.inner.lock_state();

            if let Some(entry) = state.entry.as_ref().filter(|e| e.is_fresh(self.inner.freshness))
            {
                debug!("Release cache hit ({} releases)", entry.versions.len());
                return Ok(Arc::clone(&entry.versions));
            }

            match state.in_flight.clone() {
                Some(handle) => {
                    debug!("Joining in-flight release refresh");
                    handle
                }
                None => {
                    let handle = self.spawn_refresh(state.generation);
                    state.in_flight = Some(handle.clone());
                    handle
                }
            }
        };

        refresh.await
    }

    /// Last successfully fetched releases, regardless of age
    pub fn cached(&self) -> Option<Arc<[TorVersion]>> {
        self.inner
            .lock_state()
            .entry
            .as_ref()
            .map(|e| Arc::clone(&e.versions))
    }

    /// Marks the cached releases stale so the next [`get_versions`](Self::get_versions)
    /// refetches. The stale value stays available through [`cached`](Self::cached).
    ///
    /// A refresh already in flight keeps running and its waiters get its result, but that
    /// result is cached as stale.
    pub fn invalidate(&self) {
        let mut state = self.inner.lock_state();
        state.generation += 1;
        if let Some(entry) = state.entry.as_mut() {
            entry.invalidated = true;
        }
    }

    fn spawn_refresh(&self, generation: u64) -> RefreshHandle {
        let task = tokio::spawn(Arc::clone(&self.inner).refresh(generation));

        async move {
            task.await
                .unwrap_or_else(|e| Err(ResolveError::Worker(e.to_string())))
        }
        .boxed()
        .shared()
    }
}

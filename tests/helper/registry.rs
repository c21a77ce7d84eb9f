//! Registry test utilities

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use tor_bundle_resolver::version::cache::VersionCache;
use tor_bundle_resolver::version::error::RegistryError;
use tor_bundle_resolver::version::registry::Registry;

/// Scripted registry that counts fetches and can delay each response
pub struct ScriptedRegistry {
    responses: Mutex<VecDeque<Result<String, String>>>,
    fallback: Option<String>,
    delay: Duration,
    fetches: AtomicUsize,
}

impl ScriptedRegistry {
    /// Registry that always serves `listing`
    pub fn serving(listing: &str) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: Some(listing.to_string()),
            delay: Duration::ZERO,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Registry that answers with `responses` in order, then fails
    pub fn scripted(responses: Vec<Result<&str, &str>>) -> Self {
        Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            fallback: None,
            delay: Duration::ZERO,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Registry for ScriptedRegistry {
    fn source(&self) -> String {
        "scripted://archive/".to_string()
    }

    async fn fetch_listing(&self) -> Result<String, RegistryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(body)) => Ok(body),
            Some(Err(reason)) => Err(RegistryError::InvalidResponse(reason)),
            None => self
                .fallback
                .clone()
                .ok_or_else(|| RegistryError::InvalidResponse("script exhausted".to_string())),
        }
    }
}

/// Create a cache over `registry`, keeping a handle to the registry for assertions
pub fn create_test_cache(
    registry: ScriptedRegistry,
    freshness: Duration,
) -> (Arc<ScriptedRegistry>, VersionCache) {
    let registry = Arc::new(registry);
    let cache = VersionCache::new(registry.clone(), freshness);
    (registry, cache)
}

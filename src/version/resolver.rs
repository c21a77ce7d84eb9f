//! Resolver facade handed to installers
//!
//! Groups the release cache with the selection policy so callers ask one
//! question: which bundle version should be installed.

use std::sync::Arc;

use tracing::info;

use crate::config::ResolverConfig;
use crate::version::cache::VersionCache;
use crate::version::error::{RegistryError, ResolveError};
use crate::version::registries::TorArchiveRegistry;
use crate::version::registry::Registry;
use crate::version::selector::{Channel, select_latest};
use crate::version::tor_version::TorVersion;

/// Resolves Tor expert bundle releases
#[derive(Clone)]
pub struct BundleResolver {
    cache: VersionCache,
}

impl BundleResolver {
    pub fn new(cache: VersionCache) -> Self {
        Self { cache }
    }

    /// Resolver backed by the archive named in `config`
    pub fn from_config(config: &ResolverConfig) -> Result<Self, RegistryError> {
        let registry: Arc<dyn Registry> = Arc::new(TorArchiveRegistry::new(
            config.archive_url.clone(),
            config.fetch_timeout(),
        )?);

        Ok(Self::new(VersionCache::new(registry, config.freshness())))
    }

    pub fn cache(&self) -> &VersionCache {
        &self.cache
    }

    /// All published releases, in listing order
    pub async fn versions(&self) -> Result<Arc<[TorVersion]>, ResolveError> {
        self.cache.get_versions().await
    }

    /// The highest stable release
    pub async fn latest_stable(&self) -> Result<TorVersion, ResolveError> {
        self.latest(Channel::Stable).await
    }

    /// The highest release admitted by `channel`
    pub async fn latest(&self, channel: Channel) -> Result<TorVersion, ResolveError> {
        let versions = self.cache.get_versions().await?;
        let selected = select_latest(&versions, channel)?;

        info!("Resolved {:?} release {}", channel, selected);

        Ok(selected)
    }
}

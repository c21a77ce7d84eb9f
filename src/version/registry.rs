//! Registry trait for retrieving the release listing from a remote source

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;

/// Trait for fetching the raw release listing
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// The location the listing is fetched from, for logging
    fn source(&self) -> String;

    /// Fetches the listing page
    ///
    /// # Returns
    /// * `Ok(String)` - The listing body as served
    /// * `Err(RegistryError)` - If the request fails, times out or returns a non-success status
    async fn fetch_listing(&self) -> Result<String, RegistryError>;
}

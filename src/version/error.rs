use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid version token: {0}")]
    InvalidVersion(String),

    #[error("Invalid release date: {0}")]
    InvalidDate(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors surfaced to whoever asks for a resolved version.
///
/// Cloneable so a single refresh outcome can be handed to every waiter.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("Failed to retrieve version listing: {0}")]
    Retrieval(Arc<RegistryError>),

    #[error("Failed to parse version listing: {0}")]
    Parse(#[from] ParseError),

    #[error("No stable version found in listing")]
    NoStableVersion,

    #[error("No release found in listing")]
    NoRelease,

    #[error("Background task failed: {0}")]
    Worker(String),
}

impl From<RegistryError> for ResolveError {
    fn from(err: RegistryError) -> Self {
        Self::Retrieval(Arc::new(err))
    }
}

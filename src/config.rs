use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// =============================================================================
// Time-related constants
// =============================================================================

/// How long a fetched listing stays fresh, in seconds (10 minutes)
pub const DEFAULT_FRESHNESS_SECS: u64 = 600;

/// Timeout for fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Directory listing of published Tor Browser / expert bundle releases
pub const DEFAULT_ARCHIVE_URL: &str =
    "https://archive.torproject.org/tor-package-archive/torbrowser/";

/// Resolver configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// URL of the archive listing
    pub archive_url: String,
    /// Cache freshness window in seconds
    pub freshness_secs: u64,
    /// Listing request timeout in milliseconds
    pub fetch_timeout_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            freshness_secs: DEFAULT_FRESHNESS_SECS,
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

impl ResolverConfig {
    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn freshness(&self) -> Duration {
        Duration::from_secs(self.freshness_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// Returns the path to the data directory for tor-bundle-resolver.
/// Uses $XDG_DATA_HOME/tor-bundle-resolver if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/tor-bundle-resolver,
/// or ./tor-bundle-resolver if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("tor-bundle-resolver.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("tor-bundle-resolver")
}

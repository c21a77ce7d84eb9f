//! Selection of the release an installer should use

use crate::version::error::ResolveError;
use crate::version::tor_version::TorVersion;

/// Which releases are eligible for selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Channel {
    /// Releases without an alpha marker
    #[default]
    Stable,
    /// Every release, alphas included
    Alpha,
}

impl Channel {
    pub fn admits(self, version: &TorVersion) -> bool {
        match self {
            Channel::Stable => version.is_stable(),
            Channel::Alpha => true,
        }
    }
}

/// Pick the highest stable release.
///
/// Fails with [`ResolveError::NoStableVersion`] when `versions` is empty or only holds alphas.
pub fn select_latest_stable(versions: &[TorVersion]) -> Result<TorVersion, ResolveError> {
    select_latest(versions, Channel::Stable)
}

/// Pick the highest release admitted by `channel`.
///
/// Fails with [`ResolveError::NoStableVersion`] on the stable channel and
/// [`ResolveError::NoRelease`] on the alpha channel when nothing is admitted.
pub fn select_latest(versions: &[TorVersion], channel: Channel) -> Result<TorVersion, ResolveError> {
    versions
        .iter()
        .filter(|v| channel.admits(v))
        .max()
        .cloned()
        .ok_or(match channel {
            Channel::Stable => ResolveError::NoStableVersion,
            Channel::Alpha => ResolveError::NoRelease,
        })
}

//! A single published Tor expert bundle release
//!
//! Releases appear in the archive listing as directory tokens:
//! - Stable: `12.5/`, `12.5.1/`
//! - Alpha: `13.0a2/`

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::NaiveDate;

use crate::version::error::ParseError;

/// One release from the archive listing.
///
/// Ordering, equality and hashing only look at the numeric fields, with an
/// absent patch or alpha segment counted as `0`. The release date is metadata.
#[derive(Debug, Clone)]
pub struct TorVersion {
    major: u32,
    minor: u32,
    patch: Option<u32>,
    alpha: Option<u32>,
    release_date: Option<NaiveDate>,
}

impl TorVersion {
    pub fn new(major: u32, minor: u32, patch: Option<u32>, alpha: Option<u32>) -> Self {
        Self {
            major,
            minor,
            patch,
            alpha,
            release_date: None,
        }
    }

    /// Attach the date the release was published on.
    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch.unwrap_or(0)
    }

    pub fn alpha(&self) -> u32 {
        self.alpha.unwrap_or(0)
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
    }

    /// A release without an alpha marker
    pub fn is_stable(&self) -> bool {
        self.alpha() == 0
    }

    /// The normalized `(major, minor, patch, alpha)` tuple used for ordering
    pub fn key(&self) -> (u32, u32, u32, u32) {
        (self.major, self.minor, self.patch(), self.alpha())
    }
}

/// Parse a segment made of ASCII digits only
fn parse_segment(segment: &str) -> Option<u32> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

impl FromStr for TorVersion {
    type Err = ParseError;

    /// Parse a listing token such as `12.5/`, `12.5.1/` or `13.0a2/`.
    ///
    /// Anything after a `-` is a suffix and not part of the version number.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidVersion(token.to_string());

        let trimmed = token.trim().trim_end_matches('/');
        let number = trimmed.split_once('-').map_or(trimmed, |(number, _)| number);
        let (major, rest) = number.split_once('.').ok_or_else(invalid)?;

        let (minor, patch, alpha) = if let Some((minor, alpha)) = rest.split_once('a') {
            (minor, None, Some(alpha))
        } else if let Some((minor, patch)) = rest.split_once('.') {
            (minor, Some(patch), None)
        } else {
            (rest, None, None)
        };

        let optional = |segment: Option<&str>| match segment {
            Some(s) => parse_segment(s).map(Some).ok_or_else(invalid),
            None => Ok(None),
        };

        Ok(Self::new(
            parse_segment(major).ok_or_else(invalid)?,
            parse_segment(minor).ok_or_else(invalid)?,
            optional(patch)?,
            optional(alpha)?,
        ))
    }
}

/// Renders the segments the listing token carried: `12.5a3`, `12.5.1` or `12.5`. A token
/// without a patch or alpha segment renders as `major.minor` rather than `major.minora0`.
impl fmt::Display for TorVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.patch, self.alpha) {
            (_, Some(alpha)) => write!(f, "{}.{}a{}", self.major, self.minor, alpha),
            (Some(patch), None) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            (None, None) => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

impl PartialEq for TorVersion {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for TorVersion {}

impl Hash for TorVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for TorVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TorVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

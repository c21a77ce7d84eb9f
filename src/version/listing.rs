//! Archive listing parser
//!
//! Extracts releases from the HTML directory index served by the Tor package
//! archive. Each release is a row like:
//!
//! ```text
//! <a href="12.5.1/">12.5.1/</a>                                    2023-07-04 12:34    -
//! ```
//!
//! Only the anchor text and the date column matter, so a regex scan is enough.

use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, warn};

use crate::version::error::ParseError;
use crate::version::tor_version::TorVersion;

/// Parser for the archive directory listing
pub struct ListingParser {
    /// Regex for a listing row: `12.5.1/</a>   2023-07-04`
    entry_re: Regex,
}

impl ListingParser {
    pub fn new() -> Self {
        Self {
            // Match: <version>/</a> <whitespace> YYYY-M-D
            entry_re: Regex::new(
                r"([0-9]+\.[0-9]+(?:[a.][0-9]+)?/)</a>\s+([0-9]{4}-[0-9]{1,2}-[0-9]{1,2})",
            )
            .unwrap(),
        }
    }

    /// Parse every release row in `html`, in the order they appear.
    ///
    /// Rows whose version or date cannot be parsed are skipped with a warning. If rows
    /// matched but none of them parsed, the first row's error is returned instead. A
    /// document with no release rows at all yields an empty list.
    pub fn parse(&self, html: &str) -> Result<Vec<TorVersion>, ParseError> {
        let mut versions = Vec::new();
        let mut first_error = None;

        for caps in self.entry_re.captures_iter(html) {
            let token = &caps[1];
            let date = &caps[2];

            match parse_entry(token, date) {
                Ok(version) => versions.push(version),
                Err(e) => {
                    warn!("Skipping listing entry {:?} ({}): {}", token, date, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) if versions.is_empty() => Err(e),
            _ => {
                debug!("Parsed {} releases from listing", versions.len());
                Ok(versions)
            }
        }
    }
}

impl Default for ListingParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_entry(token: &str, date: &str) -> Result<TorVersion, ParseError> {
    let version: TorVersion = token.parse()?;
    Ok(version.with_release_date(parse_release_date(date)?))
}

/// Parse a `YYYY-MM-DD` or `YYYY-M-D` date column.
///
/// Zero padding is accepted on month and day; the numeric value must form a real
/// calendar date.
pub fn parse_release_date(date: &str) -> Result<NaiveDate, ParseError> {
    let invalid = || ParseError::InvalidDate(date.to_string());

    let mut parts = date.trim().splitn(3, '-');
    let mut next_number = || -> Result<u32, ParseError> {
        parts
            .next()
            .filter(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)
    };

    let year = next_number()?;
    let month = next_number()?;
    let day = next_number()?;

    let year = i32::try_from(year).map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

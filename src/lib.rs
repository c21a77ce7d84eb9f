//! Tor expert bundle version resolution
//!
//! Scrapes the Tor package archive listing, orders the published releases and
//! picks the one an installer should download.

pub mod config;
pub mod logging;
pub mod version;

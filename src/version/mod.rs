//! Version resolution layer for the Tor expert bundle
//!
//! This module fetches the archive listing, turns it into ordered release
//! records, caches them and selects the release an installer should use.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│    Cache    │◀────│  Resolver   │
//! │  (fetch)    │     │(single-flt) │     │  (facade)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Listing   │     │  Selector   │
//!                     │  (parse)    │     │ (pick one)  │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`tor_version`]: The `TorVersion` record and its total order
//! - [`listing`]: Regex scraper turning listing HTML into records
//! - [`selector`]: Latest-release selection under a stability channel
//! - [`registry`]: Registry trait for retrieving the listing page
//! - [`registries`]: Concrete registry implementations
//! - [`cache`]: In-memory TTL cache with single-flight refresh
//! - [`resolver`]: Facade combining cache and selector
//! - [`error`]: Error types for parsing, retrieval and selection

pub mod cache;
pub mod error;
pub mod listing;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod selector;
pub mod tor_version;

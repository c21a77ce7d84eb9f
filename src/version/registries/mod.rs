//! Registry implementations for fetching release listings

pub mod archive;

pub use archive::TorArchiveRegistry;

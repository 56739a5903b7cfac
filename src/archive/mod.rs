//! Debian archive access
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - The packaged set: Go import paths already in Debian, and the NEW queue
//! - ftp-master API adapter

mod client;
mod ftp_master;
mod packaged;

pub use client::{HttpClient, DEFAULT_TIMEOUT};
pub use ftp_master::{FtpMasterArchive, GO_BINARIES_URL, SOURCES_IN_NEW_URL};
pub use packaged::{DebianPackage, PackagedMatch, PackagedSet};

use crate::error::ArchiveError;
use async_trait::async_trait;

/// Source of the packaged set
#[async_trait]
pub trait PackageArchive: Send + Sync {
    /// Fetch every packaged Go import path and the sources waiting in NEW
    async fn fetch_packaged(&self) -> Result<PackagedSet, ArchiveError>;
}

//! Debian ftp-master API adapter
//!
//! API endpoints:
//! - Go binaries: https://api.ftp-master.debian.org/binary/by_metadata/Go-Import-Path
//! - NEW queue: https://api.ftp-master.debian.org/sources_in_suite/new

use crate::archive::{DebianPackage, HttpClient, PackageArchive, PackagedSet};
use crate::error::ArchiveError;
use async_trait::async_trait;
use serde::Deserialize;

/// Binaries carrying Go-Import-Path metadata
pub const GO_BINARIES_URL: &str =
    "https://api.ftp-master.debian.org/binary/by_metadata/Go-Import-Path";

/// Source packages waiting in NEW
pub const SOURCES_IN_NEW_URL: &str = "https://api.ftp-master.debian.org/sources_in_suite/new";

/// One entry of the by_metadata response
#[derive(Debug, Deserialize)]
struct BinaryEntry {
    binary: String,
    /// Comma-separated import paths, possibly padded with spaces
    metadata_value: String,
    source: String,
}

/// One entry of the sources_in_suite response
#[derive(Debug, Deserialize)]
struct SourceEntry {
    source: String,
    version: String,
}

/// ftp-master API client
pub struct FtpMasterArchive {
    client: HttpClient,
    binaries_url: String,
    new_url: String,
}

impl FtpMasterArchive {
    /// Create an adapter against the public ftp-master API
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            binaries_url: GO_BINARIES_URL.to_string(),
            new_url: SOURCES_IN_NEW_URL.to_string(),
        }
    }

    /// Override the endpoint URLs (builder pattern)
    pub fn with_urls(mut self, binaries_url: impl Into<String>, new_url: impl Into<String>) -> Self {
        self.binaries_url = binaries_url.into();
        self.new_url = new_url.into();
        self
    }
}

#[async_trait]
impl PackageArchive for FtpMasterArchive {
    async fn fetch_packaged(&self) -> Result<PackagedSet, ArchiveError> {
        log::debug!("fetching {}", self.binaries_url);
        let binaries: Vec<BinaryEntry> = self.client.get_json(&self.binaries_url).await?;
        let mut set = packaged_from_entries(binaries);

        log::debug!("fetching {}", self.new_url);
        let sources: Vec<SourceEntry> = self.client.get_json(&self.new_url).await?;
        for entry in sources {
            set.insert_new(entry.source, entry.version);
        }

        log::debug!("{} Go import paths packaged in Debian", set.len());
        Ok(set)
    }
}

fn packaged_from_entries(entries: Vec<BinaryEntry>) -> PackagedSet {
    let mut set = PackagedSet::new();
    // -dbgsym and friends carry the same metadata
    for entry in entries.into_iter().filter(|e| e.binary.ends_with("-dev")) {
        for import_path in entry.metadata_value.split(',') {
            let import_path = import_path.trim();
            if import_path.is_empty() {
                continue;
            }
            set.insert(
                import_path,
                DebianPackage::new(entry.binary.clone(), entry.source.clone()),
            );
        }
    }
    set
}

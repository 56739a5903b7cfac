//! Version control access for upstream version resolution
//!
//! This module provides:
//! - The `Vcs` trait: the handful of repository queries the resolver needs
//! - `GitCli`: the implementation that shells out to `git`

mod git;

pub use git::GitCli;

use crate::error::VcsError;
use chrono::{DateTime, Utc};

/// Revision resolved when no other is requested
pub const HEAD: &str = "HEAD";

/// Repository queries used to derive an upstream version
///
/// Every method is a single invocation of the underlying tool. Failures are
/// surfaced as `VcsError` and never retried.
pub trait Vcs {
    /// All tags in the repository
    fn tags(&self) -> Result<Vec<String>, VcsError>;

    /// Latest tag reachable from `rev`, ignoring sub-path tags like `foo/v1.2.0`
    ///
    /// Returns `None` when no such tag exists.
    fn latest_tag(&self, rev: &str) -> Result<Option<String>, VcsError>;

    /// Number of commits between `tag` and `rev`
    fn commits_since(&self, tag: &str, rev: &str) -> Result<u64, VcsError>;

    /// Committer date of `rev`
    fn commit_time(&self, rev: &str) -> Result<DateTime<Utc>, VcsError>;

    /// `git describe --long --tags` output for `rev`, `None` when there are no tags
    fn describe_long(&self, rev: &str) -> Result<Option<String>, VcsError>;

    /// Abbreviated hash of `rev`
    fn short_hash(&self, rev: &str) -> Result<String, VcsError>;
}

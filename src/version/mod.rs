//! Upstream version resolution from repository history
//!
//! This module provides:
//! - Tag selection (preferred revision, else latest reachable tag)
//! - Tag mangling into a Debian upstream version
//! - Snapshot versions `{base}git{YYYYMMDD}.{hash}` for untagged states
//!
//! Ordering guarantee: `0.0~gitD.H < T < T+gitD.H < next tag` under dpkg
//! comparison, where `T` is the mangled tag.

mod mangle;

pub use mangle::{describe_hash, looks_like_semver, mangle_tag};

use crate::domain::{UpstreamResolution, UpstreamVersion};
use crate::error::VcsError;
use crate::vcs::{Vcs, HEAD};

/// Snapshot base when the repository has no usable tag
const NO_RELEASE_BASE: &str = "0.0~";

/// Caller preferences for version resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Revision to describe instead of HEAD; taken as the tag when it names one
    pub preferred_revision: Option<String>,
    /// Package the revision as a snapshot even if it is tagged
    pub force_prerelease: bool,
}

impl ResolveOptions {
    /// Create options with no preferences
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preferred revision (builder pattern)
    pub fn with_preferred_revision(mut self, revision: impl Into<String>) -> Self {
        let revision = revision.into();
        let revision = revision.trim();
        self.preferred_revision = if revision.is_empty() {
            None
        } else {
            Some(revision.to_string())
        };
        self
    }

    /// Set the forced-prerelease flag (builder pattern)
    pub fn with_force_prerelease(mut self, force: bool) -> Self {
        self.force_prerelease = force;
        self
    }
}

/// Derive the upstream version to package from the repository state
pub fn resolve_upstream_version<V: Vcs + ?Sized>(
    vcs: &V,
    options: &ResolveOptions,
) -> Result<UpstreamResolution, VcsError> {
    let target = options.preferred_revision.as_deref().unwrap_or(HEAD);
    let mut latest_tag = None;

    if let Some(preferred) = &options.preferred_revision {
        if vcs.tags()?.iter().any(|t| t == preferred) {
            latest_tag = Some(preferred.clone());
        }
    }

    if latest_tag.is_none() {
        latest_tag = vcs.latest_tag(target)?;
    }

    let mut tag_version = None;

    if let Some(tag) = &latest_tag {
        log::info!("Found latest tag {:?}", tag);

        if !looks_like_semver(tag) {
            log::warn!("Latest tag {:?} is not a valid SemVer version", tag);
        }

        let commits_ahead = vcs.commits_since(tag, target)?;
        if commits_ahead == 0 {
            log::info!("Latest tag {:?} matches {}", tag, target);
        } else {
            log::info!("{} is ahead of {:?} by {} commits", target, tag, commits_ahead);
        }

        let version = mangle_tag(tag);
        if version.is_empty() {
            log::warn!("Tag {:?} contains no version number, ignoring it", tag);
        } else if commits_ahead == 0 && !options.force_prerelease {
            return Ok(UpstreamResolution {
                version: UpstreamVersion::new(version),
                tag: Some(tag.clone()),
                commit_ish: tag.clone(),
                has_release: true,
                is_release: true,
            });
        } else {
            if options.force_prerelease {
                log::info!("Packaging {} as a prerelease as requested", target);
            }
            tag_version = Some(version);
        }
    }

    let base = match &tag_version {
        Some(version) => format!("{}+", version),
        None => NO_RELEASE_BASE.to_string(),
    };

    let committed_at = vcs.commit_time(target)?;

    let (hash, commit_ish) = match vcs.describe_long(target)? {
        Some(describe) => {
            let hash = describe_hash(&describe)
                .ok_or_else(|| {
                    VcsError::unexpected_output("git describe --long --tags", describe.clone())
                })?
                .to_string();
            (hash, describe)
        }
        None => {
            let hash = vcs.short_hash(target)?;
            (hash.clone(), hash)
        }
    };

    let version = format!("{}git{}.{}", base, committed_at.format("%Y%m%d"), hash);
    log::debug!("Snapshot version {} for {}", version, commit_ish);

    Ok(UpstreamResolution {
        version: UpstreamVersion::new(version),
        tag: latest_tag,
        commit_ish,
        has_release: tag_version.is_some(),
        is_release: false,
    })
}

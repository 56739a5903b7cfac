//! Go import path helpers
//!
//! This module provides:
//! - Repository root guessing for well-known hosting layouts
//! - Major version suffix splitting (`foo/v3` -> `foo`, 3)
//! - Debian package name derivation

mod naming;

pub use naming::{debian_package_name, normalize_package_name, short_host_name};

use regex::Regex;
use std::sync::LazyLock;

// Major version suffix of an import path: `/v2` or `.v2` (gopkg.in)
static MAJOR_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([/.])v([0-9]+)$").unwrap());

/// Hosts laid out as `host/owner/repo`
const OWNER_REPO_HOSTS: &[&str] = &[
    "bitbucket.org",
    "codeberg.org",
    "git.sr.ht",
    "github.com",
    "gitlab.com",
    "salsa.debian.org",
];

/// Prefixes followed by exactly one repository element
const SINGLE_REPO_PREFIXES: &[&str] = &[
    "go.opentelemetry.io",
    "golang.org/x",
    "google.golang.org",
    "k8s.io",
    "sigs.k8s.io",
];

/// Guess the repository root of an import path
///
/// Only the layout of well-known hosts is understood; any other path is
/// treated as its own root.
pub fn repo_root(import_path: &str) -> String {
    let parts: Vec<&str> = import_path.split('/').collect();
    let host = parts[0];

    if OWNER_REPO_HOSTS.contains(&host) {
        return join_prefix(&parts, 3);
    }

    if host == "gopkg.in" {
        // gopkg.in/yaml.v3 or gopkg.in/user/pkg.v1
        return match parts.get(1) {
            Some(second) if MAJOR_VERSION_RE.is_match(second) => join_prefix(&parts, 2),
            Some(_) => join_prefix(&parts, 3),
            None => import_path.to_string(),
        };
    }

    for prefix in SINGLE_REPO_PREFIXES {
        if import_path.starts_with(&format!("{}/", prefix)) {
            return join_prefix(&parts, prefix.split('/').count() + 1);
        }
    }

    log::debug!("No known repository layout for {}, using it as its own root", import_path);
    import_path.to_string()
}

fn join_prefix(parts: &[&str], n: usize) -> String {
    parts[..n.min(parts.len())].join("/")
}

/// An import path split at its major version suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MajorVersion<'a> {
    /// Path without the suffix, e.g. `example.com/foo` for `example.com/foo/v4`
    pub prefix: &'a str,
    /// `/` for module paths, `.` for gopkg.in
    pub separator: char,
    pub major: u64,
}

impl MajorVersion<'_> {
    /// Major version of `other` if it is another major version of the same
    /// module; the unversioned prefix counts as 1
    pub fn sibling_major(&self, other: &str) -> Option<u64> {
        let rest = other.strip_prefix(self.prefix)?;
        if rest.is_empty() {
            return Some(1);
        }
        let digits = rest.strip_prefix(self.separator)?.strip_prefix('v')?;
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().filter(|&major| major >= 2)
    }
}

/// Split `import_path` at a `/vN` or `.vN` major version suffix
///
/// Paths without a suffix, and suffixes too large for `u64`, yield `None`.
pub fn split_major_version(import_path: &str) -> Option<MajorVersion<'_>> {
    let caps = MAJOR_VERSION_RE.captures(import_path)?;
    let full = caps.get(0)?;
    let major = caps[2].parse::<u64>().ok()?;
    let separator = caps[1].chars().next()?;

    Some(MajorVersion {
        prefix: &import_path[..full.start()],
        separator,
        major,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_root_github() {
        assert_eq!(
            repo_root("github.com/spf13/cobra/doc"),
            "github.com/spf13/cobra"
        );
        assert_eq!(repo_root("github.com/spf13/cobra"), "github.com/spf13/cobra");
        assert_eq!(repo_root("github.com/spf13"), "github.com/spf13");
    }

    #[test]
    fn test_repo_root_sourcehut() {
        assert_eq!(
            repo_root("git.sr.ht/~sircmpwn/getopt/sub"),
            "git.sr.ht/~sircmpwn/getopt"
        );
    }

    #[test]
    fn test_repo_root_golang_x() {
        assert_eq!(repo_root("golang.org/x/text/unicode/norm"), "golang.org/x/text");
        assert_eq!(repo_root("golang.org/x/sys"), "golang.org/x/sys");
    }

    #[test]
    fn test_repo_root_single_repo_hosts() {
        assert_eq!(
            repo_root("google.golang.org/grpc/credentials"),
            "google.golang.org/grpc"
        );
        assert_eq!(
            repo_root("go.opentelemetry.io/otel/trace"),
            "go.opentelemetry.io/otel"
        );
        assert_eq!(repo_root("k8s.io/api/core/v1"), "k8s.io/api");
        assert_eq!(repo_root("sigs.k8s.io/yaml"), "sigs.k8s.io/yaml");
    }

    #[test]
    fn test_repo_root_gopkg_in() {
        assert_eq!(repo_root("gopkg.in/yaml.v3"), "gopkg.in/yaml.v3");
        assert_eq!(
            repo_root("gopkg.in/check.v1/internal"),
            "gopkg.in/check.v1"
        );
        assert_eq!(
            repo_root("gopkg.in/src-d/go-git.v4/plumbing"),
            "gopkg.in/src-d/go-git.v4"
        );
    }

    #[test]
    fn test_repo_root_unknown_host() {
        assert_eq!(repo_root("example.com/foo/bar"), "example.com/foo/bar");
        assert_eq!(repo_root("go.uber.org/zap"), "go.uber.org/zap");
    }

    #[test]
    fn test_split_major_version() {
        assert_eq!(
            split_major_version("github.com/foo/bar/v4"),
            Some(MajorVersion {
                prefix: "github.com/foo/bar",
                separator: '/',
                major: 4,
            })
        );
        assert_eq!(
            split_major_version("gopkg.in/yaml.v3"),
            Some(MajorVersion {
                prefix: "gopkg.in/yaml",
                separator: '.',
                major: 3,
            })
        );
    }

    #[test]
    fn test_split_major_version_unversioned() {
        assert!(split_major_version("github.com/foo/bar").is_none());
        assert!(split_major_version("github.com/foo/v2ray").is_none());
        assert!(split_major_version("example.com/x/v99999999999999999999999").is_none());
    }

    #[test]
    fn test_sibling_major() {
        let mv = split_major_version("github.com/foo/bar/v9999999999").unwrap();
        assert_eq!(mv.major, 9_999_999_999);
        assert_eq!(mv.sibling_major("github.com/foo/bar"), Some(1));
        assert_eq!(mv.sibling_major("github.com/foo/bar/v2"), Some(2));
        assert_eq!(mv.sibling_major("github.com/foo/bar/v17"), Some(17));
        assert_eq!(mv.sibling_major("github.com/foo/bar/v1"), None);
        assert_eq!(mv.sibling_major("github.com/foo/bar/v02"), None);
        assert_eq!(mv.sibling_major("github.com/foo/bar/v2/sub"), None);
        assert_eq!(mv.sibling_major("github.com/foo/barbaz"), None);
        assert_eq!(mv.sibling_major("github.com/foo/bar.v2"), None);
    }
}

//! Debian upstream version values and their ordering
//!
//! Ordering follows dpkg: strings are split into alternating non-digit and
//! digit runs. Non-digit runs compare character by character with `~`
//! sorting before everything (even the end of the string) and letters
//! sorting before other symbols. Digit runs compare numerically.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The upstream part of a Debian package version, e.g. `1.2~rc1` or
/// `0.0~git20180204.1d24609`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpstreamVersion(String);

impl UpstreamVersion {
    /// Wraps an already mangled version string
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Returns the version string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UpstreamVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq for UpstreamVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for UpstreamVersion {}

impl Ord for UpstreamVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_versions(&self.0, &other.0)
    }
}

impl PartialOrd for UpstreamVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Everything the resolver learned about the revision being packaged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamResolution {
    /// Debian upstream version
    pub version: UpstreamVersion,
    /// Latest release tag, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Commit-ish matching `version` (tag, describe output or short hash)
    pub commit_ish: String,
    /// Whether any release tag exists
    pub has_release: bool,
    /// Whether `version` is an exact tagged release
    pub is_release: bool,
}

/// Sort weight of a single character inside a non-digit run
fn char_order(c: Option<u8>) -> i32 {
    match c {
        None => 0,
        Some(c) if c.is_ascii_digit() => 0,
        Some(c) if c.is_ascii_alphabetic() => c as i32,
        Some(b'~') => -1,
        Some(c) => c as i32 + 256,
    }
}

/// Compare two upstream version strings using dpkg rules
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let (mut i, mut j) = (0, 0);
    let is_digit_at = |s: &[u8], k: usize| s.get(k).is_some_and(u8::is_ascii_digit);

    while i < a.len() || j < b.len() {
        while (i < a.len() && !a[i].is_ascii_digit()) || (j < b.len() && !b[j].is_ascii_digit())
        {
            let ac = char_order(a.get(i).copied());
            let bc = char_order(b.get(j).copied());
            if ac != bc {
                return ac.cmp(&bc);
            }
            i += 1;
            j += 1;
        }

        while a.get(i) == Some(&b'0') {
            i += 1;
        }
        while b.get(j) == Some(&b'0') {
            j += 1;
        }

        let mut first_diff = Ordering::Equal;
        while is_digit_at(a, i) && is_digit_at(b, j) {
            if first_diff == Ordering::Equal {
                first_diff = a[i].cmp(&b[j]);
            }
            i += 1;
            j += 1;
        }
        if is_digit_at(a, i) {
            return Ordering::Greater;
        }
        if is_digit_at(b, j) {
            return Ordering::Less;
        }
        if first_diff != Ordering::Equal {
            return first_diff;
        }
    }

    Ordering::Equal
}

//! Tag to upstream-version mangling

use regex::Regex;
use std::sync::LazyLock;

// Upstream pre-release suffix; the separator before it becomes `~` so that
// 1.0~rc1 < 1.0 in Debian ordering. Keep in sync with the uversionmangle
// rule of debian/watch files.
static PRERELEASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d)[_.\-+]?(RC|rc|pre|dev|beta|alpha)[.]?(\d*)$").unwrap()
});

// Count and hash part of `git describe --long` output, e.g. `v4.10.2-232-g9f107c8`
static DESCRIBE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\d+-g([0-9a-f]+)\s*$").unwrap());

/// Turn a release tag into a Debian upstream version
///
/// Pre-release separators are replaced with `~` and any leading non-numeric
/// prefix (`v`, `release-`, ...) is stripped.
pub fn mangle_tag(tag: &str) -> String {
    let replaced = PRERELEASE_RE.replace(tag, "${1}~${2}${3}");
    replaced.trim_start_matches(|c: char| !c.is_numeric()).to_string()
}

/// Whether `tag` is a `v`-prefixed semantic version such as `v1.2.3-rc.1`
pub fn looks_like_semver(tag: &str) -> bool {
    tag.strip_prefix('v')
        .is_some_and(|rest| semver::Version::parse(rest).is_ok())
}

/// Extract the abbreviated hash from `git describe --long --tags` output
pub fn describe_hash(describe: &str) -> Option<&str> {
    DESCRIBE_RE
        .captures(describe)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mangle_plain_tags() {
        assert_eq!(mangle_tag("v7.8"), "7.8");
        assert_eq!(mangle_tag("7.8"), "7.8");
        assert_eq!(mangle_tag("v1"), "1");
        assert_eq!(mangle_tag("release-2.3.4"), "2.3.4");
    }

    #[test]
    fn test_mangle_prerelease_tags() {
        assert_eq!(mangle_tag("v1.0-rc1"), "1.0~rc1");
        assert_eq!(mangle_tag("v1.0rc1"), "1.0~rc1");
        assert_eq!(mangle_tag("v2.0.0.beta.3"), "2.0.0~beta3");
        assert_eq!(mangle_tag("v0.9_alpha"), "0.9~alpha");
        assert_eq!(mangle_tag("v3.1+RC2"), "3.1~RC2");
        assert_eq!(mangle_tag("v1.2.3-pre"), "1.2.3~pre");
    }

    #[test]
    fn test_mangle_leaves_other_suffixes() {
        assert_eq!(mangle_tag("v1.2.3-final"), "1.2.3-final");
        assert_eq!(mangle_tag("v1.0-rc1-hotfix"), "1.0-rc1-hotfix");
    }

    #[test]
    fn test_mangle_tag_without_digits() {
        assert_eq!(mangle_tag("latest"), "");
    }

    #[test]
    fn test_looks_like_semver() {
        assert!(looks_like_semver("v1.2.3"));
        assert!(looks_like_semver("v0.1.0-rc.1"));
        assert!(looks_like_semver("v1.0.0+build.5"));
        assert!(!looks_like_semver("1.2.3"));
        assert!(!looks_like_semver("v1.2"));
        assert!(!looks_like_semver("v01.2.3"));
        assert!(!looks_like_semver("release"));
    }

    #[test]
    fn test_describe_hash() {
        assert_eq!(describe_hash("v4.10.2-232-g9f107c8"), Some("9f107c8"));
        assert_eq!(describe_hash("v1-0-gabcdef0\n"), Some("abcdef0"));
        assert_eq!(describe_hash("v1-rc-1-g0123abc"), Some("0123abc"));
        assert_eq!(describe_hash("9f107c8"), None);
        assert_eq!(describe_hash("v1.0"), None);
    }
}

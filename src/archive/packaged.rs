//! Lookup table of Go import paths already packaged in Debian

use crate::importpath::{repo_root, split_major_version};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A Debian binary package shipping a Go import path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebianPackage {
    /// Binary package name, e.g. `golang-github-spf13-cobra-dev`
    pub binary: String,
    /// Source package name
    pub source: String,
}

impl DebianPackage {
    pub fn new(binary: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            source: source.into(),
        }
    }
}

/// How an import path matched the packaged set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackagedMatch<'a> {
    /// The import path itself is packaged
    Exact(&'a DebianPackage),
    /// Another major version is packaged; `major` is 1 for the unversioned path
    OtherMajorVersion { major: u64, package: &'a DebianPackage },
    /// The repository root is packaged
    RepoRoot { root: String, package: &'a DebianPackage },
}

impl<'a> PackagedMatch<'a> {
    /// The matching package
    pub fn package(&self) -> &'a DebianPackage {
        match self {
            PackagedMatch::Exact(package)
            | PackagedMatch::OtherMajorVersion { package, .. }
            | PackagedMatch::RepoRoot { package, .. } => package,
        }
    }
}

/// Import paths packaged in Debian plus the source packages waiting in NEW
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackagedSet {
    by_import_path: HashMap<String, DebianPackage>,
    sources_in_new: HashMap<String, String>,
}

impl PackagedSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `import_path` as shipped by `package`
    pub fn insert(&mut self, import_path: impl Into<String>, package: DebianPackage) {
        self.by_import_path.insert(import_path.into(), package);
    }

    /// Record a source package waiting in NEW
    pub fn insert_new(&mut self, source: impl Into<String>, version: impl Into<String>) {
        self.sources_in_new.insert(source.into(), version.into());
    }

    /// Add an import path (builder pattern)
    pub fn with(mut self, import_path: &str, binary: &str, source: &str) -> Self {
        self.insert(import_path, DebianPackage::new(binary, source));
        self
    }

    /// Add a source in NEW (builder pattern)
    pub fn with_new(mut self, source: &str, version: &str) -> Self {
        self.insert_new(source, version);
        self
    }

    /// Package shipping exactly `import_path`
    pub fn get(&self, import_path: &str) -> Option<&DebianPackage> {
        self.by_import_path.get(import_path)
    }

    /// Version of `source` in NEW, if it is waiting there
    pub fn new_version(&self, source: &str) -> Option<&str> {
        self.sources_in_new.get(source).map(String::as_str)
    }

    /// Find `import_path` in the set
    ///
    /// Tries the exact path, then lower major versions (newest first), then
    /// the repository root.
    pub fn find(&self, import_path: &str) -> Option<PackagedMatch<'_>> {
        if let Some(package) = self.get(import_path) {
            return Some(PackagedMatch::Exact(package));
        }

        if let Some(found) = self.find_lower_major(import_path) {
            return Some(found);
        }

        let root = repo_root(import_path);
        if root != import_path {
            if let Some(package) = self.get(&root) {
                return Some(PackagedMatch::RepoRoot { root, package });
            }
        }

        None
    }

    /// Highest packaged major version below the one `import_path` asks for
    fn find_lower_major(&self, import_path: &str) -> Option<PackagedMatch<'_>> {
        let wanted = split_major_version(import_path)?;

        self.by_import_path
            .iter()
            .filter_map(|(path, package)| {
                let major = wanted.sibling_major(path)?;
                (major < wanted.major).then_some((major, package))
            })
            .max_by_key(|(major, _)| *major)
            .map(|(major, package)| PackagedMatch::OtherMajorVersion { major, package })
    }

    /// All import paths with their binary package, sorted by import path
    pub fn import_paths(&self) -> BTreeMap<&str, &str> {
        self.by_import_path
            .iter()
            .map(|(path, pkg)| (path.as_str(), pkg.binary.as_str()))
            .collect()
    }

    /// Number of packaged import paths
    pub fn len(&self) -> usize {
        self.by_import_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_import_path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cobra() -> PackagedSet {
        PackagedSet::new()
            .with(
                "github.com/spf13/cobra",
                "golang-github-spf13-cobra-dev",
                "golang-github-spf13-cobra",
            )
            .with("github.com/foo/bar/v2", "golang-github-foo-bar-v2-dev", "golang-github-foo-bar-v2")
            .with("github.com/baz/qux", "golang-github-baz-qux-dev", "golang-github-baz-qux")
    }

    #[test]
    fn test_find_exact() {
        let set = cobra();
        let found = set.find("github.com/spf13/cobra").unwrap();
        assert_eq!(found.package().binary, "golang-github-spf13-cobra-dev");
        assert!(matches!(found, PackagedMatch::Exact(_)));
    }

    #[test]
    fn test_find_other_major_version() {
        let set = cobra();
        let found = set.find("github.com/foo/bar/v4").unwrap();
        assert!(matches!(found, PackagedMatch::OtherMajorVersion { major: 2, .. }));

        let found = set.find("github.com/baz/qux/v3").unwrap();
        assert!(matches!(found, PackagedMatch::OtherMajorVersion { major: 1, .. }));
    }

    #[test]
    fn test_find_prefers_highest_lower_major() {
        let set = cobra()
            .with("github.com/foo/bar", "golang-github-foo-bar-dev", "golang-github-foo-bar")
            .with("github.com/foo/bar/v3", "golang-github-foo-bar-v3-dev", "golang-github-foo-bar-v3")
            .with("github.com/foo/bar/v5", "golang-github-foo-bar-v5-dev", "golang-github-foo-bar-v5");

        let found = set.find("github.com/foo/bar/v4").unwrap();
        assert!(matches!(found, PackagedMatch::OtherMajorVersion { major: 3, .. }));
        assert_eq!(found.package().binary, "golang-github-foo-bar-v3-dev");

        let found = set.find("github.com/foo/bar/v9999999999").unwrap();
        assert!(matches!(found, PackagedMatch::OtherMajorVersion { major: 5, .. }));
    }

    #[test]
    fn test_find_huge_major_without_siblings() {
        let set = cobra();
        assert!(set.find("example.com/x/v9999999999").is_none());
        assert!(set.find("example.com/x/v99999999999999999999999").is_none());
        assert!(set.find("github.com/foo/bar/v1").is_none());
    }

    #[test]
    fn test_find_repo_root() {
        let set = cobra();
        let found = set.find("github.com/spf13/cobra/doc").unwrap();
        match found {
            PackagedMatch::RepoRoot { root, package } => {
                assert_eq!(root, "github.com/spf13/cobra");
                assert_eq!(package.source, "golang-github-spf13-cobra");
            }
            other => panic!("unexpected match {:?}", other),
        }
    }

    #[test]
    fn test_find_miss() {
        let set = cobra();
        assert!(set.find("github.com/spf13/pflag").is_none());
        assert!(set.find("example.com/whatever").is_none());
    }

    #[test]
    fn test_new_version() {
        let set = cobra().with_new("golang-github-baz-qux", "1.2.0-1");
        assert_eq!(set.new_version("golang-github-baz-qux"), Some("1.2.0-1"));
        assert_eq!(set.new_version("golang-github-spf13-cobra"), None);
    }

    #[test]
    fn test_import_paths_sorted() {
        let set = cobra();
        let paths: Vec<&str> = set.import_paths().keys().copied().collect();
        assert_eq!(
            paths,
            vec!["github.com/baz/qux", "github.com/foo/bar/v2", "github.com/spf13/cobra"]
        );
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
    }
}

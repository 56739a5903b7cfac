//! Go module references as printed by `go mod graph`

use serde::{Deserialize, Serialize};
use std::fmt;

/// A module path with an optional version marker (`path@version`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleRef {
    /// Module import path, the identity of a graph node
    pub path: String,
    /// Version marker after `@`, absent for the main module
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ModuleRef {
    /// Creates a module reference without a version
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: None,
        }
    }

    /// Sets the version (builder pattern)
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Parses `path[@version]`
    pub fn parse(s: &str) -> Self {
        match s.split_once('@') {
            Some((path, version)) => Self::new(path).with_version(version),
            None => Self::new(s),
        }
    }

    /// Whether this is a toolchain pseudo-module (`go`, `toolchain`)
    pub fn is_toolchain(&self) -> bool {
        self.path == "go" || self.path == "toolchain"
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.path, version),
            None => f.write_str(&self.path),
        }
    }
}

/// One `parent child` line of a dependency edge list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// The requiring module
    pub parent: ModuleRef,
    /// The required module
    pub child: ModuleRef,
}

impl Edge {
    /// Creates a new edge
    pub fn new(parent: ModuleRef, child: ModuleRef) -> Self {
        Self { parent, child }
    }

    /// Parses one edge-list line; blank or single-field lines yield `None`
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let parent = fields.next()?;
        let child = fields.next()?;
        Some(Self::new(ModuleRef::parse(parent), ModuleRef::parse(child)))
    }
}

/// Parses a whole edge list, skipping lines that are not edges
pub fn parse_edges(text: &str) -> Vec<Edge> {
    text.lines().filter_map(Edge::parse_line).collect()
}

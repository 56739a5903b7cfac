//! Module dependency graph
//!
//! This module provides:
//! - Graph construction from `go mod graph` edge lists
//! - The walker producing the report of modules still to be packaged

mod walker;

pub use walker::{walk, LineKind, ReportLine, BLOCKLIST};

use crate::domain::{Edge, ModuleRef};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A resolved module and the modules it requires
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyNode {
    /// Module path without version
    pub name: String,
    /// Required modules with the version of the requiring edge, sorted by
    /// path and deduplicated on it
    pub children: Vec<ModuleRef>,
}

/// Dependency graph rooted at the module being estimated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    root: String,
    nodes: HashMap<String, DependencyNode>,
}

impl DependencyGraph {
    /// Build a graph keeping every edge as given
    pub fn from_edges<'a>(root: &str, edges: impl IntoIterator<Item = &'a Edge>) -> Self {
        let mut builder = GraphBuilder::new(root);
        for edge in edges {
            builder.add(&edge.parent.path, &edge.child);
        }
        builder.finish()
    }

    /// Build a graph from the `go mod graph` output of a wrapper module
    ///
    /// Edges of the wrapper itself (the only unversioned parent) are dropped,
    /// except when the parent is `root`. Sub-packages of `root` are folded
    /// into `root`. When `direct_deps` is given, children of `root` outside
    /// of it are dropped, since `go mod graph` lists indirect requirements
    /// of the main module as well.
    pub fn from_mod_graph<'a>(
        root: &str,
        edges: impl IntoIterator<Item = &'a Edge>,
        direct_deps: Option<&HashSet<String>>,
    ) -> Self {
        let sub_prefix = format!("{}/", root);
        let mut builder = GraphBuilder::new(root);

        for edge in edges {
            let mut parent = edge.parent.path.as_str();
            if edge.parent.version.is_none() && parent != root {
                continue;
            }
            if parent.starts_with(&sub_prefix) {
                parent = root;
            }
            if parent == root {
                if let Some(direct) = direct_deps {
                    if !direct.contains(&edge.child.path) {
                        continue;
                    }
                }
            }
            builder.add(parent, &edge.child);
        }

        builder.finish()
    }

    /// The root module path
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Node for `name`
    pub fn node(&self, name: &str) -> Option<&DependencyNode> {
        self.nodes.get(name)
    }

    /// Sorted children of `name`; empty for unknown modules
    pub fn children(&self, name: &str) -> &[ModuleRef] {
        self.nodes
            .get(name)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of distinct modules, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

struct GraphBuilder {
    root: String,
    // child path -> version of the first edge seen
    children: HashMap<String, BTreeMap<String, Option<String>>>,
}

impl GraphBuilder {
    fn new(root: &str) -> Self {
        let mut children = HashMap::new();
        children.insert(root.to_string(), BTreeMap::new());
        Self {
            root: root.to_string(),
            children,
        }
    }

    fn add(&mut self, parent: &str, child: &ModuleRef) {
        self.children.entry(child.path.clone()).or_default();
        self.children
            .entry(parent.to_string())
            .or_default()
            .entry(child.path.clone())
            .or_insert_with(|| child.version.clone());
    }

    fn finish(self) -> DependencyGraph {
        let nodes = self
            .children
            .into_iter()
            .map(|(name, children)| {
                let node = DependencyNode {
                    name: name.clone(),
                    children: children
                        .into_iter()
                        .map(|(path, version)| ModuleRef { path, version })
                        .collect(),
                };
                (name, node)
            })
            .collect();
        DependencyGraph {
            root: self.root,
            nodes,
        }
    }
}

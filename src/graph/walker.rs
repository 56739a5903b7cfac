//! Depth-first walk reporting the modules that still need packaging

use crate::archive::{PackagedMatch, PackagedSet};
use crate::domain::ModuleRef;
use crate::graph::DependencyGraph;
use crate::importpath::repo_root;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Modules never reported, with the reason
pub const BLOCKLIST: &[(&str, &str)] = &[
    ("github.com/arduino/go-win32-utils", "Windows only"),
    ("github.com/Microsoft/go-winio", "Windows only"),
];

/// One line of the estimate report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    /// Depth below the root, starting at 0 for direct dependencies
    pub indent: usize,
    /// Module path
    pub module: String,
    /// Version required by the edge this line was reached through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_version: Option<String>,
    #[serde(flatten)]
    pub kind: LineKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineKind {
    /// First time this module is found missing from Debian
    Needed {
        /// Repository root when the module lives below it
        #[serde(skip_serializing_if = "Option::is_none")]
        repo_root: Option<String>,
        /// Another module of the same repository was listed earlier
        root_repeat: bool,
    },
    /// Module already listed; `count` parents need it so far
    Repeat { count: usize },
    /// Module packaged by a source that is still waiting in NEW
    InNew { source: String, version: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Unseen,
    Needed(usize),
    Satisfied,
}

/// Walk `graph` from its root and report every module not packaged yet
///
/// The root itself is not reported. Children are visited in sorted order.
/// Packaged modules stop the descent; modules seen before are reported as
/// repeats without descending again, which also terminates cycles.
pub fn walk(graph: &DependencyGraph, packaged: &PackagedSet) -> Vec<ReportLine> {
    let mut state: HashMap<&str, NodeState> = HashMap::new();
    let mut roots_seen: HashSet<String> = HashSet::new();
    let mut lines = Vec::new();

    state.insert(graph.root(), NodeState::Satisfied);

    let mut stack: Vec<(&ModuleRef, usize)> = graph
        .children(graph.root())
        .iter()
        .rev()
        .map(|child| (child, 0))
        .collect();

    while let Some((child, indent)) = stack.pop() {
        let module = child.path.as_str();
        match state.get(module).copied().unwrap_or(NodeState::Unseen) {
            NodeState::Satisfied => continue,
            NodeState::Needed(count) => {
                let count = count + 1;
                state.insert(module, NodeState::Needed(count));
                lines.push(ReportLine {
                    indent,
                    module: module.to_string(),
                    required_version: child.version.clone(),
                    kind: LineKind::Repeat { count },
                });
                continue;
            }
            NodeState::Unseen => {}
        }

        if let Some(line) = visit_new(child, indent, packaged, &mut roots_seen) {
            let needed = matches!(line.kind, LineKind::Needed { .. });
            lines.push(line);
            if needed {
                state.insert(module, NodeState::Needed(1));
                stack.extend(
                    graph
                        .children(module)
                        .iter()
                        .rev()
                        .map(|grandchild| (grandchild, indent + 1)),
                );
                continue;
            }
        }

        state.insert(module, NodeState::Satisfied);
    }

    lines
}

/// First visit of `child`; `None` or an `InNew` line means it is satisfied
fn visit_new(
    child: &ModuleRef,
    indent: usize,
    packaged: &PackagedSet,
    roots_seen: &mut HashSet<String>,
) -> Option<ReportLine> {
    // go and toolchain only carry the Go version requirement
    if child.is_toolchain() {
        return None;
    }
    let module = child.path.as_str();

    if let Some(found) = packaged.find(module) {
        let package = found.package();
        match &found {
            PackagedMatch::Exact(_) => {}
            PackagedMatch::OtherMajorVersion { major: 1, .. } => {
                log::info!("{} has no version string in Debian ({})", module, package.source);
            }
            PackagedMatch::OtherMajorVersion { major, .. } => {
                log::info!("{} is v{} in Debian ({})", module, major, package.source);
            }
            PackagedMatch::RepoRoot { root, .. } => {
                log::info!("{} is packaged as {} in Debian ({})", module, root, package.source);
            }
        }
        return packaged.new_version(&package.source).map(|version| ReportLine {
            indent,
            module: module.to_string(),
            required_version: child.version.clone(),
            kind: LineKind::InNew {
                source: package.source.clone(),
                version: version.to_string(),
            },
        });
    }

    if let Some((_, reason)) = BLOCKLIST.iter().find(|(name, _)| *name == module) {
        log::info!("Ignoring module {}: {}", module, reason);
        return None;
    }

    let root = repo_root(module);
    let root_repeat = !roots_seen.insert(root.clone());
    let repo_root = (module.len() > root.len() && module.starts_with(&root)).then_some(root);

    Some(ReportLine {
        indent,
        module: module.to_string(),
        required_version: child.version.clone(),
        kind: LineKind::Needed {
            repo_root,
            root_repeat,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_edges;

    fn graph(text: &str) -> DependencyGraph {
        DependencyGraph::from_edges("root", &parse_edges(text))
    }

    fn render(lines: &[ReportLine]) -> Vec<String> {
        lines
            .iter()
            .map(|l| {
                let pad = "  ".repeat(l.indent);
                match &l.kind {
                    LineKind::Needed { .. } => format!("{}{}", pad, l.module),
                    LineKind::Repeat { count } => format!("{}{} ({})", pad, l.module, count),
                    LineKind::InNew { source, .. } => format!("{}{} [NEW {}]", pad, l.module, source),
                }
            })
            .collect()
    }

    #[test]
    fn test_shared_child_is_repeated() {
        let g = graph("root A\nroot B\nA C\nB C\n");
        let lines = walk(&g, &PackagedSet::new());
        assert_eq!(render(&lines), vec!["A", "  C", "B", "  C (2)"]);
    }

    #[test]
    fn test_packaged_module_stops_descent() {
        let g = graph("root A\nA B\nB C\n");
        let packaged = PackagedSet::new().with("A", "a-dev", "a");
        assert!(walk(&g, &packaged).is_empty());
    }

    #[test]
    fn test_module_in_new_is_reported() {
        let g = graph("root github.com/x/a\ngithub.com/x/a github.com/x/b\n");
        let packaged = PackagedSet::new()
            .with("github.com/x/a", "golang-github-x-a-dev", "golang-github-x-a")
            .with_new("golang-github-x-a", "1.0.0-1");
        let lines = walk(&g, &packaged);
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0].kind,
            LineKind::InNew {
                source: "golang-github-x-a".to_string(),
                version: "1.0.0-1".to_string(),
            }
        );
    }

    #[test]
    fn test_cycle_terminates() {
        let g = graph("root A\nA B\nB A\n");
        let lines = walk(&g, &PackagedSet::new());
        assert_eq!(render(&lines), vec!["A", "  B", "    A (2)"]);
    }

    #[test]
    fn test_toolchain_and_blocklist_skipped() {
        let g = graph("root go\nroot toolchain\nroot github.com/Microsoft/go-winio\nroot X\n");
        let lines = walk(&g, &PackagedSet::new());
        assert_eq!(render(&lines), vec!["X"]);
    }

    #[test]
    fn test_children_visited_in_sorted_order() {
        let g = graph("root zeta\nroot alpha\nroot mid\n");
        let lines = walk(&g, &PackagedSet::new());
        assert_eq!(render(&lines), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_root_not_reported_on_back_edge() {
        let g = graph("root A\nA root\n");
        let lines = walk(&g, &PackagedSet::new());
        assert_eq!(render(&lines), vec!["A"]);
    }

    #[test]
    fn test_repo_root_annotations() {
        let g = graph(
            "root github.com/x/repo/sub1\nroot github.com/x/repo/sub2\nroot github.com/y/other\n",
        );
        let lines = walk(&g, &PackagedSet::new());
        assert_eq!(
            lines[0].kind,
            LineKind::Needed {
                repo_root: Some("github.com/x/repo".to_string()),
                root_repeat: false,
            }
        );
        assert_eq!(
            lines[1].kind,
            LineKind::Needed {
                repo_root: Some("github.com/x/repo".to_string()),
                root_repeat: true,
            }
        );
        assert_eq!(
            lines[2].kind,
            LineKind::Needed {
                repo_root: None,
                root_repeat: false,
            }
        );
    }

    #[test]
    fn test_each_needed_module_listed_once() {
        let g = graph("root A\nroot B\nroot C\nA D\nB D\nC D\nD E\n");
        let lines = walk(&g, &PackagedSet::new());
        let needed: Vec<&str> = lines
            .iter()
            .filter(|l| matches!(l.kind, LineKind::Needed { .. }))
            .map(|l| l.module.as_str())
            .collect();
        assert_eq!(needed, vec!["A", "D", "E", "B", "C"]);
        assert_eq!(
            render(&lines),
            vec!["A", "  D", "    E", "B", "  D (2)", "C", "  D (3)"]
        );
    }

    #[test]
    fn test_approximate_match_satisfies() {
        let g = graph("root github.com/x/lib/v3\nroot github.com/y/repo/pkg\n");
        let packaged = PackagedSet::new()
            .with("github.com/x/lib/v2", "golang-github-x-lib-v2-dev", "golang-github-x-lib-v2")
            .with("github.com/y/repo", "golang-github-y-repo-dev", "golang-github-y-repo");
        assert!(walk(&g, &packaged).is_empty());
    }

    #[test]
    fn test_lines_carry_edge_versions() {
        let g = graph("root A@v1.0.0\nroot B@v0.2.0\nA@v1.0.0 B@v0.3.0\n");
        let lines = walk(&g, &PackagedSet::new());
        let versions: Vec<(&str, Option<&str>)> = lines
            .iter()
            .map(|l| (l.module.as_str(), l.required_version.as_deref()))
            .collect();
        assert_eq!(
            versions,
            vec![("A", Some("v1.0.0")), ("B", Some("v0.3.0")), ("B", Some("v0.2.0"))]
        );
        assert_eq!(lines[2].kind, LineKind::Repeat { count: 2 });
    }

    #[test]
    fn test_huge_major_version_suffix() {
        let g = graph("root example.com/x/v9999999999\nroot github.com/y/z/v9999999999\n");
        let packaged =
            PackagedSet::new().with("github.com/y/z/v3", "golang-github-y-z-v3-dev", "golang-github-y-z-v3");
        let lines = walk(&g, &packaged);
        assert_eq!(render(&lines), vec!["example.com/x/v9999999999"]);
    }
}

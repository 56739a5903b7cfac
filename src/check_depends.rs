//! Comparison of go.mod requirements with debian/control Build-Depends

use crate::archive::PackagedSet;
use crate::error::ManifestError;
use crate::importpath::repo_root;
use crate::manifest::{load_control, load_go_mod, GoMod, SourceStanza};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

/// A difference between go.mod and debian/control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum DependencyChange {
    /// Required by go.mod but missing from Build-Depends; `package` is
    /// `None` when no Debian package ships it yet
    New {
        import_path: String,
        package: Option<String>,
    },
    /// In Build-Depends but no longer required by go.mod
    Removed { package: String },
}

/// A go.mod requirement mapped to its Debian package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoModDependency {
    /// Repository root of the requirement
    pub import_path: String,
    pub package: Option<String>,
}

/// Direct go.mod requirements, folded to repository roots
pub fn go_mod_dependencies(go_mod: &GoMod, packaged: &PackagedSet) -> Vec<GoModDependency> {
    let mut seen = BTreeSet::new();
    let mut deps = Vec::new();

    for req in go_mod.direct_requires() {
        let root = repo_root(&req.path);
        if !seen.insert(root.clone()) {
            continue;
        }
        let package = packaged
            .get(&root)
            .or_else(|| packaged.get(&req.path))
            .map(|p| p.binary.clone());
        deps.push(GoModDependency {
            import_path: root,
            package,
        });
    }

    deps
}

/// `-dev` packages from Build-Depends
pub fn control_dependencies(control: &SourceStanza) -> Vec<String> {
    control
        .build_depends()
        .into_iter()
        .filter(|name| name.ends_with("-dev"))
        .collect()
}

/// Differences between go.mod and debian/control; empty when in sync
pub fn compare(go_deps: &[GoModDependency], control_deps: &[String]) -> Vec<DependencyChange> {
    let mut changes = Vec::new();

    for dep in go_deps {
        let listed = dep
            .package
            .as_ref()
            .is_some_and(|pkg| control_deps.contains(pkg));
        if !listed {
            changes.push(DependencyChange::New {
                import_path: dep.import_path.clone(),
                package: dep.package.clone(),
            });
        }
    }

    for pkg in control_deps {
        let required = go_deps
            .iter()
            .any(|dep| dep.package.as_deref() == Some(pkg.as_str()));
        if !required {
            changes.push(DependencyChange::Removed {
                package: pkg.clone(),
            });
        }
    }

    changes
}

/// Load `{dir}/go.mod` and `{dir}/debian/control` and compare them
pub fn check_depends(
    dir: &Path,
    packaged: &PackagedSet,
) -> Result<Vec<DependencyChange>, ManifestError> {
    let go_mod = load_go_mod(dir)?;
    let control = load_control(dir)?;

    let go_deps = go_mod_dependencies(&go_mod, packaged);
    let control_deps = control_dependencies(&control);
    log::debug!(
        "{} go.mod dependencies, {} Build-Depends",
        go_deps.len(),
        control_deps.len()
    );

    Ok(compare(&go_deps, &control_deps))
}

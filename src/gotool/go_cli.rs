//! `go` command-line implementation of the `GoToolchain` trait

use crate::error::ToolError;
use crate::gotool::GoToolchain;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Module name of the throwaway module used to drive `go get`
pub const WRAPPER_MODULE: &str = "dummymod";

/// Environment variables forwarded to `go`
const PASSTHROUGH_VARS: &[&str] = &[
    "HOME",
    "PATH",
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
    "NO_PROXY",
    "no_proxy",
    "GIT_PROXY_COMMAND",
    "GIT_HTTP_PROXY_AUTHMETHOD",
];

/// The forwarded subset of the current environment
pub fn passthrough_env() -> Vec<(String, String)> {
    PASSTHROUGH_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok().map(|v| (name.to_string(), v)))
        .collect()
}

/// `go` running against a private GOPATH and a wrapper module
///
/// Both directories are temporary and removed on drop.
pub struct GoCli {
    gopath: TempDir,
    workdir: TempDir,
}

impl GoCli {
    /// Create the temporary GOPATH and the wrapper module
    pub fn new() -> Result<Self, ToolError> {
        let gopath = tempfile::Builder::new()
            .prefix("gopkgdeb-gopath")
            .tempdir()
            .map_err(|e| ToolError::io(std::env::temp_dir(), e))?;
        let workdir = tempfile::Builder::new()
            .prefix("gopkgdeb-work")
            .tempdir()
            .map_err(|e| ToolError::io(std::env::temp_dir(), e))?;

        let go_mod = workdir.path().join("go.mod");
        fs::write(&go_mod, format!("module {}\n", WRAPPER_MODULE))
            .map_err(|e| ToolError::io(&go_mod, e))?;

        Ok(Self { gopath, workdir })
    }

    /// The private GOPATH
    pub fn gopath(&self) -> &Path {
        self.gopath.path()
    }

    /// Directory of the wrapper module
    pub fn workdir(&self) -> &Path {
        self.workdir.path()
    }

    fn command(&self, args: &[&str], dir: &Path) -> Command {
        let mut cmd = Command::new("go");
        cmd.args(args)
            .current_dir(dir)
            .env_clear()
            .envs(passthrough_env())
            .env("GOPATH", self.gopath.path())
            // module cache files are read-only by default, which breaks cleanup
            .env("GOFLAGS", "-modcacherw");
        cmd
    }

    fn run(&self, args: &[&str], dir: &Path) -> Result<String, ToolError> {
        let command = command_line(args);
        log::debug!("running {} in {}", command, dir.display());

        let output: Output = self
            .command(args, dir)
            .output()
            .map_err(|source| ToolError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ToolError::failed(command, output.status.to_string(), stderr));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn get(&self, module: &str, revision: Option<&str>) -> Result<(), ToolError> {
        // go get takes packages, not repositories
        let mut packages = format!("{}/...", module);
        if let Some(rev) = revision {
            packages.push('@');
            packages.push_str(rev);
        }
        self.run(&["get", "-t", &packages], self.workdir())?;
        Ok(())
    }

    fn module_dir(&self, module: &str) -> Result<PathBuf, ToolError> {
        let out = self.run(&["list", "-f", "{{.Dir}}", module], self.workdir())?;
        Ok(PathBuf::from(out.trim()))
    }
}

fn command_line(args: &[&str]) -> String {
    format!("go {}", args.join(" "))
}

/// Remove every `vendor` directory below `dir`, returning whether any existed
pub(crate) fn remove_vendor_dirs(dir: &Path) -> Result<bool, ToolError> {
    let mut found = false;
    let entries = fs::read_dir(dir).map_err(|e| ToolError::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| ToolError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| ToolError::io(&path, e))?;
        if !file_type.is_dir() {
            continue;
        }
        if entry.file_name() == "vendor" {
            log::debug!("removing {}", path.display());
            fs::remove_dir_all(&path).map_err(|e| ToolError::io(&path, e))?;
            found = true;
        } else if remove_vendor_dirs(&path)? {
            found = true;
        }
    }

    Ok(found)
}

impl GoToolchain for GoCli {
    fn download(&self, module: &str, revision: Option<&str>) -> Result<(), ToolError> {
        self.get(module, revision)?;

        if remove_vendor_dirs(self.workdir())? {
            log::info!("Removed vendored dependencies, fetching them again");
            self.get(module, revision)?;
        }
        Ok(())
    }

    fn mod_graph(&self) -> Result<String, ToolError> {
        self.run(&["mod", "graph"], self.workdir())
    }

    fn direct_dependencies(&self, module: &str) -> Result<HashSet<String>, ToolError> {
        let dir = self.module_dir(module)?;
        let out = self.run(
            &["list", "-m", "-f", "{{if not .Indirect}}{{.Path}}{{end}}", "all"],
            &dir,
        )?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }
}

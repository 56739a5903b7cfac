//! `git` command-line implementation of the `Vcs` trait

use crate::error::VcsError;
use crate::vcs::Vcs;
use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// A git checkout queried through the `git` binary
#[derive(Debug, Clone)]
pub struct GitCli {
    /// Working directory of the checkout
    dir: PathBuf,
}

impl GitCli {
    /// Create a handle for the checkout at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The checkout directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Run git and capture its output, failing only when git cannot be spawned
    fn run(&self, args: &[&str]) -> Result<Output, VcsError> {
        log::debug!("running git {} in {}", args.join(" "), self.dir.display());
        Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .output()
            .map_err(|e| VcsError::command(command_line(args), &self.dir, e.to_string()))
    }

    /// Run git and return trimmed stdout, failing on a non-zero exit
    fn run_ok(&self, args: &[&str]) -> Result<String, VcsError> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {}", output.status, stderr)
            };
            return Err(VcsError::command(command_line(args), &self.dir, message));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run git and return trimmed stdout, or `None` on a non-zero exit
    fn run_optional(&self, args: &[&str]) -> Result<Option<String>, VcsError> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Ok(None);
        }
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if stdout.is_empty() { None } else { Some(stdout) })
    }
}

fn command_line(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}

impl Vcs for GitCli {
    fn tags(&self) -> Result<Vec<String>, VcsError> {
        let out = self.run_ok(&["tag", "--list"])?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    fn latest_tag(&self, rev: &str) -> Result<Option<String>, VcsError> {
        self.run_optional(&["describe", "--abbrev=0", "--tags", "--exclude", "*/v*", rev])
    }

    fn commits_since(&self, tag: &str, rev: &str) -> Result<u64, VcsError> {
        let range = format!("{}..{}", tag, rev);
        let args = ["rev-list", "--count", range.as_str()];
        let out = self.run_ok(&args)?;
        out.parse()
            .map_err(|_| VcsError::unexpected_output(command_line(&args), out))
    }

    fn commit_time(&self, rev: &str) -> Result<DateTime<Utc>, VcsError> {
        let args = ["log", "--pretty=format:%ct", "-n1", "--no-show-signature", rev];
        let out = self.run_ok(&args)?;
        let seconds: i64 = out
            .parse()
            .map_err(|_| VcsError::unexpected_output(command_line(&args), out.clone()))?;
        Utc.timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| VcsError::unexpected_output(command_line(&args), out))
    }

    fn describe_long(&self, rev: &str) -> Result<Option<String>, VcsError> {
        self.run_optional(&["describe", "--long", "--tags", rev])
    }

    fn short_hash(&self, rev: &str) -> Result<String, VcsError> {
        // peel annotated tags to the commit they point at
        let commit = format!("{}^{{commit}}", rev);
        self.run_ok(&["rev-parse", "--short", "--verify", commit.as_str()])
    }
}

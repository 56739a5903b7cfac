//! Go toolchain access for dependency estimation
//!
//! This module provides:
//! - The `GoToolchain` trait: download a module and inspect its module graph
//! - `GoCli`: the implementation running `go` in an isolated GOPATH

mod go_cli;

pub use go_cli::{passthrough_env, GoCli, WRAPPER_MODULE};

use crate::error::ToolError;
use std::collections::HashSet;

/// Module download and graph queries
///
/// Calls block until the underlying tool exits.
pub trait GoToolchain: Send + Sync {
    /// Download `module` and every package below it, at `revision` if given
    fn download(&self, module: &str, revision: Option<&str>) -> Result<(), ToolError>;

    /// The `go mod graph` edge list of the work module
    fn mod_graph(&self) -> Result<String, ToolError>;

    /// Direct (non-indirect) requirements of `module`
    fn direct_dependencies(&self, module: &str) -> Result<HashSet<String>, ToolError>;
}

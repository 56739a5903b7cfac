//! gopkgdeb - Debian packaging helper library for Go modules
//!
//! This library provides the core functionality for:
//! - Deriving Debian upstream versions from git tags and commits
//! - Estimating which Go modules still need packaging
//! - Mapping import paths to Debian package names
//! - Comparing go.mod requirements with debian/control

pub mod archive;
pub mod check_depends;
pub mod cli;
pub mod domain;
pub mod error;
pub mod estimator;
pub mod gotool;
pub mod graph;
pub mod importpath;
pub mod manifest;
pub mod output;
pub mod progress;
pub mod search;
pub mod vcs;
pub mod version;

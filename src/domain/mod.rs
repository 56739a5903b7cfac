//! Core domain models for gopkgdeb
//!
//! This module contains the fundamental types used throughout the application:
//! - Upstream version values with Debian ordering
//! - Go module references and dependency edges
//! - Debian package layout types

mod module;
mod package_type;
mod upstream;

pub use module::{parse_edges, Edge, ModuleRef};
pub use package_type::PackageType;
pub use upstream::{compare_versions, UpstreamResolution, UpstreamVersion};

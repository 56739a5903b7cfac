//! Packaging manifest reading and parsing
//!
//! This module provides functionality to:
//! - Read go.mod requirements
//! - Read the debian/control source stanza

mod control;
mod go_mod;

pub use control::{parse_control, parse_relations, SourceStanza};
pub use go_mod::{parse_go_mod, GoMod, Requirement};

use crate::error::ManifestError;
use std::path::Path;

/// Read a manifest file, mapping a missing file to `ManifestError::NotFound`
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ManifestError::not_found(path)
        } else {
            ManifestError::read_error(path, e)
        }
    })
}

/// Read and parse `{dir}/go.mod`
pub fn load_go_mod(dir: &Path) -> Result<GoMod, ManifestError> {
    let path = dir.join("go.mod");
    parse_go_mod(&read_manifest(&path)?, &path)
}

/// Read and parse `{dir}/debian/control`
pub fn load_control(dir: &Path) -> Result<SourceStanza, ManifestError> {
    let path = dir.join("debian").join("control");
    parse_control(&read_manifest(&path)?, &path)
}

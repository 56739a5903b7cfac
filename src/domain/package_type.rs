//! Debian package layout types for a Go module

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a Go module is packaged as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageType {
    /// A golang-*-dev library package only
    #[default]
    Library,
    /// A program package only
    Program,
    /// A library package that also ships a program
    LibraryProgram,
    /// A program package that also ships a library
    ProgramLibrary,
}

impl PackageType {
    /// Returns the canonical name
    pub fn name(&self) -> &'static str {
        match self {
            PackageType::Library => "library",
            PackageType::Program => "program",
            PackageType::LibraryProgram => "library+program",
            PackageType::ProgramLibrary => "program+library",
        }
    }

    /// Whether the source package is named after the program
    pub fn is_program_first(&self) -> bool {
        matches!(self, PackageType::Program | PackageType::ProgramLibrary)
    }

    /// Returns all package types
    pub fn all() -> &'static [PackageType] {
        &[
            PackageType::Library,
            PackageType::Program,
            PackageType::LibraryProgram,
            PackageType::ProgramLibrary,
        ]
    }
}

impl FromStr for PackageType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "library" | "lib" | "l" | "dev" => Ok(PackageType::Library),
            "program" | "prog" | "p" => Ok(PackageType::Program),
            "library+program" | "lib+prog" | "l+p" | "both" => Ok(PackageType::LibraryProgram),
            "program+library" | "prog+lib" | "p+l" | "combined" => {
                Ok(PackageType::ProgramLibrary)
            }
            other => Err(ConfigError::InvalidPackageType {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

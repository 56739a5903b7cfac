//! Regular expression search over packaged Go import paths

use crate::archive::PackagedSet;
use crate::error::ConfigError;
use regex::Regex;
use serde::Serialize;

/// A packaged import path matching a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Binary package shipping the import path
    pub binary: String,
    pub import_path: String,
}

/// Find packaged import paths matching `pattern`, sorted by import path
pub fn search(packaged: &PackagedSet, pattern: &str) -> Result<Vec<SearchHit>, ConfigError> {
    let re = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    Ok(packaged
        .import_paths()
        .into_iter()
        .filter(|(path, _)| re.is_match(path))
        .map(|(path, binary)| SearchHit {
            binary: binary.to_string(),
            import_path: path.to_string(),
        })
        .collect())
}

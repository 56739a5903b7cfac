//! debian/control parser
//!
//! Only the source stanza is read. Handles:
//! - continuation lines and `#` comments
//! - comma-separated relations with `|` alternatives
//! - version constraints, architecture and profile qualifiers

use crate::error::ManifestError;
use std::path::Path;

/// Fields of the source stanza, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceStanza {
    fields: Vec<(String, String)>,
}

impl SourceStanza {
    /// Field value by case-insensitive name, continuation lines joined by `\n`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Source package name
    pub fn source(&self) -> Option<&str> {
        self.get("Source")
    }

    /// Every package named in Build-Depends, alternatives included
    pub fn build_depends(&self) -> Vec<String> {
        self.get("Build-Depends")
            .map(parse_relations)
            .unwrap_or_default()
    }
}

/// Parse the source stanza of debian/control `content`
pub fn parse_control(content: &str, path: &Path) -> Result<SourceStanza, ManifestError> {
    let mut stanza = SourceStanza::default();

    for line in content.lines() {
        if line.starts_with('#') {
            continue;
        }
        if line.trim().is_empty() {
            if stanza.fields.is_empty() {
                continue;
            }
            break;
        }

        if line.starts_with(' ') || line.starts_with('\t') {
            let (_, value) = stanza.fields.last_mut().ok_or_else(|| {
                ManifestError::control_parse_error(path, "continuation line before any field")
            })?;
            value.push('\n');
            value.push_str(line.trim());
            continue;
        }

        let (name, value) = line.split_once(':').ok_or_else(|| {
            ManifestError::control_parse_error(path, format!("malformed line {:?}", line))
        })?;
        stanza
            .fields
            .push((name.trim().to_string(), value.trim().to_string()));
    }

    if stanza.source().is_none() {
        return Err(ManifestError::control_parse_error(path, "no source stanza"));
    }

    Ok(stanza)
}

/// Package names of a relationship field such as Build-Depends
pub fn parse_relations(value: &str) -> Vec<String> {
    value
        .split(',')
        .flat_map(|relation| relation.split('|'))
        .filter_map(relation_name)
        .collect()
}

fn relation_name(relation: &str) -> Option<String> {
    let name = relation
        .split(|c: char| c.is_whitespace() || matches!(c, '(' | '[' | '<'))
        .find(|s| !s.is_empty())?;
    let name = name.split(':').next().unwrap_or(name);
    // substitution variables like ${misc:Depends}
    if name.is_empty() || name.starts_with('$') {
        return None;
    }
    Some(name.to_string())
}

//! go.mod parser
//!
//! Handles:
//! - module directive
//! - require statements (single and block)
//! - // indirect markers
//! - replace/exclude/retract directives (skipped)

use crate::error::ManifestError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// Regex for single require: require module/path v1.2.3
static SINGLE_REQUIRE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^require\s+(\S+)\s+(v\S+)\s*(//.*)?$").unwrap());

// Regex for require block entry: module/path v1.2.3
static BLOCK_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+(v\S+)\s*(//.*)?$").unwrap());

static MODULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^module\s+"?([^"\s]+)"?\s*(//.*)?$"#).unwrap());

static INDIRECT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//\s*indirect\b").unwrap());

/// One `require` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub path: String,
    pub version: String,
    /// Marked `// indirect`
    pub indirect: bool,
}

/// The parts of a go.mod file relevant to packaging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoMod {
    /// Module path from the `module` directive
    pub module: Option<String>,
    pub requires: Vec<Requirement>,
}

impl GoMod {
    /// Requirements not marked `// indirect`
    pub fn direct_requires(&self) -> impl Iterator<Item = &Requirement> {
        self.requires.iter().filter(|r| !r.indirect)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Block {
    None,
    Require,
    Other,
}

/// Parse go.mod `content`; `path` is only used in error messages
pub fn parse_go_mod(content: &str, path: &Path) -> Result<GoMod, ManifestError> {
    let mut go_mod = GoMod::default();
    let mut block = Block::None;

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        if block != Block::None {
            if trimmed == ")" {
                block = Block::None;
                continue;
            }
            if block == Block::Require {
                let caps = BLOCK_ENTRY_RE.captures(trimmed).ok_or_else(|| {
                    parse_error(path, idx, format!("malformed require entry {:?}", trimmed))
                })?;
                go_mod.requires.push(requirement(&caps));
            }
            continue;
        }

        if trimmed == "require (" || trimmed == "require(" {
            block = Block::Require;
            continue;
        }

        // replace, exclude, retract, tool, godebug blocks
        if trimmed.ends_with('(') {
            block = Block::Other;
            continue;
        }

        if let Some(caps) = MODULE_RE.captures(trimmed) {
            go_mod.module = Some(caps[1].to_string());
            continue;
        }

        if trimmed.starts_with("require") {
            let caps = SINGLE_REQUIRE_RE.captures(trimmed).ok_or_else(|| {
                parse_error(path, idx, format!("malformed require {:?}", trimmed))
            })?;
            go_mod.requires.push(requirement(&caps));
        }
    }

    if block != Block::None {
        return Err(ManifestError::GoModParseError {
            path: path.to_path_buf(),
            message: "unterminated block".to_string(),
        });
    }

    Ok(go_mod)
}

fn requirement(caps: &regex::Captures) -> Requirement {
    let comment = caps.get(3).map(|m| m.as_str()).unwrap_or("");
    Requirement {
        path: caps[1].to_string(),
        version: caps[2].to_string(),
        indirect: INDIRECT_RE.is_match(comment),
    }
}

fn parse_error(path: &Path, idx: usize, message: String) -> ManifestError {
    ManifestError::GoModParseError {
        path: path.to_path_buf(),
        message: format!("line {}: {}", idx + 1, message),
    }
}

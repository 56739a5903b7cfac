//! Application error types using thiserror
//!
//! Error hierarchy:
//! - VcsError: git invocation failures and unexpected git output
//! - ToolError: go toolchain invocation failures
//! - ArchiveError: Debian archive (ftp-master API) communication
//! - ManifestError: go.mod / debian/control reading and parsing
//! - ConfigError: invalid user input
//! - IoError: File system operation failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Version control related errors
    #[error(transparent)]
    Vcs(#[from] VcsError),

    /// Go toolchain related errors
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Debian archive related errors
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors raised while talking to git
#[derive(Error, Debug)]
pub enum VcsError {
    /// The command could not be spawned or exited non-zero
    #[error("{command} failed in {dir}: {message}")]
    Command {
        command: String,
        dir: PathBuf,
        message: String,
    },

    /// The command succeeded but printed something we cannot interpret
    #[error("unexpected output from {command}: {output:?}")]
    UnexpectedOutput { command: String, output: String },
}

/// Errors raised while running the go toolchain
#[derive(Error, Debug)]
pub enum ToolError {
    /// The command could not be spawned
    #[error("failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command exited non-zero
    #[error("{command} exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The tool work directory could not be prepared
    #[error("failed to prepare {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A blocking tool task could not be joined
    #[error("tool task aborted: {message}")]
    Aborted { message: String },
}

/// Errors related to Debian archive communication
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Network request failed
    #[error("failed to fetch {url}: {message}")]
    NetworkError { url: String, message: String },

    /// Server answered with a non-success status
    #[error("unexpected HTTP status code from {url}: got {status}, want 200")]
    UnexpectedStatus { url: String, status: u16 },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {url}")]
    RateLimitExceeded { url: String },

    /// Invalid response body
    #[error("invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    /// Timeout
    #[error("timeout while fetching {url}")]
    Timeout { url: String },
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// go.mod parsing error
    #[error("failed to parse go.mod in {path}: {message}")]
    GoModParseError { path: PathBuf, message: String },

    /// debian/control parsing error
    #[error("failed to parse debian/control in {path}: {message}")]
    ControlParseError { path: PathBuf, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid package type
    #[error("invalid package type '{value}': expected 'library', 'program', 'library+program' or 'program+library'")]
    InvalidPackageType { value: String },

    /// Hoster without a canonical short name
    #[error("unknown hoster '{host}': pass --allow-unknown-hoster to derive a name anyway")]
    UnknownHoster { host: String },

    /// Invalid search pattern
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },
}

impl VcsError {
    /// Creates a new Command error
    pub fn command(
        command: impl Into<String>,
        dir: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        VcsError::Command {
            command: command.into(),
            dir: dir.into(),
            message: message.into(),
        }
    }

    /// Creates a new UnexpectedOutput error
    pub fn unexpected_output(command: impl Into<String>, output: impl Into<String>) -> Self {
        VcsError::UnexpectedOutput {
            command: command.into(),
            output: output.into(),
        }
    }
}

impl ToolError {
    /// Creates a new Io error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ToolError::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Failed error
    pub fn failed(
        command: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        ToolError::Failed {
            command: command.into(),
            status: status.into(),
            stderr: stderr.into(),
        }
    }
}

impl ArchiveError {
    /// Creates a new NetworkError
    pub fn network_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        ArchiveError::NetworkError {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(url: impl Into<String>, message: impl Into<String>) -> Self {
        ArchiveError::InvalidResponse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(url: impl Into<String>) -> Self {
        ArchiveError::Timeout { url: url.into() }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ControlParseError
    pub fn control_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::ControlParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl IoError {
    /// Creates a new DirectoryNotFound error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        IoError::DirectoryNotFound { path: path.into() }
    }
}

//! CLI argument parsing module for gopkgdeb

use crate::archive::{DEFAULT_TIMEOUT, GO_BINARIES_URL, SOURCES_IN_NEW_URL};
use crate::domain::PackageType;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

/// Parse a timeout given in whole seconds
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number of seconds: {}", s))?;
    if secs == 0 {
        return Err("timeout must be at least one second".to_string());
    }
    Ok(Duration::from_secs(secs))
}

/// Debian packaging helper for Go modules
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gopkgdeb",
    version,
    about = "Debian packaging helper for Go modules"
)]
pub struct CliArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// URL of the Go binary package list
    #[arg(long, global = true, default_value = GO_BINARIES_URL)]
    pub archive_url: String,

    /// URL of the list of sources waiting in NEW
    #[arg(long, global = true, default_value = SOURCES_IN_NEW_URL)]
    pub new_url: String,

    /// HTTP timeout in seconds
    #[arg(long, global = true, value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the Debian upstream version of a git checkout
    Version(VersionArgs),
    /// List the Go modules that still need packaging
    Estimate(EstimateArgs),
    /// Search packaged Go import paths
    Search(SearchArgs),
    /// Compare go.mod requirements with debian/control Build-Depends
    CheckDepends(CheckDependsArgs),
    /// Print the Debian package name for an import path
    Name(NameArgs),
}

#[derive(Args, Debug, Clone)]
pub struct VersionArgs {
    /// Repository directory (default: current directory)
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Tag or commit to describe instead of the latest tag
    #[arg(long)]
    pub git_revision: Option<String>,

    /// Always produce a snapshot version, even on an exact tag
    #[arg(long)]
    pub force_prerelease: bool,

    /// Output the full resolution as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct EstimateArgs {
    /// Go module import path
    pub import_path: String,

    /// Revision to download instead of the latest version
    #[arg(long)]
    pub git_revision: Option<String>,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Regular expression matched against import paths
    pub pattern: String,
}

#[derive(Args, Debug, Clone)]
pub struct CheckDependsArgs {
    /// Source package directory containing go.mod and debian/control
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct NameArgs {
    /// Go import path
    pub import_path: String,

    /// Package type: library, program, library+program, program+library
    #[arg(short = 't', long = "type", default_value = "library")]
    pub package_type: PackageType,

    /// Binary package name for programs
    #[arg(long)]
    pub program_package_name: Option<String>,

    /// Derive a host name for hosters missing from the known table
    #[arg(long)]
    pub allow_unknown_hoster: bool,
}

/// Settings shared by every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub archive_url: String,
    pub new_url: String,
    pub timeout: Duration,
    pub verbose: bool,
    pub quiet: bool,
}

impl Settings {
    /// Log level implied by the verbosity flags
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Whether progress spinners should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl CliArgs {
    /// Collect the global options
    pub fn settings(&self) -> Settings {
        Settings {
            archive_url: self.archive_url.clone(),
            new_url: self.new_url.clone(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            verbose: self.verbose,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_defaults() {
        let args = CliArgs::parse_from(["gopkgdeb", "version"]);
        let Command::Version(version) = args.command else {
            panic!("expected version command");
        };
        assert_eq!(version.dir, PathBuf::from("."));
        assert!(version.git_revision.is_none());
        assert!(!version.force_prerelease);
        assert!(!version.json);
    }

    #[test]
    fn test_version_options() {
        let args = CliArgs::parse_from([
            "gopkgdeb",
            "version",
            "/src/repo",
            "--git-revision",
            "v1.2.0",
            "--force-prerelease",
            "--json",
        ]);
        let Command::Version(version) = args.command else {
            panic!("expected version command");
        };
        assert_eq!(version.dir, PathBuf::from("/src/repo"));
        assert_eq!(version.git_revision.as_deref(), Some("v1.2.0"));
        assert!(version.force_prerelease);
        assert!(version.json);
    }

    #[test]
    fn test_estimate_args() {
        let args = CliArgs::parse_from([
            "gopkgdeb",
            "estimate",
            "github.com/Debian/dh-make-golang",
            "--no-color",
        ]);
        let Command::Estimate(estimate) = args.command else {
            panic!("expected estimate command");
        };
        assert_eq!(estimate.import_path, "github.com/Debian/dh-make-golang");
        assert!(estimate.no_color);
        assert!(!estimate.json);
    }

    #[test]
    fn test_estimate_requires_import_path() {
        assert!(CliArgs::try_parse_from(["gopkgdeb", "estimate"]).is_err());
    }

    #[test]
    fn test_name_type() {
        let args = CliArgs::parse_from([
            "gopkgdeb",
            "name",
            "github.com/foo/bar",
            "--type",
            "program",
        ]);
        let Command::Name(name) = args.command else {
            panic!("expected name command");
        };
        assert_eq!(name.package_type, PackageType::Program);
        assert!(!name.allow_unknown_hoster);
    }

    #[test]
    fn test_name_rejects_unknown_type() {
        assert!(CliArgs::try_parse_from([
            "gopkgdeb",
            "name",
            "github.com/foo/bar",
            "--type",
            "plugin",
        ])
        .is_err());
    }

    #[test]
    fn test_check_depends_default_dir() {
        let args = CliArgs::parse_from(["gopkgdeb", "check-depends"]);
        let Command::CheckDepends(check) = args.command else {
            panic!("expected check-depends command");
        };
        assert_eq!(check.dir, PathBuf::from("."));
    }

    #[test]
    fn test_settings_defaults() {
        let args = CliArgs::parse_from(["gopkgdeb", "search", "cobra"]);
        let settings = args.settings();
        assert_eq!(settings.archive_url, GO_BINARIES_URL);
        assert_eq!(settings.new_url, SOURCES_IN_NEW_URL);
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert_eq!(settings.log_level(), LevelFilter::Info);
        assert!(settings.show_progress());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from([
            "gopkgdeb",
            "search",
            "cobra",
            "--verbose",
            "--timeout",
            "5",
            "--archive-url",
            "http://localhost/bin",
        ]);
        let settings = args.settings();
        assert_eq!(settings.log_level(), LevelFilter::Debug);
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.archive_url, "http://localhost/bin");
    }

    #[test]
    fn test_quiet_disables_progress() {
        let args = CliArgs::parse_from(["gopkgdeb", "-q", "check-depends"]);
        let settings = args.settings();
        assert_eq!(settings.log_level(), LevelFilter::Error);
        assert!(!settings.show_progress());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["gopkgdeb", "-q", "-v", "search", "x"]).is_err());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("10").unwrap(), Duration::from_secs(10));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("ten").is_err());
    }
}

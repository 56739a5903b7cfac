//! gopkgdeb - Debian packaging helper for Go modules
//!
//! Commands:
//! - version: Debian upstream version of a git checkout
//! - estimate: Go modules still missing from Debian
//! - search: packaged import paths matching a pattern
//! - check-depends: go.mod versus debian/control
//! - name: Debian package name for an import path

use clap::Parser;
use gopkgdeb::archive::{FtpMasterArchive, HttpClient, PackageArchive, PackagedSet};
use gopkgdeb::check_depends::check_depends;
use gopkgdeb::cli::{
    CheckDependsArgs, CliArgs, Command, EstimateArgs, NameArgs, SearchArgs, Settings, VersionArgs,
};
use gopkgdeb::error::IoError;
use gopkgdeb::estimator::Estimator;
use gopkgdeb::gotool::GoCli;
use gopkgdeb::importpath::debian_package_name;
use gopkgdeb::output::{create_formatter, OutputConfig};
use gopkgdeb::progress::Progress;
use gopkgdeb::search::search;
use gopkgdeb::vcs::GitCli;
use gopkgdeb::version::{resolve_upstream_version, ResolveOptions};
use log::LevelFilter;
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    let settings = args.settings();
    init_logging(settings.log_level());

    match run(args.command, &settings).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: LevelFilter) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()));

    // Plain messages unless debugging.
    if level <= LevelFilter::Info {
        builder
            .format_timestamp(None)
            .format_level(false)
            .format_target(false);
    }

    builder.init();
}

/// Main application logic
async fn run(command: Command, settings: &Settings) -> anyhow::Result<ExitCode> {
    log::debug!("gopkgdeb v{}", env!("CARGO_PKG_VERSION"));

    match command {
        Command::Version(args) => run_version(args),
        Command::Estimate(args) => run_estimate(args, settings).await,
        Command::Search(args) => run_search(args, settings).await,
        Command::CheckDepends(args) => run_check_depends(args, settings).await,
        Command::Name(args) => run_name(args),
    }
}

fn run_version(args: VersionArgs) -> anyhow::Result<ExitCode> {
    if !args.dir.is_dir() {
        return Err(IoError::directory_not_found(&args.dir).into());
    }

    let vcs = GitCli::new(&args.dir);
    let mut options = ResolveOptions::new().with_force_prerelease(args.force_prerelease);
    if let Some(rev) = &args.git_revision {
        options = options.with_preferred_revision(rev.as_str());
    }

    let resolution = resolve_upstream_version(&vcs, &options)?;

    let formatter = create_formatter(OutputConfig::from_cli(args.json, true));
    let mut stdout = io::stdout().lock();
    formatter.format_resolution(&resolution, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}

async fn run_estimate(args: EstimateArgs, settings: &Settings) -> anyhow::Result<ExitCode> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let estimator = Estimator::new(archive(settings)?, GoCli::new()?);
    let report = estimator
        .run_with_progress(
            &args.import_path,
            args.git_revision.as_deref(),
            settings.show_progress(),
        )
        .await?;

    if report.is_fully_packaged() {
        log::info!("{} is already fully packaged in Debian", report.module);
    } else {
        log::info!(
            "Bringing {} to Debian requires packaging the following Go modules:",
            report.module
        );
    }

    let formatter = create_formatter(OutputConfig::from_cli(args.json, args.no_color));
    let mut stdout = io::stdout().lock();
    formatter.format_estimate(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}

async fn run_search(args: SearchArgs, settings: &Settings) -> anyhow::Result<ExitCode> {
    let packaged = fetch_packaged(settings).await?;
    let hits = search(&packaged, &args.pattern)?;
    log::debug!("{} of {} import paths match", hits.len(), packaged.len());

    let formatter = create_formatter(OutputConfig::default());
    let mut stdout = io::stdout().lock();
    formatter.format_search(&hits, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}

async fn run_check_depends(
    args: CheckDependsArgs,
    settings: &Settings,
) -> anyhow::Result<ExitCode> {
    if !args.dir.is_dir() {
        return Err(IoError::directory_not_found(&args.dir).into());
    }

    let packaged = fetch_packaged(settings).await?;
    let changes = check_depends(&args.dir, &packaged)?;

    let formatter = create_formatter(OutputConfig::from_cli(args.json, true));
    let mut stdout = io::stdout().lock();
    formatter.format_changes(&changes, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}

fn run_name(args: NameArgs) -> anyhow::Result<ExitCode> {
    let name = debian_package_name(
        &args.import_path,
        args.package_type,
        args.program_package_name.as_deref(),
        args.allow_unknown_hoster,
    )?;
    println!("{}", name);
    Ok(ExitCode::SUCCESS)
}

fn archive(settings: &Settings) -> anyhow::Result<FtpMasterArchive> {
    let client = HttpClient::with_timeout(settings.timeout)?;
    Ok(FtpMasterArchive::new(client).with_urls(&settings.archive_url, &settings.new_url))
}

async fn fetch_packaged(settings: &Settings) -> anyhow::Result<PackagedSet> {
    let archive = archive(settings)?;
    let mut progress = Progress::new(settings.show_progress());
    progress.spinner("Querying the Debian archive...");
    let packaged = archive.fetch_packaged().await;
    progress.finish_and_clear();
    Ok(packaged?)
}

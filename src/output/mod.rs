//! Output formatting for command results
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::check_depends::DependencyChange;
use crate::domain::UpstreamResolution;
use crate::estimator::EstimateReport;
use crate::search::SearchHit;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, no_color: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Self {
            format,
            color: !no_color,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Write a resolved upstream version
    fn format_resolution(
        &self,
        resolution: &UpstreamResolution,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// Write the modules still to be packaged
    fn format_estimate(&self, report: &EstimateReport, writer: &mut dyn Write)
        -> std::io::Result<()>;

    /// Write search hits
    fn format_search(&self, hits: &[SearchHit], writer: &mut dyn Write) -> std::io::Result<()>;

    /// Write go.mod / debian/control differences
    fn format_changes(
        &self,
        changes: &[DependencyChange],
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}

//! Text output formatter for human-readable display
//!
//! This module provides:
//! - The indented estimate report, dimming repeats and repository suffixes
//! - Sources waiting in NEW highlighted in cyan
//! - Plain line output for versions, search hits and dependency changes

use crate::check_depends::DependencyChange;
use crate::domain::UpstreamResolution;
use crate::estimator::EstimateReport;
use crate::graph::{LineKind, ReportLine};
use crate::output::OutputFormatter;
use crate::search::SearchHit;
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self { color: true }
    }

    /// Create a new text formatter with color option
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    fn dim(&self, s: &str) -> String {
        if self.color {
            s.dimmed().to_string()
        } else {
            s.to_string()
        }
    }

    /// Render one report line without trailing newline
    pub fn format_line(&self, line: &ReportLine) -> String {
        let pad = "  ".repeat(line.indent);
        let module = line.module.as_str();

        match &line.kind {
            LineKind::Needed {
                repo_root,
                root_repeat,
            } => {
                if *root_repeat {
                    return format!("{}{}", pad, self.dim(module));
                }
                match repo_root {
                    Some(root) => {
                        let suffix = &module[root.len()..];
                        format!("{}{}{}", pad, root, self.dim(suffix))
                    }
                    None => format!("{}{}", pad, module),
                }
            }
            LineKind::Repeat { count } => {
                format!("{}{}", pad, self.dim(&format!("{} ({})", module, count)))
            }
            LineKind::InNew { source, version } => {
                let text = format!("{} (in NEW as {} {})", module, source, version);
                if self.color {
                    format!("{}{}", pad, text.cyan())
                } else {
                    format!("{}{}", pad, text)
                }
            }
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TextFormatter {
    fn format_resolution(
        &self,
        resolution: &UpstreamResolution,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "{}", resolution.version)
    }

    fn format_estimate(
        &self,
        report: &EstimateReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        for line in &report.lines {
            writeln!(writer, "{}", self.format_line(line))?;
        }
        Ok(())
    }

    fn format_search(&self, hits: &[SearchHit], writer: &mut dyn Write) -> std::io::Result<()> {
        for hit in hits {
            writeln!(writer, "{}: {}", hit.binary, hit.import_path)?;
        }
        Ok(())
    }

    fn format_changes(
        &self,
        changes: &[DependencyChange],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if changes.is_empty() {
            return writeln!(writer, "go.mod and d/control are in sync");
        }

        for change in changes {
            match change {
                DependencyChange::New {
                    import_path,
                    package: Some(package),
                } => writeln!(writer, "NEW dependency {} ({})", import_path, package)?,
                DependencyChange::New {
                    import_path,
                    package: None,
                } => writeln!(
                    writer,
                    "NEW dependency {} is NOT yet packaged in Debian",
                    import_path
                )?,
                DependencyChange::Removed { package } => {
                    writeln!(writer, "RM dependency {}", package)?
                }
            }
        }
        Ok(())
    }
}

//! JSON output formatter for machine processing

use crate::check_depends::DependencyChange;
use crate::domain::UpstreamResolution;
use crate::estimator::EstimateReport;
use crate::output::OutputFormatter;
use crate::search::SearchHit;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }

    fn write<T: Serialize + ?Sized>(&self, value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, value)?;
        writeln!(writer)
    }
}

/// JSON representation of a dependency sync check
#[derive(Serialize)]
struct JsonChanges<'a> {
    in_sync: bool,
    changes: &'a [DependencyChange],
}

impl OutputFormatter for JsonFormatter {
    fn format_resolution(
        &self,
        resolution: &UpstreamResolution,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        self.write(resolution, writer)
    }

    fn format_estimate(
        &self,
        report: &EstimateReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        self.write(report, writer)
    }

    fn format_search(&self, hits: &[SearchHit], writer: &mut dyn Write) -> std::io::Result<()> {
        self.write(hits, writer)
    }

    fn format_changes(
        &self,
        changes: &[DependencyChange],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        self.write(
            &JsonChanges {
                in_sync: changes.is_empty(),
                changes,
            },
            writer,
        )
    }
}

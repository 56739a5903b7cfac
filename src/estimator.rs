//! Estimate workflow for bringing a Go module into Debian
//!
//! This module provides:
//! - Workflow coordination: download + fetch packaged set → graph → walk
//! - Overlap of the module download with the archive queries

use crate::archive::PackageArchive;
use crate::domain::parse_edges;
use crate::error::{AppError, ToolError};
use crate::gotool::GoToolchain;
use crate::graph::{walk, DependencyGraph, ReportLine};
use crate::progress::Progress;
use serde::Serialize;
use std::sync::Arc;

/// Modules that must be packaged before `module` can enter Debian
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimateReport {
    /// The estimated module
    pub module: String,
    /// Report lines in walk order
    pub lines: Vec<ReportLine>,
}

impl EstimateReport {
    /// Whether every dependency is already packaged
    pub fn is_fully_packaged(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Estimator for coordinating the estimate workflow
pub struct Estimator<A, G> {
    archive: Arc<A>,
    toolchain: Arc<G>,
}

impl<A, G> Estimator<A, G>
where
    A: PackageArchive + 'static,
    G: GoToolchain + 'static,
{
    /// Create a new estimator
    pub fn new(archive: A, toolchain: G) -> Self {
        Self {
            archive: Arc::new(archive),
            toolchain: Arc::new(toolchain),
        }
    }

    /// Run the estimate workflow without progress display
    pub async fn run(
        &self,
        import_path: &str,
        revision: Option<&str>,
    ) -> Result<EstimateReport, AppError> {
        self.run_with_progress(import_path, revision, false).await
    }

    /// Run the estimate workflow with optional progress display
    pub async fn run_with_progress(
        &self,
        import_path: &str,
        revision: Option<&str>,
        show_progress: bool,
    ) -> Result<EstimateReport, AppError> {
        let mut progress = Progress::new(show_progress);

        // Step 1: download the module while fetching the packaged set
        progress.spinner(&format!("Downloading {} and querying the archive...", import_path));
        let toolchain = Arc::clone(&self.toolchain);
        let module = import_path.to_string();
        let rev = revision.map(String::from);
        let download =
            tokio::task::spawn_blocking(move || toolchain.download(&module, rev.as_deref()));

        let (downloaded, packaged) = tokio::join!(download, self.archive.fetch_packaged());
        progress.finish_and_clear();

        downloaded.map_err(aborted)??;
        let packaged = packaged?;

        // Step 2: module graph and direct requirements
        progress.spinner("Reading module graph...");
        let toolchain = Arc::clone(&self.toolchain);
        let module = import_path.to_string();
        let (graph_text, direct_deps) = tokio::task::spawn_blocking(move || {
            let graph = toolchain.mod_graph()?;
            let direct = toolchain.direct_dependencies(&module)?;
            Ok::<_, ToolError>((graph, direct))
        })
        .await
        .map_err(aborted)??;
        progress.finish_and_clear();

        // Step 3: build and walk
        let edges = parse_edges(&graph_text);
        let graph = DependencyGraph::from_mod_graph(import_path, &edges, Some(&direct_deps));
        log::debug!(
            "{} edges, {} modules in the graph of {}",
            edges.len(),
            graph.len(),
            import_path
        );

        Ok(EstimateReport {
            module: import_path.to_string(),
            lines: walk(&graph, &packaged),
        })
    }
}

fn aborted(err: tokio::task::JoinError) -> ToolError {
    ToolError::Aborted {
        message: err.to_string(),
    }
}

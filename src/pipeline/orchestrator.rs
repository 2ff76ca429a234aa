// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release orchestration across flavors.
//!
//! ```text
//! resolve_version (once, override written back)
//!        |
//!        v
//! for flavor in selector (registry order):
//!     previous flavor incompatible? --> delete android/
//!     FlavorPipeline::run  --err--> stop, exit 1
//!        |
//!        v
//! export  version=X.Y.Z  --> stdout, CI output file (append)
//! summary (one line per flavor)
//! ```

use std::path::Path;

use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use super::flavor::FlavorSpec;
use super::{FlavorPipeline, FlavorReport};
use crate::config::run::RunConfig;
use crate::error::{FsError, Result};
use crate::tools::Toolchain;
use crate::version::{Version, resolve_version};

/// Result of a full release run.
#[derive(Debug, Clone)]
pub struct ReleaseSummary {
    pub version: Version,
    pub flavors: Vec<FlavorReport>,
}

impl ReleaseSummary {
    #[must_use]
    pub fn artifact_count(&self) -> usize {
        self.flavors.iter().map(|f| f.artifacts().len()).sum()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.flavors.iter().map(FlavorReport::warning_count).sum()
    }
}

/// Runs the selected flavors for one release.
pub struct ReleaseOrchestrator<'a> {
    run: &'a RunConfig,
    toolchain: &'a dyn Toolchain,
}

impl<'a> ReleaseOrchestrator<'a> {
    #[must_use]
    pub fn new(run: &'a RunConfig, toolchain: &'a dyn Toolchain) -> Self {
        Self { run, toolchain }
    }

    /// Resolves the version, builds every selected flavor and exports the
    /// version.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: version resolution, a failed flavor
    /// stage, the native tree reset, or the version export.
    pub async fn run(&self) -> Result<ReleaseSummary> {
        let config = self.run.config();
        let dry_run = self.run.is_dry_run();

        let version = resolve_version(
            config.paths.package_json()?,
            self.run.version_override(),
            dry_run,
        )
        .await?;
        info!(
            version = %version,
            build_code = version.build_code(),
            selector = %self.run.selector(),
            "Starting release"
        );

        let mut reports: Vec<FlavorReport> = Vec::new();
        let mut previous: Option<FlavorSpec> = None;

        for flavor in self.run.selector().flavors() {
            if let Some(prev) = previous
                && !prev.compatible_with(&flavor)
            {
                reset_native_tree(config.paths.android()?, dry_run).await?;
            }

            let report = FlavorPipeline::new(self.run, flavor, version, self.toolchain)
                .run()
                .await?;
            reports.push(report);
            previous = Some(flavor);
        }

        export_version(&version, self.run.ci_output(), dry_run).await?;

        let summary = ReleaseSummary {
            version,
            flavors: reports,
        };
        log_summary(&summary);
        Ok(summary)
    }
}

/// Deletes the generated native project so the next flavor starts clean.
///
/// # Errors
///
/// Returns an error if an existing directory cannot be removed.
pub async fn reset_native_tree(android: &Path, dry_run: bool) -> Result<()> {
    if !android.exists() {
        return Ok(());
    }
    if dry_run {
        info!(path = %android.display(), "[dry-run] Would delete native project");
        return Ok(());
    }
    tokio::fs::remove_dir_all(android)
        .await
        .map_err(|source| FsError::IoError {
            path: android.display().to_string(),
            source,
        })?;
    info!(path = %android.display(), "Deleted native project for incompatible flavor");
    Ok(())
}

/// Prints `version=X.Y.Z` and appends it to the CI output file, if any.
///
/// # Errors
///
/// Returns an error if the CI output file cannot be opened or written.
pub async fn export_version(version: &Version, ci_output: Option<&Path>, dry_run: bool) -> Result<()> {
    let line = format!("version={version}");
    println!("{line}");
    info!(version = %version, "Exported version");

    let Some(path) = ci_output else {
        return Ok(());
    };
    if dry_run {
        info!(path = %path.display(), "[dry-run] Would append {line}");
        return Ok(());
    }

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("failed to open CI output {}", path.display()))?;
    file.write_all(format!("{line}\n").as_bytes())
        .await
        .with_context(|| format!("failed to write CI output {}", path.display()))?;
    file.flush().await?;
    Ok(())
}

fn log_summary(summary: &ReleaseSummary) {
    for report in &summary.flavors {
        let names = report
            .artifacts()
            .iter()
            .filter_map(|a| a.dest.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        if names.is_empty() {
            warn!(
                flavor = report.flavor().name,
                warnings = report.warning_count(),
                "No artifacts collected"
            );
        } else {
            info!(
                flavor = report.flavor().name,
                warnings = report.warning_count(),
                "Artifacts: {}",
                names.join(", ")
            );
        }
    }
    info!(
        version = %summary.version,
        artifacts = summary.artifact_count(),
        warnings = summary.warning_count(),
        "Release complete"
    );
}

// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Patch command: re-applies the patchers to an existing native project.
//!
//! ```text
//! patch --flavor F    gradle files + staging + AndroidManifest.xml
//! patch --manifest-only              AndroidManifest.xml
//! ```
//!
//! Neither prebuild nor Gradle is run. Patches are idempotent, so running the
//! command twice leaves the tree unchanged.

use tracing::{info, warn};

use crate::cli::release::PatchArgs;
use crate::config::Config;
use crate::error::Result;
use crate::patch::FilePatchReport;
use crate::patch::gradle::BuildConfigPatcher;
use crate::patch::manifest::ManifestPatcher;

/// Main handler for the patch command.
///
/// # Errors
///
/// Returns an error if the native project cannot be read or written.
/// Missing files and anchors are reported as warnings.
pub async fn run_patch_command(args: &PatchArgs, config: &Config, dry_run: bool) -> Result<()> {
    let mut reports = Vec::new();
    let mut warnings = 0;

    if !args.manifest_only {
        let credentials = args.signing.credentials(&config.signing);
        let build = BuildConfigPatcher::new(config, &credentials)?
            .run(config, &args.flavor, dry_run)
            .await?;
        warnings += build.warning_count();
        reports.extend(build.files);
    }

    let manifest = ManifestPatcher::new(&config.manifest)?
        .run(&config.paths.manifest()?, dry_run)
        .await?;
    warnings += manifest.warning_count();
    reports.push(manifest);

    for line in reports.iter().flat_map(format_report) {
        println!("{line}");
    }

    if warnings == 0 {
        info!(flavor = args.flavor.name, "Patching complete");
    } else {
        warn!(flavor = args.flavor.name, warnings, "Patching complete with warnings");
    }
    Ok(())
}

/// `<file>: <patch> <outcome>` lines for one file.
#[must_use]
pub fn format_report(report: &FilePatchReport) -> Vec<String> {
    report
        .outcomes()
        .iter()
        .map(|(name, outcome)| format!("{}: {name} {outcome}", report.path().display()))
        .collect()
}

// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release command: folds CLI/env inputs into a [`RunConfig`] and runs the
//! orchestrator.

use std::sync::Arc;

use crate::cli::release::ReleaseArgs;
use crate::config::Config;
use crate::config::run::RunConfig;
use crate::error::Result;
use crate::pipeline::orchestrator::{ReleaseOrchestrator, ReleaseSummary};
use crate::tools::{NativeToolchain, Toolchain};

/// Resolves the per-run settings.
///
/// A blank version override counts as none.
#[must_use]
pub fn build_run_config(args: &ReleaseArgs, config: Arc<Config>, dry_run: bool) -> RunConfig {
    let credentials = args.signing.credentials(&config.signing);
    let version_override = args
        .version_override
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    RunConfig::builder()
        .with_config(config)
        .with_selector(args.flavor)
        .maybe_with_version_override(version_override)
        .with_credentials(credentials)
        .maybe_with_ci_output(args.ci_output.clone())
        .with_dry_run(dry_run)
        .build()
}

/// Main handler for the release command.
///
/// # Errors
///
/// Returns the first fatal error of the run; see
/// [`ReleaseOrchestrator::run`].
pub async fn run_release_command(args: &ReleaseArgs, config: Config, dry_run: bool) -> Result<()> {
    run_release_with(args, config, dry_run, &NativeToolchain).await?;
    Ok(())
}

/// Runs a release with the given toolchain.
///
/// # Errors
///
/// Returns the first fatal error of the run.
pub async fn run_release_with(
    args: &ReleaseArgs,
    config: Config,
    dry_run: bool,
    toolchain: &dyn Toolchain,
) -> Result<ReleaseSummary> {
    let run = build_run_config(args, Arc::new(config), dry_run);
    ReleaseOrchestrator::new(&run, toolchain).run().await
}

// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-flavor build pipeline.
//!
//! ```text
//! FlavorPipeline::run
//!   Configure   app.json: version, versionCode, extra.flavor
//!   Regenerate  Toolchain::regenerate   (APP_VARIANT=<marker>)
//!   Patch       BuildConfigPatcher, ManifestPatcher
//!   Compile     Toolchain::compile
//!   Collect     move + rename artifacts into the release dir
//!
//! any stage error --> StageState::Failed(stage)
//!                 --> PipelineError::StageFailed { flavor, stage }
//! ```
//!
//! Missing anchors and files, and every collection problem, are warnings
//! recorded in the [`FlavorReport`]; only real failures stop the run.

pub mod collect;
pub mod flavor;
pub mod orchestrator;
pub mod stage;

use tracing::{Instrument, error, info, info_span};

use crate::config::run::RunConfig;
use crate::error::{PipelineError, Result};
use crate::patch::FilePatchReport;
use crate::patch::gradle::{BuildConfigPatcher, BuildPatchReport};
use crate::patch::manifest::ManifestPatcher;
use crate::project::AppConfig;
use crate::tools::{ToolContext, Toolchain};
use crate::version::Version;
use collect::{Artifact, ArtifactNaming, Collection, collect_artifacts};
use flavor::FlavorSpec;
use stage::{Stage, StageState};

/// Outcome of one flavor build.
#[derive(Debug, Clone)]
pub struct FlavorReport {
    flavor: FlavorSpec,
    state: StageState,
    build_patches: BuildPatchReport,
    manifest: Option<FilePatchReport>,
    collection: Collection,
}

impl FlavorReport {
    const fn new(flavor: FlavorSpec) -> Self {
        Self {
            flavor,
            state: StageState::Pending,
            build_patches: BuildPatchReport {
                files: Vec::new(),
                keystore_staged: None,
                services_staged: None,
                signing_skipped: false,
            },
            manifest: None,
            collection: Collection {
                artifacts: Vec::new(),
                warnings: 0,
            },
        }
    }

    #[must_use]
    pub const fn flavor(&self) -> &FlavorSpec {
        &self.flavor
    }

    #[must_use]
    pub const fn state(&self) -> StageState {
        self.state
    }

    #[must_use]
    pub const fn build_patches(&self) -> &BuildPatchReport {
        &self.build_patches
    }

    #[must_use]
    pub const fn manifest(&self) -> Option<&FilePatchReport> {
        self.manifest.as_ref()
    }

    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        &self.collection.artifacts
    }

    /// Collection problems: nothing matched, name clashes, failed moves.
    #[must_use]
    pub const fn collection_warnings(&self) -> usize {
        self.collection.warnings
    }

    /// Patch, staging and collection warnings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        let manifest = self
            .manifest
            .as_ref()
            .map_or(0, FilePatchReport::warning_count);
        self.build_patches.warning_count() + manifest + self.collection.warnings
    }
}

/// Builds a single flavor from configuration to collected artifacts.
pub struct FlavorPipeline<'a> {
    run: &'a RunConfig,
    flavor: FlavorSpec,
    version: Version,
    toolchain: &'a dyn Toolchain,
}

impl<'a> FlavorPipeline<'a> {
    #[must_use]
    pub fn new(
        run: &'a RunConfig,
        flavor: FlavorSpec,
        version: Version,
        toolchain: &'a dyn Toolchain,
    ) -> Self {
        Self {
            run,
            flavor,
            version,
            toolchain,
        }
    }

    /// Runs every stage in order.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::StageFailed` naming the flavor and the stage
    /// that failed; the underlying cause is kept in the message.
    pub async fn run(&self) -> Result<FlavorReport> {
        let mut report = FlavorReport::new(self.flavor);
        let span = info_span!("flavor", flavor = self.flavor.name);

        async {
            info!(version = %self.version, "Building {} flavor", self.flavor.display);

            let mut next = Some(Stage::Configure);
            while let Some(stage) = next {
                report.state = StageState::Running(stage);
                let result = self
                    .run_stage(stage, &mut report)
                    .instrument(info_span!("stage", stage = stage.name()))
                    .await;

                if let Err(err) = result {
                    report.state = StageState::Failed(stage);
                    error!(stage = stage.name(), "Flavor build failed: {err:#}");
                    return Err(PipelineError::StageFailed {
                        flavor: self.flavor.name.to_string(),
                        stage: stage.name().to_string(),
                        message: format!("{err:#}"),
                    }
                    .into());
                }
                next = stage.next();
            }

            report.state = StageState::Success;
            Ok(report)
        }
        .instrument(span)
        .await
    }

    async fn run_stage(&self, stage: Stage, report: &mut FlavorReport) -> Result<()> {
        let config = self.run.config();
        let dry_run = self.run.is_dry_run();
        let ctx = ToolContext::new(config.clone(), dry_run);

        match stage {
            Stage::Configure => self.configure().await,
            Stage::Regenerate => self.toolchain.regenerate(&ctx, &self.flavor).await,
            Stage::Patch => {
                let build = BuildConfigPatcher::new(config, self.run.credentials())?;
                report.build_patches = build.run(config, &self.flavor, dry_run).await?;

                let manifest = ManifestPatcher::new(&config.manifest)?;
                report.manifest = Some(manifest.run(&config.paths.manifest()?, dry_run).await?);
                Ok(())
            }
            Stage::Compile => self.toolchain.compile(&ctx, &self.flavor).await,
            Stage::Collect => {
                let naming = ArtifactNaming {
                    product: &config.project.product,
                    version: &self.version,
                    flavor: &self.flavor,
                };
                report.collection = collect_artifacts(
                    &config.paths.compiled_artifacts()?,
                    config.paths.release()?,
                    &config.artifacts.patterns,
                    naming,
                    dry_run,
                )
                .await?;
                Ok(())
            }
        }
    }

    async fn configure(&self) -> Result<()> {
        let path = self.run.config().paths.app_config()?;
        let mut app = AppConfig::load(path).await?;
        app.configure(&self.version, self.flavor.marker)?;

        if self.run.is_dry_run() {
            info!(path = %path.display(), "[dry-run] Would write app config");
            return Ok(());
        }
        app.save(path).await?;
        info!(
            version = %self.version,
            build_code = self.version.build_code(),
            marker = self.flavor.marker,
            "Configured app"
        );
        Ok(())
    }
}

// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! External tools driven by the pipeline.
//!
//! ```text
//! FlavorPipeline --> Toolchain --> Tool --> ProcessBuilder
//!                      |
//!          NativeToolchain
//!            regenerate: PrebuildTool  npx expo prebuild (APP_VARIANT)
//!            compile:    GradleTool    ./gradlew assembleRelease
//! ```
//!
//! Tools respect `ToolContext::is_dry_run` and only log what they would run.

use std::path::Path;
use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::config::Config;
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;
use crate::pipeline::flavor::FlavorSpec;

pub mod gradle;
pub mod prebuild;

use gradle::GradleTool;
use prebuild::PrebuildTool;

/// Context provided to tools during execution.
#[derive(Clone)]
pub struct ToolContext {
    /// When true, tools log what they would do without spawning anything.
    dry_run: bool,
    config: Arc<Config>,
}

impl ToolContext {
    #[must_use]
    pub const fn new(config: Arc<Config>, dry_run: bool) -> Self {
        Self { dry_run, config }
    }

    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

/// A single external operation.
pub trait Tool: Send + Sync {
    /// Returns the name of this tool (e.g., "prebuild", "gradle").
    fn name(&self) -> &str;

    /// Executes the tool's operation.
    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>>;
}

/// The two native build steps of a flavor.
///
/// Swapped out in tests for a fake that writes a canned native tree.
pub trait Toolchain: Send + Sync {
    /// Generates the native Android project for `flavor`.
    fn regenerate<'a>(
        &'a self,
        ctx: &'a ToolContext,
        flavor: &'a FlavorSpec,
    ) -> BoxFuture<'a, Result<()>>;

    /// Compiles release artifacts from the generated project.
    fn compile<'a>(
        &'a self,
        ctx: &'a ToolContext,
        flavor: &'a FlavorSpec,
    ) -> BoxFuture<'a, Result<()>>;
}

/// Runs the real Expo and Gradle tooling.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeToolchain;

impl Toolchain for NativeToolchain {
    fn regenerate<'a>(
        &'a self,
        ctx: &'a ToolContext,
        flavor: &'a FlavorSpec,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { PrebuildTool::new().variant(flavor.marker).run(ctx).await })
    }

    fn compile<'a>(
        &'a self,
        ctx: &'a ToolContext,
        _flavor: &'a FlavorSpec,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { GradleTool::new().run(ctx).await })
    }
}

/// Builder for a configured program.
///
/// Bare names go through the cached PATH lookup; anything with a directory
/// component is used as given.
pub(crate) fn program_builder(program: &Path) -> Result<ProcessBuilder> {
    if program.components().count() == 1 && !program.is_absolute() {
        let name = program.to_string_lossy();
        Ok(ProcessBuilder::which(&name)?)
    } else {
        Ok(ProcessBuilder::new(program))
    }
}

#[cfg(test)]
pub(crate) mod test_utils;

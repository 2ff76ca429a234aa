// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Gradle wrapper: compiles release artifacts.

use anyhow::Context;
use tracing::info;

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;

/// Runs the project's Gradle wrapper with `tools.gradle_task` inside the
/// native directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradleTool;

impl GradleTool {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn do_compile(&self, ctx: &ToolContext) -> Result<()> {
        let config = ctx.config();
        let android = config.paths.android()?;
        let wrapper = android.join(&config.tools.gradlew);
        let task = &config.tools.gradle_task;

        if ctx.is_dry_run() {
            info!(
                cwd = %android.display(),
                "[dry-run] Would run {} {task}",
                wrapper.display()
            );
            return Ok(());
        }

        info!(task = %task, "Compiling release artifacts");
        ProcessBuilder::new(&wrapper)
            .arg(task)
            .cwd(android)
            .name(self.name())
            .keep_stderr()
            .run()
            .await
            .with_context(|| format!("Failed to run {}", wrapper.display()))?;
        Ok(())
    }
}

impl Tool for GradleTool {
    fn name(&self) -> &'static str {
        "gradle"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_compile(ctx))
    }
}

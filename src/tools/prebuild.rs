// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Expo prebuild: regenerates the native Android project.

use anyhow::Context;
use tracing::info;

use super::{BoxFuture, Tool, ToolContext, program_builder};
use crate::error::Result;

/// Environment variable selecting the app variant during prebuild.
pub const VARIANT_ENV: &str = "APP_VARIANT";

/// Arguments after `npx`.
pub const PREBUILD_ARGS: [&str; 5] = ["expo", "prebuild", "--platform", "android", "--no-install"];

/// `npx expo prebuild --platform android --no-install`, run in the project root.
#[derive(Debug, Clone, Default)]
pub struct PrebuildTool {
    variant: Option<String>,
}

impl PrebuildTool {
    #[must_use]
    pub const fn new() -> Self {
        Self { variant: None }
    }

    /// Value exported as `APP_VARIANT`.
    #[must_use]
    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    async fn do_prebuild(&self, ctx: &ToolContext) -> Result<()> {
        let config = ctx.config();
        let root = config.root()?;

        if ctx.is_dry_run() {
            info!(
                root = %root.display(),
                variant = self.variant.as_deref().unwrap_or_default(),
                "[dry-run] Would run {} {}",
                config.tools.npx.display(),
                PREBUILD_ARGS.join(" ")
            );
            return Ok(());
        }

        let mut builder = program_builder(&config.tools.npx)?
            .args(PREBUILD_ARGS)
            .cwd(root)
            .name(self.name())
            .keep_stderr();
        if let Some(variant) = &self.variant {
            builder = builder.env(VARIANT_ENV, variant);
        }

        info!(variant = self.variant.as_deref().unwrap_or_default(), "Regenerating native project");
        builder
            .run()
            .await
            .context("Failed to run expo prebuild")?;
        Ok(())
    }
}

impl Tool for PrebuildTool {
    fn name(&self) -> &'static str {
        "prebuild"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_prebuild(ctx))
    }
}

// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for flavorbuild.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. flavorbuild.toml (cwd, optional)
//! 3. --ini FILE (repeatable)
//! 4. FLAVORBUILD_* env vars
//! 5. --set section.key=value
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! FLAVORBUILD_PROJECT__ROOT=/src/app       → project.root = "/src/app"
//! FLAVORBUILD_SIGNING__KEY_ALIAS=upload    → signing.key_alias = "upload"
//! FLAVORBUILD_GLOBAL__OUTPUT_LOG_LEVEL=4   → global.output_log_level = 4
//! ```
//!
//! Release inputs that CI passes per run (`KEYSTORE_PASSWORD`, `KEY_ALIAS`,
//! `BUILD_FLAVOR`, `VERSION_OVERRIDE`, `GITHUB_OUTPUT`) are read by the CLI
//! layer and folded into a [`run::RunConfig`] together with this file.

pub mod loader;
pub mod paths;
pub mod run;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{
    ArtifactsConfig, GlobalConfig, ManifestConfig, ProjectConfig, SdkConfig, SigningConfig,
    ToolsConfig,
};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Project identity.
    pub project: ProjectConfig,
    /// Paths configuration.
    pub paths: PathsConfig,
    /// Release signing.
    pub signing: SigningConfig,
    /// Health Connect manifest names.
    pub manifest: ManifestConfig,
    /// Google services SDK integration.
    pub sdk: SdkConfig,
    /// Tool paths.
    pub tools: ToolsConfig,
    /// Artifact selection.
    pub artifacts: ArtifactsConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use flavorbuild::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("flavorbuild.toml")
    ///     .with_env_prefix("FLAVORBUILD")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Default configuration rooted at `root`, with every path resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if validation of the defaults fails.
    pub fn for_root(root: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::default();
        config.project.root = Some(root.as_ref().to_path_buf());
        config.resolve_and_validate()?;
        Ok(config)
    }

    /// The resolved project root.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if the configuration was never
    /// resolved.
    pub fn root(&self) -> Result<&Path> {
        self.project.root.as_deref().ok_or_else(|| {
            ConfigError::MissingKey {
                section: "project".to_string(),
                key: "root".to_string(),
            }
            .into()
        })
    }

    /// Resolve all paths and validate configuration.
    ///
    /// A missing `project.root` falls back to the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be read, or if a value
    /// is invalid (empty product name, malformed artifact glob).
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        let root = match self.project.root.take() {
            Some(root) if root.is_absolute() => root,
            other => {
                let cwd = std::env::current_dir().context("failed to read current directory")?;
                other.map_or_else(|| cwd.clone(), |relative| cwd.join(relative))
            }
        };
        self.paths.resolve(&root);
        self.project.root = Some(root);

        if self.project.product.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "project".to_string(),
                key: "product".to_string(),
                message: "product name must not be empty".to_string(),
            }
            .into());
        }

        for pattern in &self.artifacts.patterns {
            if let Err(e) = wax::Glob::new(pattern) {
                return Err(ConfigError::InvalidValue {
                    section: "artifacts".to_string(),
                    key: "patterns".to_string(),
                    message: format!("invalid glob '{pattern}': {e}"),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Sensitive fields (the store password) are hidden with a `[hidden]`
    /// marker. Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_project_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_signing_options(&mut options);
        self.format_manifest_options(&mut options);
        self.format_sdk_options(&mut options);
        self.format_tools_options(&mut options);
        self.format_artifacts_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".into(), fmt_path(self.global.log_file.as_deref()));
        options.insert("global.json_log".into(), self.global.json_log.to_string());
    }

    fn format_project_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("project.root".into(), fmt_path(self.project.root.as_deref()));
        options.insert("project.product".into(), self.project.product.clone());
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("paths.app_config".into(), fmt_path(self.paths.app_config.as_deref()));
        options.insert(
            "paths.package_json".into(),
            fmt_path(self.paths.package_json.as_deref()),
        );
        options.insert("paths.android".into(), fmt_path(self.paths.android.as_deref()));
        options.insert("paths.release".into(), fmt_path(self.paths.release.as_deref()));
        options.insert("paths.keystore".into(), fmt_path(self.paths.keystore.as_deref()));
        options.insert(
            "paths.services_json".into(),
            fmt_path(self.paths.services_json.as_deref()),
        );
    }

    fn format_signing_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "signing.keystore_name".into(),
            self.signing.keystore_name.clone(),
        );
        options.insert("signing.key_alias".into(), self.signing.key_alias.clone());
        if !self.signing.store_password.is_empty() {
            options.insert("signing.store_password".into(), "[hidden]".into());
        }
        options.insert("signing.store_type".into(), self.signing.store_type.clone());
    }

    fn format_manifest_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "manifest.main_activity".into(),
            self.manifest.main_activity.clone(),
        );
        options.insert(
            "manifest.rationale_activity".into(),
            self.manifest.rationale_activity.clone(),
        );
        options.insert(
            "manifest.query_package".into(),
            self.manifest.query_package.clone(),
        );
    }

    fn format_sdk_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("sdk.classpath".into(), self.sdk.classpath.clone());
        options.insert("sdk.plugin".into(), self.sdk.plugin.clone());
        options.insert("sdk.services_file".into(), self.sdk.services_file.clone());
    }

    fn format_artifacts_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "artifacts.patterns".into(),
            self.artifacts.patterns.join(", "),
        );
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("tools.npx".into(), self.tools.npx.display().to_string());
        options.insert(
            "tools.gradlew".into(),
            self.tools.gradlew.display().to_string(),
        );
        options.insert("tools.gradle_task".into(), self.tools.gradle_task.clone());
    }
}

fn fmt_path(path: Option<&Path>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}

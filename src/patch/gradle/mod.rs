// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Gradle build-script patches and the per-flavor build patcher.
//!
//! ```text
//! BuildConfigPatcher::run(flavor)
//!   1. stage keystore    release.keystore --> android/app/
//!   2. android/app/build.gradle
//!        SigningConfigPatch      signingConfigs { release { .. } }     (credentials)
//!        ReleaseSigningPatch     buildTypes { release { signingConfig .. } }
//!        AbiSplitsPatch          android { splits { abi { .. } } }     (ABI_SPLITS)
//!        PluginPatch             apply plugin: "<sdk plugin>"          (SDK_INTEGRATION)
//!   3. android/build.gradle
//!        ClasspathPatch          buildscript { dependencies { classpath .. } }
//!   4. stage services file       google-services.json --> android/app/
//! ```

use std::path::Path;

use anyhow::Context;
use regex::Regex;
use tracing::{info, warn};

use super::text::{Block, find_block, groovy_quote, indent_at, indent_lines, insert_after};
use super::{FilePatchReport, TextPatch, patch_file};
use crate::config::Config;
use crate::config::run::SigningCredentials;
use crate::config::types::{SdkConfig, SigningConfig};
use crate::error::Result;
use crate::pipeline::flavor::{FlavorFeatures, FlavorSpec};
use crate::utility::fs::copy::copy_file_async;

pub const SIGNING_MARKER: &str = "// flavorbuild:release-signing";
pub const RELEASE_SIGNING_REF: &str = "signingConfig signingConfigs.release";
pub const ABI_SPLITS_MARKER: &str = "// flavorbuild:abi-splits";
pub const ABIS: [&str; 4] = ["armeabi-v7a", "arm64-v8a", "x86", "x86_64"];

const INDENT: &str = "    ";

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("failed to compile pattern {pattern}"))
}

/// Inserts `lines` as the first statements inside `block`.
fn insert_into_block(text: &str, block: Block, lines: &[String]) -> String {
    let base = format!("{}{INDENT}", indent_at(text, block.header));
    insert_after(text, block.open + 1, &indent_lines(lines, &base))
}

/// Release signing configuration inside `signingConfigs { }`.
#[derive(Debug, Clone)]
pub struct SigningConfigPatch {
    lines: Vec<String>,
    signing_configs: Regex,
    release_block: Regex,
}

impl SigningConfigPatch {
    /// # Errors
    ///
    /// Returns an error if the block patterns fail to compile.
    pub fn new(signing: &SigningConfig, credentials: &SigningCredentials) -> Result<Self> {
        let password = groovy_quote(credentials.store_password());
        let lines = vec![
            SIGNING_MARKER.to_string(),
            "release {".to_string(),
            format!("{INDENT}storeFile file({})", groovy_quote(&signing.keystore_name)),
            format!("{INDENT}storePassword {password}"),
            format!("{INDENT}keyAlias {}", groovy_quote(credentials.key_alias())),
            format!("{INDENT}keyPassword {password}"),
            format!("{INDENT}storeType {}", groovy_quote(&signing.store_type)),
            format!("{INDENT}v1SigningEnabled true"),
            format!("{INDENT}v2SigningEnabled true"),
            "}".to_string(),
        ];
        Ok(Self {
            lines,
            signing_configs: compile(r"\bsigningConfigs\s*\{")?,
            release_block: compile(r"(?m)^\s*release\s*\{")?,
        })
    }
}

impl TextPatch for SigningConfigPatch {
    fn name(&self) -> &'static str {
        "signing-config"
    }

    fn marker(&self) -> &'static str {
        SIGNING_MARKER
    }

    fn anchor(&self) -> &'static str {
        "signingConfigs {"
    }

    // A hand-written release config counts as present; a second one would
    // break the build.
    fn is_applied(&self, text: &str) -> bool {
        if text.contains(SIGNING_MARKER) {
            return true;
        }
        find_block(text, &self.signing_configs, 0..text.len())
            .is_some_and(|block| self.release_block.is_match(&text[block.body()]))
    }

    fn insert(&self, text: &str) -> Option<String> {
        let block = find_block(text, &self.signing_configs, 0..text.len())?;
        Some(insert_into_block(text, block, &self.lines))
    }
}

/// Points `buildTypes.release` at the release signing config.
#[derive(Debug, Clone)]
pub struct ReleaseSigningPatch {
    build_types: Regex,
    release_block: Regex,
    debug_signing: Regex,
}

impl ReleaseSigningPatch {
    /// # Errors
    ///
    /// Returns an error if the block patterns fail to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            build_types: compile(r"\bbuildTypes\s*\{")?,
            release_block: compile(r"\brelease\s*\{")?,
            debug_signing: compile(r"(?m)^[ \t]*signingConfig\s+signingConfigs\.debug[ \t]*\r?\n?")?,
        })
    }
}

impl TextPatch for ReleaseSigningPatch {
    fn name(&self) -> &'static str {
        "release-signing"
    }

    fn marker(&self) -> &'static str {
        RELEASE_SIGNING_REF
    }

    fn anchor(&self) -> &'static str {
        "buildTypes { release {"
    }

    fn insert(&self, text: &str) -> Option<String> {
        let build_types = find_block(text, &self.build_types, 0..text.len())?;
        let release = find_block(text, &self.release_block, build_types.body())?;

        let body = &text[release.body()];
        let stripped = self.debug_signing.replace_all(body, "");
        let indent = format!("{}{INDENT}", indent_at(text, release.header));

        let mut out = String::with_capacity(text.len() + RELEASE_SIGNING_REF.len() + indent.len());
        out.push_str(&text[..=release.open]);
        out.push('\n');
        out.push_str(&indent);
        out.push_str(RELEASE_SIGNING_REF);
        out.push_str(&stripped);
        out.push_str(&text[release.close..]);
        Some(out)
    }
}

/// Per-ABI APK splits inside the top-level `android { }`.
#[derive(Debug, Clone)]
pub struct AbiSplitsPatch {
    android: Regex,
}

impl AbiSplitsPatch {
    /// # Errors
    ///
    /// Returns an error if the block pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            android: compile(r"(?m)^android\s*\{")?,
        })
    }
}

impl TextPatch for AbiSplitsPatch {
    fn name(&self) -> &'static str {
        "abi-splits"
    }

    fn marker(&self) -> &'static str {
        ABI_SPLITS_MARKER
    }

    fn anchor(&self) -> &'static str {
        "android {"
    }

    fn insert(&self, text: &str) -> Option<String> {
        let block = find_block(text, &self.android, 0..text.len())?;
        let include = ABIS
            .iter()
            .map(|abi| format!("\"{abi}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let lines = [
            ABI_SPLITS_MARKER.to_string(),
            "splits {".to_string(),
            format!("{INDENT}abi {{"),
            format!("{INDENT}{INDENT}reset()"),
            format!("{INDENT}{INDENT}enable true"),
            format!("{INDENT}{INDENT}universalApk false"),
            format!("{INDENT}{INDENT}include {include}"),
            format!("{INDENT}}}"),
            "}".to_string(),
        ];
        Some(insert_into_block(text, block, &lines))
    }
}

/// SDK classpath in the root build script.
#[derive(Debug, Clone)]
pub struct ClasspathPatch {
    coordinate: String,
    artifact: String,
    buildscript: Regex,
    dependencies: Regex,
}

impl ClasspathPatch {
    /// # Errors
    ///
    /// Returns an error if the block patterns fail to compile.
    pub fn new(sdk: &SdkConfig) -> Result<Self> {
        Ok(Self {
            coordinate: sdk.classpath.clone(),
            artifact: sdk.classpath_artifact().to_string(),
            buildscript: compile(r"\bbuildscript\s*\{")?,
            dependencies: compile(r"\bdependencies\s*\{")?,
        })
    }
}

impl TextPatch for ClasspathPatch {
    fn name(&self) -> &'static str {
        "sdk-classpath"
    }

    fn marker(&self) -> &str {
        &self.artifact
    }

    fn anchor(&self) -> &'static str {
        "buildscript { dependencies {"
    }

    fn insert(&self, text: &str) -> Option<String> {
        let buildscript = find_block(text, &self.buildscript, 0..text.len())?;
        let dependencies = find_block(text, &self.dependencies, buildscript.body())?;
        let line = format!("classpath({})", groovy_quote(&self.coordinate));
        Some(insert_into_block(text, dependencies, &[line]))
    }
}

/// SDK plugin application after the last `apply plugin:` line.
#[derive(Debug, Clone)]
pub struct PluginPatch {
    plugin: String,
    apply_line: Regex,
}

impl PluginPatch {
    /// # Errors
    ///
    /// Returns an error if the line pattern fails to compile.
    pub fn new(sdk: &SdkConfig) -> Result<Self> {
        Ok(Self {
            plugin: sdk.plugin.clone(),
            apply_line: compile(r"(?m)^[ \t]*apply plugin:.*$")?,
        })
    }
}

impl TextPatch for PluginPatch {
    fn name(&self) -> &'static str {
        "sdk-plugin"
    }

    fn marker(&self) -> &str {
        &self.plugin
    }

    fn anchor(&self) -> &'static str {
        "apply plugin:"
    }

    fn insert(&self, text: &str) -> Option<String> {
        let last = self.apply_line.find_iter(text).last()?;
        let line = format!("{}apply plugin: \"{}\"", indent_at(text, last.start()), self.plugin);
        Some(insert_after(text, last.end(), &line))
    }
}

/// Results of one flavor's native build patching.
///
/// Staging fields are `None` when the flavor never needed that input.
#[derive(Debug, Clone, Default)]
pub struct BuildPatchReport {
    pub files: Vec<FilePatchReport>,
    pub keystore_staged: Option<bool>,
    pub services_staged: Option<bool>,
    pub signing_skipped: bool,
}

impl BuildPatchReport {
    #[must_use]
    pub fn warning_count(&self) -> usize {
        let patches: usize = self.files.iter().map(FilePatchReport::warning_count).sum();
        let unstaged = [self.keystore_staged, self.services_staged]
            .into_iter()
            .filter(|staged| *staged == Some(false))
            .count();
        patches + unstaged + usize::from(self.signing_skipped)
    }
}

/// Copies `src` to `dst` when it exists; absence is a warning.
async fn stage_file(label: &str, src: &Path, dst: &Path, dry_run: bool) -> Result<bool> {
    if !src.exists() {
        warn!(file = label, path = %src.display(), "Source file not found, not staged");
        return Ok(false);
    }
    if dry_run {
        info!(
            "[dry-run] Would copy {} to {}",
            src.display(),
            dst.display()
        );
        return Ok(true);
    }
    copy_file_async(src, dst).await?;
    info!(file = label, dest = %dst.display(), "Staged file");
    Ok(true)
}

/// Applies the signing, ABI and SDK patches one flavor needs.
#[derive(Debug, Clone)]
pub struct BuildConfigPatcher {
    signing: Option<SigningConfigPatch>,
    release_signing: ReleaseSigningPatch,
    abi_splits: AbiSplitsPatch,
    classpath: ClasspathPatch,
    plugin: PluginPatch,
}

impl BuildConfigPatcher {
    /// Prepares the patches. Without complete credentials the signing block
    /// cannot be written and both signing patches are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a patch fails to build its patterns.
    pub fn new(config: &Config, credentials: &SigningCredentials) -> Result<Self> {
        let signing = if credentials.is_complete() {
            Some(SigningConfigPatch::new(&config.signing, credentials)?)
        } else {
            None
        };
        Ok(Self {
            signing,
            release_signing: ReleaseSigningPatch::new()?,
            abi_splits: AbiSplitsPatch::new()?,
            classpath: ClasspathPatch::new(&config.sdk)?,
            plugin: PluginPatch::new(&config.sdk)?,
        })
    }

    /// Patches the native project for `flavor`.
    ///
    /// # Errors
    ///
    /// Returns an error if a path is not configured or a file operation fails.
    /// Missing files, anchors and staged inputs are warnings only.
    pub async fn run(
        &self,
        config: &Config,
        flavor: &FlavorSpec,
        dry_run: bool,
    ) -> Result<BuildPatchReport> {
        let paths = &config.paths;
        let mut report = BuildPatchReport::default();
        let mut module_patches: Vec<&dyn TextPatch> = Vec::new();

        let keystore_dst = paths.android_app()?.join(&config.signing.keystore_name);
        report.keystore_staged =
            Some(stage_file("keystore", paths.keystore()?, &keystore_dst, dry_run).await?);

        if let Some(signing) = &self.signing {
            module_patches.push(signing);
            module_patches.push(&self.release_signing);
        } else {
            warn!(
                flavor = flavor.name,
                "Signing credentials incomplete, release signing not configured"
            );
            report.signing_skipped = true;
        }

        if flavor.features.contains(FlavorFeatures::ABI_SPLITS) {
            module_patches.push(&self.abi_splits);
        }

        let sdk = flavor.features.contains(FlavorFeatures::SDK_INTEGRATION);
        if sdk {
            module_patches.push(&self.plugin);
        }

        if !module_patches.is_empty() {
            report
                .files
                .push(patch_file(&paths.app_build_gradle()?, &module_patches, dry_run).await?);
        }

        if sdk {
            report
                .files
                .push(patch_file(&paths.root_build_gradle()?, &[&self.classpath], dry_run).await?);

            let services_dst = paths.android_app()?.join(&config.sdk.services_file);
            report.services_staged =
                Some(stage_file("services", paths.services_json()?, &services_dst, dry_run).await?);
        }

        Ok(report)
    }
}

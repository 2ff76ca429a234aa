// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Artifact collection.
//!
//! ```text
//! android/app/build/outputs/apk/release/
//!   app-arm64-v8a-release.apk    -->  release/<product>-1.4.2-arm64-v8a.apk
//!   app-armeabi-v7a-release.apk  -->  release/<product>-1.4.2-armeabi-v7a.apk
//!   output-metadata.json             (not matched, left in place)
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use regex::Regex;
use tracing::{info, warn};
use wax::{Glob, Program};

use super::flavor::FlavorSpec;
use crate::error::Result;
use crate::utility::fs::copy::move_file_async;
use crate::version::Version;

/// A compiled output moved into the release directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub flavor: &'static str,
    pub abi: Option<String>,
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Naming inputs for one flavor's artifacts.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactNaming<'a> {
    pub product: &'a str,
    pub version: &'a Version,
    pub flavor: &'a FlavorSpec,
}

impl ArtifactNaming<'_> {
    /// `<product>-<version><suffix>[-<abi>].<ext>`
    #[must_use]
    pub fn file_name(&self, abi: Option<&str>, extension: Option<&str>) -> String {
        let mut name = format!("{}-{}{}", self.product, self.version, self.flavor.suffix);
        if let Some(abi) = abi {
            name.push('-');
            name.push_str(abi);
        }
        if let Some(ext) = extension {
            name.push('.');
            name.push_str(ext);
        }
        name
    }
}

/// ABI token embedded in a compiled file name.
///
/// # Errors
///
/// Returns an error if the token pattern fails to compile.
pub fn abi_pattern() -> Result<Regex> {
    Regex::new(r"(arm64-v8a|armeabi-v7a|x86_64|x86)").context("failed to compile ABI pattern")
}

/// Result of one collection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    pub artifacts: Vec<Artifact>,
    /// Problems logged during the pass, one per skipped output or one for an
    /// empty or unreadable build directory.
    pub warnings: usize,
}

impl Collection {
    fn warn(mut self) -> Self {
        self.warnings += 1;
        self
    }
}

/// Moves every artifact in `source_dir` matching `patterns` into `release_dir`.
///
/// Collection problems never fail the flavor: a missing or unreadable
/// `source_dir`, an empty match, an uncreatable `release_dir`, two outputs
/// mapping to the same name, or a failed move are logged and counted in
/// [`Collection::warnings`]. In a dry run the destinations are computed and
/// logged only.
///
/// # Errors
///
/// Returns an error only if a pattern is invalid.
pub async fn collect_artifacts(
    source_dir: &Path,
    release_dir: &Path,
    patterns: &[String],
    naming: ArtifactNaming<'_>,
    dry_run: bool,
) -> Result<Collection> {
    let globs = patterns
        .iter()
        .map(|p| Glob::new(p).with_context(|| format!("Invalid glob pattern: {p}")))
        .collect::<Result<Vec<_>>>()?;
    let abi = abi_pattern()?;
    let collection = Collection::default();

    if !source_dir.is_dir() {
        warn!(path = %source_dir.display(), "Artifact directory not found, nothing collected");
        return Ok(collection.warn());
    }

    let sources = match matching_files(source_dir, &globs).await {
        Ok(sources) => sources,
        Err(err) => {
            warn!(path = %source_dir.display(), "Cannot list artifacts: {err:#}");
            return Ok(collection.warn());
        }
    };
    if sources.is_empty() {
        warn!(path = %source_dir.display(), "No artifacts matched, nothing collected");
        return Ok(collection.warn());
    }

    if !dry_run && let Err(err) = tokio::fs::create_dir_all(release_dir).await {
        warn!(
            path = %release_dir.display(),
            skipped = sources.len(),
            "Cannot create release directory: {err}"
        );
        return Ok(Collection {
            artifacts: Vec::new(),
            warnings: sources.len(),
        });
    }

    let mut collection = Collection {
        artifacts: Vec::with_capacity(sources.len()),
        warnings: 0,
    };
    let mut claimed = HashSet::new();
    for source in sources {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let token = abi.find(stem).map(|m| m.as_str().to_string());
        let extension = source.extension().and_then(|e| e.to_str());
        let dest = release_dir.join(naming.file_name(token.as_deref(), extension));

        if !claimed.insert(dest.clone()) {
            warn!(
                source = %source.display(),
                dest = %dest.display(),
                "Artifact name already taken in this release, skipped"
            );
            collection.warnings += 1;
            continue;
        }

        if dry_run {
            info!(
                "[dry-run] Would move {} to {}",
                source.display(),
                dest.display()
            );
        } else if let Err(err) = move_file_async(&source, &dest).await {
            warn!(source = %source.display(), "Failed to collect artifact: {err:#}");
            collection.warnings += 1;
            continue;
        } else {
            info!(dest = %dest.display(), "Collected artifact");
        }

        collection.artifacts.push(Artifact {
            flavor: naming.flavor.name,
            abi: token,
            source,
            dest,
        });
    }

    Ok(collection)
}

/// Files directly under `dir` whose name matches any glob, sorted.
async fn matching_files(dir: &Path, globs: &[Glob<'_>]) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("failed to list {}", dir.display()))?;
    let mut sources = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if globs.iter().any(|glob| glob.is_match(name)) {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}

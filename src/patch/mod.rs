// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Idempotent text patches for generated native files.
//!
//! ```text
//! TextPatch { name, marker, anchor, insert(text) -> Option<String> }
//!                        |
//!                        v
//!                apply_patch(&patch, &mut text)
//!     marker present  --> AlreadyApplied  (info)
//!     insert -> None  --> AnchorMissing   (warn, text untouched)
//!     insert -> Some  --> Applied         (info)
//!
//! patch_file(path, patches, dry_run)
//!     missing file    --> FileMissing for every patch (warn)
//!     read --> apply each --> write_atomic if changed
//! ```
//!
//! Patches never fail the run. A patch whose anchor is gone leaves the file
//! as it was and the remaining patches are still attempted.

pub mod gradle;
pub mod manifest;
pub mod text;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use crate::error::Result;
use crate::utility::fs::atomic::write_atomic;

/// A single marker-gated edit.
pub trait TextPatch: Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &str;

    /// Substring whose presence means the patch is already in place.
    fn marker(&self) -> &str;

    /// Human-readable description of where the insertion goes.
    fn anchor(&self) -> &str;

    /// Whether `text` already carries this patch.
    fn is_applied(&self, text: &str) -> bool {
        text.contains(self.marker())
    }

    /// Returns the patched text, or `None` when the anchor cannot be found.
    fn insert(&self, text: &str) -> Option<String>;
}

/// Result of one patch against one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Applied,
    AlreadyApplied,
    AnchorMissing,
    FileMissing,
}

impl PatchOutcome {
    /// Anything that leaves the patch absent from the file.
    #[must_use]
    pub const fn is_warning(self) -> bool {
        matches!(self, Self::AnchorMissing | Self::FileMissing)
    }
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Applied => "applied",
            Self::AlreadyApplied => "already applied",
            Self::AnchorMissing => "anchor missing",
            Self::FileMissing => "file missing",
        };
        f.write_str(s)
    }
}

/// Applies `patch` to `text` in place.
pub fn apply_patch(patch: &dyn TextPatch, text: &mut String) -> PatchOutcome {
    if patch.is_applied(text) {
        info!(patch = patch.name(), "Patch already applied, skipping");
        return PatchOutcome::AlreadyApplied;
    }

    match patch.insert(text) {
        Some(patched) => {
            *text = patched;
            info!(patch = patch.name(), anchor = patch.anchor(), "Applied patch");
            PatchOutcome::Applied
        }
        None => {
            warn!(
                patch = patch.name(),
                anchor = patch.anchor(),
                "Anchor not found, patch not applied"
            );
            PatchOutcome::AnchorMissing
        }
    }
}

/// Outcomes of every patch run against one file.
#[derive(Debug, Clone)]
pub struct FilePatchReport {
    path: PathBuf,
    outcomes: Vec<(String, PatchOutcome)>,
}

impl FilePatchReport {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn outcomes(&self) -> &[(String, PatchOutcome)] {
        &self.outcomes
    }

    /// Outcome for the patch called `name`.
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<PatchOutcome> {
        self.outcomes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, outcome)| *outcome)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_warning())
            .count()
    }
}

/// Applies `patches` in order to the file at `path`.
///
/// The file is written once, atomically, and only if something changed. In a
/// dry run the outcomes are computed but nothing is written.
///
/// # Errors
///
/// Returns an error if an existing file cannot be read or written back.
pub async fn patch_file(
    path: &Path,
    patches: &[&dyn TextPatch],
    dry_run: bool,
) -> Result<FilePatchReport> {
    if !path.exists() {
        warn!(path = %path.display(), "File to patch not found, skipping");
        return Ok(FilePatchReport {
            path: path.to_path_buf(),
            outcomes: patches
                .iter()
                .map(|p| (p.name().to_string(), PatchOutcome::FileMissing))
                .collect(),
        });
    }

    let original = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut text = original.clone();
    let outcomes = patches
        .iter()
        .map(|patch| (patch.name().to_string(), apply_patch(*patch, &mut text)))
        .collect();

    if text != original {
        if dry_run {
            info!(path = %path.display(), "[dry-run] Would write patched file");
        } else {
            write_atomic(path, text)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
    }

    Ok(FilePatchReport {
        path: path.to_path_buf(),
        outcomes,
    })
}

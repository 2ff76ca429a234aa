// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release version resolution.
//!
//! ```text
//! VERSION_OVERRIDE set?
//!   yes --> parse --> write back to package.json
//!   no  --> read package.json "version" --> parse
//!                     |
//!                     v
//!        Version { major, minor, patch }
//!        build_code = major*10000 + minor*100 + patch
//! ```
//!
//! Components are capped at 99 so the build code stays strictly increasing
//! in version order; anything larger is rejected instead of overlapping the
//! next component's digits.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use tracing::{debug, info};

use crate::error::{Result, VersionError};
use crate::project::PackageManifest;

/// Largest value any version component may take.
pub const MAX_COMPONENT: u32 = 99;

/// A strict `MAJOR.MINOR.PATCH` release version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u32,
    minor: u32,
    patch: u32,
}

impl Version {
    /// Creates a version, rejecting components above [`MAX_COMPONENT`].
    ///
    /// # Errors
    ///
    /// Returns `VersionError::ComponentOutOfRange` naming the first offending
    /// component.
    pub fn new(major: u32, minor: u32, patch: u32) -> std::result::Result<Self, VersionError> {
        if major > MAX_COMPONENT {
            return Err(out_of_range("major", major));
        }
        if minor > MAX_COMPONENT {
            return Err(out_of_range("minor", minor));
        }
        if patch > MAX_COMPONENT {
            return Err(out_of_range("patch", patch));
        }
        Ok(Self {
            major,
            minor,
            patch,
        })
    }

    /// Parses exactly three dot-separated runs of ASCII digits.
    ///
    /// Signs, whitespace, empty components, pre-release tags and build
    /// metadata are all rejected.
    ///
    /// # Errors
    ///
    /// Returns `VersionError::Malformed` for anything that is not `X.Y.Z`, and
    /// `VersionError::ComponentOutOfRange` when a component exceeds 99.
    pub fn parse(input: &str) -> std::result::Result<Self, VersionError> {
        let malformed = || VersionError::Malformed {
            input: input.to_string(),
        };

        let mut components = [0u32; 3];
        let mut parts = input.split('.');
        for slot in &mut components {
            let part = parts.next().ok_or_else(malformed)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            // All digits; only overflow can fail here, and overflow is out of range.
            *slot = part.parse().unwrap_or(u32::MAX);
        }
        if parts.next().is_some() {
            return Err(malformed());
        }

        let [major, minor, patch] = components;
        Self::new(major, minor, patch)
    }

    #[must_use]
    pub const fn major(&self) -> u32 {
        self.major
    }

    #[must_use]
    pub const fn minor(&self) -> u32 {
        self.minor
    }

    #[must_use]
    pub const fn patch(&self) -> u32 {
        self.patch
    }

    /// Monotonic integer build code: `major*10000 + minor*100 + patch`.
    #[must_use]
    pub const fn build_code(&self) -> u32 {
        self.major * 10_000 + self.minor * 100 + self.patch
    }
}

fn out_of_range(component: &'static str, value: u32) -> VersionError {
    VersionError::ComponentOutOfRange {
        component,
        value,
        max: MAX_COMPONENT,
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Determines the release version for this run.
///
/// An override is validated before anything is written, then stored in the
/// package manifest so every later step (and the app itself) agrees on it.
/// Without an override the manifest's own `version` is used.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or written, has no
/// `version` field, or if either version string is invalid.
pub async fn resolve_version(
    package_json: &Path,
    version_override: Option<&str>,
    dry_run: bool,
) -> Result<Version> {
    if let Some(raw) = version_override {
        let version = Version::parse(raw.trim())
            .with_context(|| format!("invalid version override '{raw}'"))?;

        let mut manifest = PackageManifest::load(package_json).await?;
        if manifest.version() == Some(version.to_string().as_str()) {
            debug!(version = %version, "package.json already carries override version");
            return Ok(version);
        }
        manifest.set_version(&version);

        if dry_run {
            info!(
                path = %package_json.display(),
                version = %version,
                "[dry-run] Would write version override to package.json"
            );
        } else {
            manifest.save(package_json).await?;
            info!(
                path = %package_json.display(),
                version = %version,
                "Wrote version override to package.json"
            );
        }
        return Ok(version);
    }

    let manifest = PackageManifest::load(package_json).await?;
    let raw = manifest.version().ok_or_else(|| VersionError::MissingField {
        path: package_json.display().to_string(),
    })?;
    let version = Version::parse(raw)
        .with_context(|| format!("invalid version in {}", package_json.display()))?;

    debug!(version = %version, "Read version from package.json");
    Ok(version)
}

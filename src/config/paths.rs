// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! root/
//!   app.json
//!   package.json
//!   release.keystore          (keystore, staged by CI)
//!   google-services.json      (services_json, staged by CI)
//!   release/                  (collected artifacts)
//!   android/                  (regenerated per flavor)
//!     build.gradle
//!     app/
//!       build.gradle
//!       src/main/AndroidManifest.xml
//!       build/outputs/apk/release/
//! ```
//!
//! All paths are optional and resolved from `project.root` if not set.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Project file locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Expo app configuration (default: root/app.json).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_config: Option<PathBuf>,
    /// npm package manifest (default: root/package.json).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_json: Option<PathBuf>,
    /// Generated native project (default: root/android).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<PathBuf>,
    /// Collected artifacts (default: root/release).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<PathBuf>,
    /// Staged signing keystore (default: root/release.keystore).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keystore: Option<PathBuf>,
    /// Staged services JSON (default: root/google-services.json).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services_json: Option<PathBuf>,
}

impl PathsConfig {
    /// Resolve all relative paths against the project root and fill in defaults.
    pub fn resolve(&mut self, root: &Path) {
        let resolve = |path: &mut Option<PathBuf>, default: &str| match path {
            Some(p) if p.is_relative() => {
                *path = Some(root.join(p.clone()));
            }
            None => {
                *path = Some(root.join(default));
            }
            _ => {}
        };

        resolve(&mut self.app_config, "app.json");
        resolve(&mut self.package_json, "package.json");
        resolve(&mut self.android, "android");
        resolve(&mut self.release, "release");
        resolve(&mut self.keystore, "release.keystore");
        resolve(&mut self.services_json, "google-services.json");
    }

    /// Native project directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if paths were never resolved.
    pub fn android(&self) -> Result<&Path> {
        required(self.android.as_deref(), "android")
    }

    /// `android/app`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if paths were never resolved.
    pub fn android_app(&self) -> Result<PathBuf> {
        Ok(self.android()?.join("app"))
    }

    /// Module-level build file, `android/app/build.gradle`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if paths were never resolved.
    pub fn app_build_gradle(&self) -> Result<PathBuf> {
        Ok(self.android_app()?.join("build.gradle"))
    }

    /// Parent build file, `android/build.gradle`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if paths were never resolved.
    pub fn root_build_gradle(&self) -> Result<PathBuf> {
        Ok(self.android()?.join("build.gradle"))
    }

    /// `android/app/src/main/AndroidManifest.xml`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if paths were never resolved.
    pub fn manifest(&self) -> Result<PathBuf> {
        Ok(self
            .android_app()?
            .join("src")
            .join("main")
            .join("AndroidManifest.xml"))
    }

    /// Directory the release task writes its outputs into.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if paths were never resolved.
    pub fn compiled_artifacts(&self) -> Result<PathBuf> {
        Ok(self
            .android_app()?
            .join("build")
            .join("outputs")
            .join("apk")
            .join("release"))
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if paths were never resolved.
    pub fn app_config(&self) -> Result<&Path> {
        required(self.app_config.as_deref(), "app_config")
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if paths were never resolved.
    pub fn package_json(&self) -> Result<&Path> {
        required(self.package_json.as_deref(), "package_json")
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if paths were never resolved.
    pub fn release(&self) -> Result<&Path> {
        required(self.release.as_deref(), "release")
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if paths were never resolved.
    pub fn keystore(&self) -> Result<&Path> {
        required(self.keystore.as_deref(), "keystore")
    }

    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if paths were never resolved.
    pub fn services_json(&self) -> Result<&Path> {
        required(self.services_json.as_deref(), "services_json")
    }
}

fn required<'a>(path: Option<&'a Path>, key: &str) -> Result<&'a Path> {
    path.ok_or_else(|| {
        ConfigError::MissingKey {
            section: "paths".to_string(),
            key: key.to_string(),
        }
        .into()
    })
}

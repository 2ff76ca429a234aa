// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for flavorbuild.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, ProjectConfig, PathsConfig, SigningConfig,
//!         ManifestConfig, SdkConfig, ToolsConfig, ArtifactsConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. No file log when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Write the file log as JSON lines.
    pub json_log: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            json_log: false,
        }
    }
}

/// Project identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project root; every relative path is resolved against it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Product name used as the artifact filename prefix.
    pub product: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: None,
            product: "app".to_string(),
        }
    }
}

/// Release signing settings. The password never lives in a file by default;
/// it arrives through `KEYSTORE_PASSWORD`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SigningConfig {
    /// Keystore filename inside `android/app`.
    pub keystore_name: String,
    /// Key alias, used when `KEY_ALIAS` is not set.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key_alias: String,
    /// Store password, used when `KEYSTORE_PASSWORD` is not set.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub store_password: String,
    /// Keystore format written into the signing block.
    pub store_type: String,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            keystore_name: "release.keystore".to_string(),
            key_alias: String::new(),
            store_password: String::new(),
            store_type: "pkcs12".to_string(),
        }
    }
}

/// Names used by the Health Connect manifest patches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// `android:name` of the launcher activity.
    pub main_activity: String,
    /// `android:name` of the permissions rationale activity.
    pub rationale_activity: String,
    /// Package that must be visible through `<queries>`.
    pub query_package: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            main_activity: ".MainActivity".to_string(),
            rationale_activity: ".PermissionsRationaleActivity".to_string(),
            query_package: "com.google.android.apps.healthdata".to_string(),
        }
    }
}

/// Google services SDK integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SdkConfig {
    /// Maven coordinate placed on the buildscript classpath.
    pub classpath: String,
    /// Gradle plugin id applied to the app module.
    pub plugin: String,
    /// Filename the plugin expects inside `android/app`.
    pub services_file: String,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            classpath: "com.google.gms:google-services:4.4.2".to_string(),
            plugin: "com.google.gms.google-services".to_string(),
            services_file: "google-services.json".to_string(),
        }
    }
}

impl SdkConfig {
    /// Coordinate without the version, e.g. `com.google.gms:google-services`.
    #[must_use]
    pub fn classpath_artifact(&self) -> &str {
        self.classpath
            .rsplit_once(':')
            .filter(|(group, _)| group.contains(':'))
            .map_or(self.classpath.as_str(), |(artifact, _)| artifact)
    }
}

/// External tool locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// `npx` executable, resolved through PATH when not absolute.
    pub npx: PathBuf,
    /// Gradle wrapper, relative to the native project directory.
    pub gradlew: PathBuf,
    /// Gradle task producing release artifacts.
    pub gradle_task: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        let gradlew = if cfg!(windows) {
            "gradlew.bat"
        } else {
            "gradlew"
        };
        Self {
            npx: PathBuf::from("npx"),
            gradlew: PathBuf::from(gradlew),
            gradle_task: "assembleRelease".to_string(),
        }
    }
}

/// Which compiler outputs count as release artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactsConfig {
    /// Filename globs, matched with `wax`.
    pub patterns: Vec<String>,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            patterns: vec!["*.apk".to_string(), "*.aab".to_string()],
        }
    }
}

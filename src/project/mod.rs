// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! JavaScript-side project files.
//!
//! ```text
//! package.json                 app.json
//! { "version": "1.4.2", .. }   { "expo": {
//!                                  "version": "1.4.2",
//!                                  "android": { "versionCode": 10402 },
//!                                  "extra":   { "flavor": "foss" } } }
//! ```
//!
//! Both are edited as untyped JSON with key order preserved, so unrelated
//! keys survive a rewrite untouched. Writes go through
//! [`write_atomic`](crate::utility::fs::atomic::write_atomic) and end with a
//! trailing newline.

use std::path::Path;

use anyhow::Context;
use serde_json::{Map, Value};
use tokio::fs;

use crate::error::{ConfigError, Result};
use crate::utility::fs::atomic::write_atomic;
use crate::version::Version;

async fn load_object(path: &Path) -> Result<Map<String, Value>> {
    let text = fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::ParseError {
            path: path.display().to_string(),
            message: "top-level value is not an object".to_string(),
        }
        .into()),
    }
}

/// Pretty-printed JSON with a trailing newline.
fn render(map: &Map<String, Value>) -> Result<String> {
    let mut text = serde_json::to_string_pretty(map).context("failed to serialize JSON")?;
    text.push('\n');
    Ok(text)
}

/// Returns the object stored under `key`, creating an empty one if absent.
fn object_entry<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a mut Map<String, Value>> {
    let slot = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    slot.as_object_mut().ok_or_else(|| {
        ConfigError::InvalidValue {
            section: path.to_string(),
            key: key.to_string(),
            message: "expected a JSON object".to_string(),
        }
        .into()
    })
}

/// `package.json`, the version source of truth.
#[derive(Debug, Clone)]
pub struct PackageManifest {
    document: Map<String, Value>,
}

impl PackageManifest {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub async fn load(path: &Path) -> Result<Self> {
        Ok(Self {
            document: load_object(path).await?,
        })
    }

    #[must_use]
    pub fn from_document(document: Map<String, Value>) -> Self {
        Self { document }
    }

    /// The raw `version` string, if present.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.document.get("version").and_then(Value::as_str)
    }

    /// Sets `version`, keeping its position when it already exists.
    pub fn set_version(&mut self, version: &Version) {
        self.document
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render(&self) -> Result<String> {
        render(&self.document)
    }

    /// # Errors
    ///
    /// Returns an error if serialization or the atomic write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, self.render()?).await
    }
}

/// Expo `app.json`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    document: Map<String, Value>,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub async fn load(path: &Path) -> Result<Self> {
        Ok(Self {
            document: load_object(path).await?,
        })
    }

    #[must_use]
    pub fn from_document(document: Map<String, Value>) -> Self {
        Self { document }
    }

    /// Writes the release identity for one flavor.
    ///
    /// Sets `expo.version`, `expo.android.versionCode` and `expo.extra.flavor`,
    /// and removes `expo.android.googleServicesFile` so prebuild never copies
    /// a services file on its own; SDK flavors get theirs from the patcher.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if `expo`, `expo.android` or
    /// `expo.extra` exists but is not an object.
    pub fn configure(&mut self, version: &Version, flavor_marker: &str) -> Result<()> {
        let expo = object_entry(&mut self.document, "expo", "app.json")?;
        expo.insert("version".to_string(), Value::String(version.to_string()));

        let android = object_entry(expo, "android", "app.json expo")?;
        android.insert(
            "versionCode".to_string(),
            Value::from(version.build_code()),
        );
        android.shift_remove("googleServicesFile");

        let extra = object_entry(expo, "extra", "app.json expo")?;
        extra.insert(
            "flavor".to_string(),
            Value::String(flavor_marker.to_string()),
        );
        Ok(())
    }

    /// The underlying document.
    #[must_use]
    pub const fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render(&self) -> Result<String> {
        render(&self.document)
    }

    /// # Errors
    ///
    /// Returns an error if serialization or the atomic write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, self.render()?).await
    }
}

#[cfg(test)]
mod tests;

// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              anyhow::Error (crate::error::Result)
//!                        |
//!   +---------+----------+----------+---------+
//!   v         v          v          v         v
//! Version   Config    Pipeline   Process     Fs
//!
//!   Version   Malformed, ComponentOutOfRange, MissingField
//!   Config    ParseError, MissingKey, InvalidValue
//!   Pipeline  StageFailed, UnknownFlavor
//!   Process   ExecutableNotFound, SpawnFailed, NonZeroExit
//!   Fs        NotFound, IoError
//! ```
//!
//! Fatal failures travel as `anyhow::Error` wrapping one of these types, so
//! callers can `downcast_ref` to the typed cause. Recoverable conditions
//! (missing anchors, missing staged files) never become errors; they are
//! logged where they occur.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

// --- Version Errors ---

/// Errors raised while parsing or resolving a release version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// Input is not three dot-separated decimal components.
    #[error("malformed version '{input}': expected MAJOR.MINOR.PATCH")]
    Malformed { input: String },

    /// A component does not fit the two-digit build code layout.
    #[error("version component {component} is {value}, maximum is {max}")]
    ComponentOutOfRange {
        component: &'static str,
        value: u32,
        max: u32,
    },

    /// The package manifest has no usable `version` field.
    #[error("no version field in {path}")]
    MissingField { path: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Pipeline Errors ---

/// Flavor pipeline errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage failed fatally; the whole run stops.
    #[error("flavor '{flavor}' failed during {stage}: {message}")]
    StageFailed {
        flavor: String,
        stage: String,
        message: String,
    },

    /// Flavor name not present in the registry.
    #[error("unknown flavor '{0}'")]
    UnknownFlavor(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with an unexpected status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests;

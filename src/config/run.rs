// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-run settings.
//!
//! ```text
//! Config (files, env prefix)  +  release args (CI env)
//!                  \              /
//!                   v            v
//!                    RunConfig (immutable)
//!                         |
//!          orchestrator -> pipeline -> patchers / tools
//! ```
//!
//! Built once at the top level and passed down by reference, so nothing below
//! the CLI layer reads the process environment.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bon::Builder;

use super::Config;
use crate::pipeline::flavor::FlavorSelector;

/// Keystore credentials for release signing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SigningCredentials {
    store_password: String,
    key_alias: String,
}

impl SigningCredentials {
    pub fn new(store_password: impl Into<String>, key_alias: impl Into<String>) -> Self {
        Self {
            store_password: store_password.into(),
            key_alias: key_alias.into(),
        }
    }

    /// Store password; also used as the key password.
    #[must_use]
    pub fn store_password(&self) -> &str {
        &self.store_password
    }

    #[must_use]
    pub fn key_alias(&self) -> &str {
        &self.key_alias
    }

    /// Both values present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.store_password.is_empty() && !self.key_alias.is_empty()
    }
}

impl fmt::Debug for SigningCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.store_password.is_empty() {
            ""
        } else {
            "[hidden]"
        };
        f.debug_struct("SigningCredentials")
            .field("store_password", &password)
            .field("key_alias", &self.key_alias)
            .finish()
    }
}

/// Everything one release run needs, resolved up front.
#[derive(Debug, Clone, Builder)]
pub struct RunConfig {
    #[builder(setters(name = with_config))]
    config: Arc<Config>,
    #[builder(setters(name = with_selector), default)]
    selector: FlavorSelector,
    #[builder(setters(name = with_version_override))]
    version_override: Option<String>,
    #[builder(setters(name = with_credentials), default)]
    credentials: SigningCredentials,
    #[builder(setters(name = with_ci_output))]
    ci_output: Option<PathBuf>,
    #[builder(setters(name = with_dry_run), default = false)]
    dry_run: bool,
}

impl RunConfig {
    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    #[must_use]
    pub const fn selector(&self) -> FlavorSelector {
        self.selector
    }

    /// Explicit version that replaces the package manifest's.
    #[must_use]
    pub fn version_override(&self) -> Option<&str> {
        self.version_override.as_deref()
    }

    #[must_use]
    pub const fn credentials(&self) -> &SigningCredentials {
        &self.credentials
    }

    /// File that receives `version=X.Y.Z` for later CI steps.
    #[must_use]
    pub fn ci_output(&self) -> Option<&Path> {
        self.ci_output.as_deref()
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

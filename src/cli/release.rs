// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release and patch command arguments.
//!
//! Every per-run CI input is also readable from its environment variable:
//!
//! ```text
//! --flavor             BUILD_FLAVOR       standard | foss | all
//! --version-override   VERSION_OVERRIDE   X.Y.Z
//! --ci-output          GITHUB_OUTPUT      file receiving version=X.Y.Z
//! --keystore-password  KEYSTORE_PASSWORD  falls back to signing.store_password
//! --key-alias          KEY_ALIAS          falls back to signing.key_alias
//! ```
//!
//! Empty variables count as unset.

use std::fmt;
use std::path::PathBuf;

use clap::Args;

use crate::config::run::SigningCredentials;
use crate::config::types::SigningConfig;
use crate::error::PipelineError;
use crate::pipeline::flavor::{FlavorSelector, FlavorSpec};

/// Signing credentials from the command line or environment.
#[derive(Clone, Default, Args)]
pub struct SigningArgs {
    /// Keystore password, also used as the key password.
    #[arg(
        long = "keystore-password",
        env = "KEYSTORE_PASSWORD",
        value_name = "PASSWORD",
        hide_env_values = true
    )]
    pub keystore_password: Option<String>,

    /// Alias of the signing key inside the keystore.
    #[arg(long = "key-alias", env = "KEY_ALIAS", value_name = "ALIAS")]
    pub key_alias: Option<String>,
}

impl SigningArgs {
    /// Merges these values with the `[signing]` section; arguments win.
    #[must_use]
    pub fn credentials(&self, signing: &SigningConfig) -> SigningCredentials {
        let pick = |arg: Option<&String>, fallback: &str| {
            arg.map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        SigningCredentials::new(
            pick(self.keystore_password.as_ref(), &signing.store_password),
            pick(self.key_alias.as_ref(), &signing.key_alias),
        )
    }
}

impl fmt::Debug for SigningArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningArgs")
            .field(
                "keystore_password",
                &self.keystore_password.as_ref().map(|_| "[hidden]"),
            )
            .field("key_alias", &self.key_alias)
            .finish()
    }
}

/// Arguments for the `release` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ReleaseArgs {
    /// Flavors to build.
    #[arg(
        short = 'f',
        long = "flavor",
        env = "BUILD_FLAVOR",
        value_enum,
        ignore_case = true,
        default_value_t = FlavorSelector::All
    )]
    pub flavor: FlavorSelector,

    /// Release version; replaces the version in package.json.
    #[arg(long = "version-override", env = "VERSION_OVERRIDE", value_name = "X.Y.Z")]
    pub version_override: Option<String>,

    /// File that `version=X.Y.Z` is appended to.
    #[arg(long = "ci-output", env = "GITHUB_OUTPUT", value_name = "FILE")]
    pub ci_output: Option<PathBuf>,

    /// Signing credentials.
    #[command(flatten)]
    pub signing: SigningArgs,
}

/// Arguments for the `patch` command.
#[derive(Debug, Clone, Args)]
pub struct PatchArgs {
    /// Flavor whose patches are applied. Kept apart from `BUILD_FLAVOR`,
    /// which may be `all`.
    #[arg(
        short = 'f',
        long = "flavor",
        env = "PATCH_FLAVOR",
        value_parser = parse_flavor,
        default_value = "standard"
    )]
    pub flavor: FlavorSpec,

    /// Only patch AndroidManifest.xml.
    #[arg(long = "manifest-only")]
    pub manifest_only: bool,

    /// Signing credentials.
    #[command(flatten)]
    pub signing: SigningArgs,
}

fn parse_flavor(value: &str) -> Result<FlavorSpec, PipelineError> {
    FlavorSpec::lookup(value.trim())
}

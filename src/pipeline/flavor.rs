// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Flavor registry.
//!
//! ```text
//! name      display    marker     suffix   features
//! standard  Standard   standard   ""       SDK_INTEGRATION | ABI_SPLITS
//! foss      FOSS       foss       "-foss"  ABI_SPLITS
//! ```

use std::fmt;

use bitflags::bitflags;
use clap::ValueEnum;

use crate::error::PipelineError;

bitflags! {
    /// Build features a flavor turns on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FlavorFeatures: u8 {
        /// Proprietary SDK classpath, plugin and services file.
        const SDK_INTEGRATION = 0x01;

        /// One APK per ABI.
        const ABI_SPLITS = 0x02;
    }
}

/// Static description of one flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlavorSpec {
    pub name: &'static str,
    pub display: &'static str,
    /// Value written to `expo.extra.flavor` and `APP_VARIANT`.
    pub marker: &'static str,
    /// Appended after the version in artifact names.
    pub suffix: &'static str,
    pub features: FlavorFeatures,
}

pub const STANDARD: FlavorSpec = FlavorSpec {
    name: "standard",
    display: "Standard",
    marker: "standard",
    suffix: "",
    features: FlavorFeatures::SDK_INTEGRATION.union(FlavorFeatures::ABI_SPLITS),
};

pub const FOSS: FlavorSpec = FlavorSpec {
    name: "foss",
    display: "FOSS",
    marker: "foss",
    suffix: "-foss",
    features: FlavorFeatures::ABI_SPLITS,
};

/// Every flavor, in build order.
pub const FLAVORS: [FlavorSpec; 2] = [STANDARD, FOSS];

impl FlavorSpec {
    /// Looks a flavor up by name.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::UnknownFlavor` for names not in the registry.
    pub fn lookup(name: &str) -> Result<Self, PipelineError> {
        FLAVORS
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| PipelineError::UnknownFlavor(name.to_string()))
    }

    #[must_use]
    pub const fn has_sdk(&self) -> bool {
        self.features.contains(FlavorFeatures::SDK_INTEGRATION)
    }

    /// Whether `other` can build on top of this flavor's generated project.
    ///
    /// SDK patches cannot be undone in place, so a native project generated
    /// for one side of the SDK split is never reused for the other.
    #[must_use]
    pub const fn compatible_with(&self, other: &Self) -> bool {
        self.has_sdk() == other.has_sdk()
    }
}

impl fmt::Display for FlavorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Which flavors a run builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FlavorSelector {
    /// Only the standard flavor.
    Standard,
    /// Only the FOSS flavor.
    Foss,
    /// Every flavor, standard first.
    #[default]
    All,
}

impl FlavorSelector {
    /// The selected flavors in build order.
    #[must_use]
    pub fn flavors(self) -> Vec<FlavorSpec> {
        match self {
            Self::Standard => vec![STANDARD],
            Self::Foss => vec![FOSS],
            Self::All => FLAVORS.to_vec(),
        }
    }
}

impl fmt::Display for FlavorSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Standard => "standard",
            Self::Foss => "foss",
            Self::All => "all",
        };
        f.write_str(s)
    }
}

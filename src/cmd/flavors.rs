// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Flavors command: prints the flavor registry.

use crate::pipeline::flavor::{FLAVORS, FlavorFeatures, FlavorSpec};

/// Prints every known flavor in build order.
pub fn run_flavors_command() {
    for flavor in &FLAVORS {
        println!("{}", describe_flavor(flavor));
    }
}

/// One registry line: name, display name, artifact suffix and features.
#[must_use]
pub fn describe_flavor(flavor: &FlavorSpec) -> String {
    let mut features = Vec::new();
    if flavor.features.contains(FlavorFeatures::SDK_INTEGRATION) {
        features.push("sdk");
    }
    if flavor.features.contains(FlavorFeatures::ABI_SPLITS) {
        features.push("abi-splits");
    }
    let suffix = if flavor.suffix.is_empty() {
        "(none)"
    } else {
        flavor.suffix
    };
    format!(
        "{:<10} {:<10} suffix={:<8} features={}",
        flavor.name,
        flavor.display,
        suffix,
        features.join(",")
    )
}

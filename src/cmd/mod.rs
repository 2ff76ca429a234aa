// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis), flavors, patch, release
//! ```

pub mod config;
pub mod flavors;
pub mod patch;
pub mod release;

#[cfg(test)]
mod tests;

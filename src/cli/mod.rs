// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for flavorbuild using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! flavorbuild [global options] <command>
//! version
//! options
//! inis
//! flavors
//! release [--flavor F] [--version-override X.Y.Z] [--ci-output FILE]
//! patch   [--flavor F] [--manifest-only]
//! ```

pub mod global;
pub mod release;


use crate::cli::global::GlobalOptions;
use crate::cli::release::{PatchArgs, ReleaseArgs};
use clap::{Parser, Subcommand};

/// Multi-flavor Android release orchestrator
///
/// Builds signed release artifacts for every flavor of an Expo app.
#[derive(Debug, Parser)]
#[command(
    name = "flavorbuild",
    author,
    version,
    about = "Multi-flavor Android release orchestrator",
    long_about = "flavorbuild Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Regenerates, patches, signs and compiles each flavor of an Expo\n\
                  Android app, then collects the artifacts into one release\n\
                  directory. `flavorbuild release` builds every flavor; see\n\
                  `flavorbuild <command> --help` for more information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  flavorbuild reads `flavorbuild.toml` from the current directory\n\
                  if present, then every file given with --ini, then FLAVORBUILD_*\n\
                  environment variables (FLAVORBUILD_SIGNING__KEY_ALIAS=upload),\n\
                  then --set overrides. Later sources win."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files in load order.
    Inis,

    /// Lists the known flavors.
    Flavors,

    /// Builds release artifacts for the selected flavors.
    Release(ReleaseArgs),

    /// Patches an already generated native project for one flavor.
    Patch(PatchArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}

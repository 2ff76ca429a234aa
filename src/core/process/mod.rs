// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::new("gradlew")
//!   .args() .cwd() .env() .keep_stderr()
//!   .run()
//!       --> tokio::process::Command
//!           stream stdout/stderr to tracing
//!       --> Ok(()) or ProcessError (kept stderr logged at error)
//! ```

pub mod builder;
mod io;
mod runner;
#[cfg(test)]
mod tests;

// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        release / patch / flavors
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |   config  ->  RunConfig   |
//!              |  TOML, env, CLI overrides |
//!              '-------------+-------------'
//!                            v
//!                 pipeline::orchestrator
//!            version -> flavor loop -> export
//!                            |
//!                     FlavorPipeline
//!       configure / regenerate / patch / compile / collect
//!          |            |          |         |
//!       project       tools      patch     tools
//!     (app.json)   prebuild   gradle +   gradlew
//!                             manifest
//!
//!   +-----------------------------------------+
//!   |  core      process (spawn, stream, PATH) |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod patch;
pub mod pipeline;
pub mod project;
pub mod tools;
pub mod utility;
pub mod version;

// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem helpers shared by the patchers and the artifact collector.
//!
//! ```text
//! atomic:  write_atomic()     NamedTempFile in target dir --> persist
//! copy:    copy_file_async()  tokio::fs::copy, parents created
//!          move_file_async()  rename, falls back to copy + remove
//!                             across filesystems
//! ```

pub mod atomic;
pub mod copy;

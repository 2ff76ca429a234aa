// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   atomic:  write_atomic()          temp file + rename
//!   copy:    copy_file_async()       create parents, overwrite
//!            move_file_async()       rename, copy+remove fallback
//! ```

pub mod fs;

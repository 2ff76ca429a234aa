// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Stages of one flavor build.
//!
//! ```text
//! Configure --> Regenerate --> Patch --> Compile --> Collect --> Success
//!     |             |            |          |           |
//!     +-------------+------------+----------+-----------+--> Failed(stage)
//! ```

use std::fmt;

/// One step of the flavor pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Configure,
    Regenerate,
    Patch,
    Compile,
    Collect,
}

impl Stage {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Configure => "configure",
            Self::Regenerate => "regenerate",
            Self::Patch => "patch",
            Self::Compile => "compile",
            Self::Collect => "collect",
        }
    }

    /// The stage after this one, `None` after `Collect`.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Configure => Some(Self::Regenerate),
            Self::Regenerate => Some(Self::Patch),
            Self::Patch => Some(Self::Compile),
            Self::Compile => Some(Self::Collect),
            Self::Collect => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a flavor build ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    Pending,
    Running(Stage),
    Success,
    Failed(Stage),
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Running(stage) => write!(f, "running {stage}"),
            Self::Success => f.write_str("success"),
            Self::Failed(stage) => write!(f, "failed during {stage}"),
        }
    }
}

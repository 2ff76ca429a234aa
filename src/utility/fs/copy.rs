// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, Result};
use anyhow::Context;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Copies a single file, creating the destination's parent directory and
/// overwriting any existing file.
///
/// # Example
/// ```no_run
/// use flavorbuild::utility::fs::copy::copy_file_async;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// copy_file_async(
///     Path::new("google-services.json"),
///     Path::new("android/app/google-services.json"),
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
/// # Errors
///
/// Returns `FsError::NotFound` if `src` does not exist, or an error if the
/// parent directory cannot be created or the copy fails.
pub async fn copy_file_async(src: &Path, dst: &Path) -> Result<()> {
    ensure_source(src).await?;
    if let Some(parent) = dst.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    fs::copy(src, dst)
        .await
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// Moves a file, replacing any existing destination.
///
/// Tries a rename first; when that fails (typically a cross-device move) the
/// file is copied and the source removed.
///
/// # Errors
///
/// Returns an error if both the rename and the copy fallback fail, or if the
/// source cannot be removed after copying. A missing `src` is
/// `FsError::NotFound`.
pub async fn move_file_async(src: &Path, dst: &Path) -> Result<()> {
    ensure_source(src).await?;
    if let Some(parent) = dst.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    match fs::rename(src, dst).await {
        Ok(()) => Ok(()),
        Err(e) => {
            debug!(
                src = %src.display(),
                dst = %dst.display(),
                error = %e,
                "rename failed, copying instead"
            );
            fs::copy(src, dst).await.with_context(|| {
                format!("failed to copy {} to {}", src.display(), dst.display())
            })?;
            fs::remove_file(src)
                .await
                .with_context(|| format!("failed to remove {}", src.display()))?;
            Ok(())
        }
    }
}

async fn ensure_source(src: &Path) -> Result<()> {
    if fs::try_exists(src).await.unwrap_or(false) {
        Ok(())
    } else {
        Err(FsError::NotFound(src.display().to_string()).into())
    }
}

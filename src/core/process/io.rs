// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output streaming and capture.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks   line by line
//!     FORWARD_TO_LOG  --> debug!(process, stream, line)
//!     KEEP_IN_STRING  --> collected String
//!   wait for exit, join readers
//!   --> (exit code, kept stderr)
//! ```

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::builder::{ProcessBuilder, StreamFlags};
use crate::error::Result;

/// Spawns a reader task for one piped stream.
fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &'static str,
) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let name = process_name.to_string();
    stream.map(|stream| tokio::spawn(read_stream(stream, flags, name, stream_name)))
}

async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}

impl ProcessBuilder {
    /// Runs the child process, streaming its output and waiting for exit.
    ///
    /// Returns the exit code (`-1` when killed by a signal) and the kept
    /// stderr.
    pub(super) async fn run_child(&self, name: &str, child: &mut Child) -> Result<(i32, String)> {
        let stdout = spawn_reader(child.stdout.take(), StreamFlags::default(), name, "stdout");
        let stderr = spawn_reader(child.stderr.take(), self.stderr_flags(), name, "stderr");

        let status = child
            .wait()
            .await
            .with_context(|| format!("failed waiting for process {name}"))?;

        join_reader(stdout).await;
        Ok((status.code().unwrap_or(-1), join_reader(stderr).await))
    }
}

/// Reads a stream line by line, forwarding and/or collecting each line.
async fn read_stream<R>(
    reader: R,
    flags: StreamFlags,
    process_name: String,
    stream_name: &'static str,
) -> String
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut collected = String::new();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    debug!(process = %process_name, stream = stream_name, "{line}");
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    if !collected.is_empty() {
                        collected.push('\n');
                    }
                    collected.push_str(&line);
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(
                    process = %process_name,
                    stream = stream_name,
                    error = %e,
                    "error reading stream"
                );
                break;
            }
        }
    }

    collected
}

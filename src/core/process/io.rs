// clustergit-rs: Git Repository Cluster Status Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and output capture for processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks
//!   mpsc channels buffer lines
//!   (MERGE_STDERR: both readers feed the stdout channel)
//!   wait
//!   --> ProcessOutput { stdout, stderr, exit_code }
//! ```

use crate::error::Result;
use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};

/// Spawns a reader task for one child stream if its flags ask for the output.
fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &'static str,
    tx: mpsc::UnboundedSender<String>,
) -> Option<JoinHandle<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    if !flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING) {
        return None;
    }
    stream.map(|stream| {
        let name = process_name.to_string();
        tokio::spawn(async move {
            read_stream(stream, flags, &name, stream_name, tx).await;
        })
    })
}

/// Collects output from a channel into a string.
fn collect_output(rx: &mut mpsc::UnboundedReceiver<String>, keep: bool) -> String {
    if !keep {
        return String::new();
    }
    let mut output = String::new();
    while let Ok(line) = rx.try_recv() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&line);
    }
    output
}

/// Waits for reader tasks to complete.
async fn await_readers(stdout_handle: Option<JoinHandle<()>>, stderr_handle: Option<JoinHandle<()>>) {
    if let Some(handle) = stdout_handle {
        let _ = handle.await;
    }
    if let Some(handle) = stderr_handle {
        let _ = handle.await;
    }
}

impl ProcessBuilder {
    /// Runs the child process, handling I/O streaming and waiting for completion.
    pub(super) async fn run_child(&self, name: &str, child: &mut Child) -> Result<ProcessOutput> {
        let (stdout_tx, mut stdout_rx) = mpsc::unbounded_channel::<String>();
        let (stderr_tx, mut stderr_rx) = mpsc::unbounded_channel::<String>();

        let merge = self.process_flags().contains(ProcessFlags::MERGE_STDERR);
        let stderr_sink = if merge { stdout_tx.clone() } else { stderr_tx };

        let stdout_flags = self.stdout_stream();
        let stderr_flags = self.stderr_stream();

        let stdout_handle = spawn_reader(child.stdout.take(), stdout_flags, name, "stdout", stdout_tx);
        let stderr_handle =
            spawn_reader(child.stderr.take(), stderr_flags, name, "stderr", stderr_sink);

        let exit_status = child
            .wait()
            .await
            .with_context(|| format!("failed waiting for process {name} to exit"))?;

        await_readers(stdout_handle, stderr_handle).await;

        let keep_stdout = stdout_flags.contains(StreamFlags::KEEP_IN_STRING);
        let keep_stderr = stderr_flags.contains(StreamFlags::KEEP_IN_STRING) && !merge;

        Ok(ProcessOutput::new(
            exit_status.code().unwrap_or(-1),
            collect_output(&mut stdout_rx, keep_stdout),
            collect_output(&mut stderr_rx, keep_stderr),
        ))
    }
}

/// Reads from a stream line by line, logging and/or keeping each line.
///
/// Lines are decoded lossily so a byte that is not UTF-8 never stops the
/// reader. The pipe is drained until EOF or a read error; closing it early
/// would kill the child with SIGPIPE.
async fn read_stream<R>(
    reader: R,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &str,
    tx: mpsc::UnboundedSender<String>,
) where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = decode_line(&buf);
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    trace!(process = %process_name, stream = %stream_name, line = %line, "output");
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    let _ = tx.send(line);
                }
            }
            Err(e) => {
                warn!(process = %process_name, stream = %stream_name, error = %e, "read failed");
                break;
            }
        }
    }
}

/// One raw line without its `\n` or `\r\n` terminator.
pub(super) fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

//! Capture source worker.
//!
//! Spawns the trace producer as a child process and pushes each stdout
//! line onto the raw queue until cancellation or end of stream. A replay
//! command reaching EOF ends this worker only; the rest of the pipeline
//! keeps draining whatever is already queued.

use std::process::Stdio;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use blodhund_core::channels::RawLineSender;

use crate::command::ExternalCommand;

/// Capture source error conditions.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Failed to spawn capture command: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("Capture command produced no stdout handle")]
    MissingStdout,
    #[error("Trace stream read error: {0}")]
    Read(#[source] std::io::Error),
}

/// Run the capture loop until cancellation or end of trace.
pub async fn run(
    command: &ExternalCommand,
    raw_tx: RawLineSender,
    cancel: CancellationToken,
) -> Result<(), CaptureError> {
    info!(command = %command, "Capture source starting");

    let mut child = Command::new(&command.program)
        .args(&command.args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(CaptureError::Spawn)?;

    let stdout = child.stdout.take().ok_or(CaptureError::MissingStdout)?;
    let mut lines = BufReader::new(stdout).lines();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Capture source cancelled, terminating trace producer");
                let _ = child.kill().await;
                break;
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if raw_tx.send(line).is_err() {
                        debug!("Raw queue closed, stopping capture source");
                        break;
                    }
                }
                Ok(None) => {
                    info!("Capture source reached end of trace");
                    break;
                }
                Err(e) => return Err(CaptureError::Read(e)),
            }
        }
    }

    Ok(())
}

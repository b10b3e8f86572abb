//! External command execution.
//!
//! All active probing goes through this seam. A non-zero exit or stderr
//! content is data for the caller to log, never an error; only failing to
//! run the command at all surfaces as [`EngineError::Exec`], which the
//! scheduler treats as a cycle fault.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use blodhund_capture::ExternalCommand;

use crate::EngineError;

/// Captured output of one external invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Synchronous-per-caller command execution contract.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &ExternalCommand) -> Result<CommandOutput, EngineError>;
}

/// Runs commands as real child processes with captured output.
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor;

#[async_trait]
impl CommandExecutor for ShellExecutor {
    async fn execute(&self, command: &ExternalCommand) -> Result<CommandOutput, EngineError> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .output()
            .await
            .map_err(EngineError::Exec)?;

        let output = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        };

        if !output.success() {
            debug!(command = %command, status = ?output.status, "External command exited non-zero");
        }

        Ok(output)
    }
}

//! Shared fixtures for engine tests.

use async_trait::async_trait;
use parking_lot::Mutex;

use blodhund_capture::ExternalCommand;
use blodhund_core::events::{DeviceAddress, ParsedResult};

use crate::executor::{CommandExecutor, CommandOutput};
use crate::EngineError;

pub(crate) fn parse_address(s: &str) -> DeviceAddress {
    s.parse().unwrap()
}

/// A result carrying only an address, as a classic inquiry with no
/// attributes would produce.
pub(crate) fn plain_result(address: &str) -> ParsedResult {
    let mut result = ParsedResult::new();
    result.set_address(parse_address(address));
    result
}

/// A result flagged as low-energy traffic.
pub(crate) fn le_result(address: &str) -> ParsedResult {
    let mut result = plain_result(address);
    result.set_le_mode(true);
    result
}

/// Records every executed command line and reports success for all of
/// them.
#[derive(Debug, Default)]
pub(crate) struct RecordingExecutor {
    commands: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    pub(crate) fn recorded(&self) -> Vec<String> {
        self.commands.lock().clone()
    }
}

#[async_trait]
impl CommandExecutor for RecordingExecutor {
    async fn execute(&self, command: &ExternalCommand) -> Result<CommandOutput, EngineError> {
        self.commands.lock().push(command.to_string());
        Ok(CommandOutput {
            status: Some(0),
            ..CommandOutput::default()
        })
    }
}

/// Fails every execution as if the binary were missing.
#[derive(Debug, Default)]
pub(crate) struct FailingExecutor;

#[async_trait]
impl CommandExecutor for FailingExecutor {
    async fn execute(&self, _command: &ExternalCommand) -> Result<CommandOutput, EngineError> {
        Err(EngineError::Exec(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such binary",
        )))
    }
}

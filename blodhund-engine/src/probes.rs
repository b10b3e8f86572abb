//! External tool invocations for active probing.
//!
//! One builder per probe so the scheduler stays free of string assembly:
//! adapter reset via `hciconfig`, discovery via the configured tool, info
//! queries via `hcitool` (the LE variant with the random-address flag),
//! liveness via `l2ping`.

use blodhund_capture::ExternalCommand;
use blodhund_core::events::DeviceAddress;

/// Probe command factory bound to one adapter.
#[derive(Debug, Clone)]
pub struct ProbeCommands {
    interface: String,
    discovery_tool: String,
}

impl ProbeCommands {
    pub fn new(interface: impl Into<String>, discovery_tool: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            discovery_tool: discovery_tool.into(),
        }
    }

    pub fn adapter_reset(&self) -> ExternalCommand {
        ExternalCommand::new("hciconfig")
            .arg(&self.interface)
            .arg("reset")
    }

    pub fn discovery(&self) -> ExternalCommand {
        ExternalCommand::new(&self.discovery_tool)
            .arg("-i")
            .arg(&self.interface)
    }

    pub fn info(&self, address: &DeviceAddress) -> ExternalCommand {
        ExternalCommand::new("hcitool")
            .arg("-i")
            .arg(&self.interface)
            .arg("info")
            .arg(address.as_str())
    }

    pub fn le_info(&self, address: &DeviceAddress) -> ExternalCommand {
        ExternalCommand::new("hcitool")
            .arg("-i")
            .arg(&self.interface)
            .arg("leinfo")
            .arg("--random")
            .arg(address.as_str())
    }

    pub fn l2ping(&self, address: &DeviceAddress) -> ExternalCommand {
        ExternalCommand::new("l2ping")
            .arg("-c")
            .arg("3")
            .arg("-i")
            .arg(&self.interface)
            .arg(address.as_str())
    }
}

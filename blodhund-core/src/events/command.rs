//! Active-probe commands emitted by the result aggregator and consumed by
//! the discovery scheduler.

use std::fmt;

use super::DeviceAddress;

/// The probe kinds tracked per device in the query history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    /// Classic-mode info query.
    Info,
    /// Low-energy info query (randomized-address variant).
    Le,
    /// Liveness ping.
    L2Ping,
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeKind::Info => f.write_str("info"),
            ProbeKind::Le => f.write_str("le"),
            ProbeKind::L2Ping => f.write_str("l2ping"),
        }
    }
}

/// An active probe to run against a device.
///
/// `Info` and `LeInfo` travel on the info-scan queue, `L2Ping` on the
/// liveness-ping queue; both queues drain into the single discovery
/// scheduler worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanCommand {
    Info { address: DeviceAddress },
    LeInfo { address: DeviceAddress },
    L2Ping { address: DeviceAddress },
}

impl ScanCommand {
    pub fn address(&self) -> &DeviceAddress {
        match self {
            ScanCommand::Info { address }
            | ScanCommand::LeInfo { address }
            | ScanCommand::L2Ping { address } => address,
        }
    }

    pub fn kind(&self) -> ProbeKind {
        match self {
            ScanCommand::Info { .. } => ProbeKind::Info,
            ScanCommand::LeInfo { .. } => ProbeKind::Le,
            ScanCommand::L2Ping { .. } => ProbeKind::L2Ping,
        }
    }
}

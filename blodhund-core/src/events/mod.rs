//! Event types flowing through the discovery pipeline.
//!
//! The pipeline hands data one-directional: raw trace lines are grouped
//! into [`Chunk`]s, chunks are parsed into [`ParsedResult`]s, and results
//! feed the device repository. The result aggregator emits
//! [`ScanCommand`]s back to the discovery scheduler as the only feedback
//! loop.

mod address;
mod command;
mod record;

pub use address::{AddressParseError, DeviceAddress};
pub use command::{ProbeKind, ScanCommand};
pub use record::{Chunk, ParsedResult, RawLine};

//! Trace records: raw lines, chunked protocol records, and parsed results.

use std::collections::HashMap;

use super::DeviceAddress;

/// One line of monitor trace text. Opaque to the pipeline core.
pub type RawLine = String;

/// A grouped sequence of raw lines representing one protocol record.
///
/// The chunker owns the grouping rules; downstream stages treat a chunk
/// purely as a unit of work for the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk(Vec<RawLine>);

impl Chunk {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, line: RawLine) {
        self.0.push(line);
    }

    pub fn lines(&self) -> &[RawLine] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<RawLine>> for Chunk {
    fn from(lines: Vec<RawLine>) -> Self {
        Self(lines)
    }
}

/// Attribute mapping produced per chunk by the parser.
///
/// A result must carry an address to be actionable; results without one
/// are logged and dropped by the aggregator and never reach the device
/// repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResult {
    address: Option<DeviceAddress>,
    attributes: HashMap<String, String>,
    le_mode: bool,
    classic_mode: bool,
}

impl ParsedResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_address(&mut self, address: DeviceAddress) {
        self.address = Some(address);
    }

    pub fn address(&self) -> Option<&DeviceAddress> {
        self.address.as_ref()
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    pub fn set_le_mode(&mut self, value: bool) {
        self.le_mode = value;
    }

    pub fn le_mode(&self) -> bool {
        self.le_mode
    }

    pub fn set_classic_mode(&mut self, value: bool) {
        self.classic_mode = value;
    }

    pub fn classic_mode(&self) -> bool {
        self.classic_mode
    }
}

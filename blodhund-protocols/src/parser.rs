//! Attribute extraction from a protocol record.
//!
//! Pure mapping from chunk to [`ParsedResult`]. Any recognizable device
//! record yields an `address` attribute; LE advertising/meta records set
//! `le_mode`, inquiry/remote-name/connect records set `classic_mode`.

use lazy_static::lazy_static;
use regex::Regex;

use blodhund_core::events::{Chunk, DeviceAddress, ParsedResult};

lazy_static! {
    static ref ADDRESS_RE: Regex =
        Regex::new(r"Address: ((?:[0-9A-Fa-f]{2}:){5}[0-9A-Fa-f]{2})").unwrap();
    static ref NAME_RE: Regex =
        Regex::new(r"Name(?: \((?:complete|short)\))?: (.+)").unwrap();
    static ref RSSI_RE: Regex = Regex::new(r"RSSI: (-?\d+) dBm").unwrap();
    static ref COMPANY_RE: Regex = Regex::new(r"Company: (.+?) \(\d+\)").unwrap();
}

const LE_MARKERS: &[&str] = &["LE Meta Event", "LE Advertising Report", "LE Extended Advertising Report"];

const CLASSIC_MARKERS: &[&str] = &[
    "Inquiry Result",
    "Extended Inquiry Result",
    "Remote Name Req",
    "Connect Request",
    "Connect Complete",
];

/// Stateless chunk parser.
pub struct Parser;

impl Parser {
    /// Parse one record into an attribute mapping.
    pub fn parse(chunk: &Chunk) -> ParsedResult {
        let mut result = ParsedResult::new();

        for line in chunk.lines() {
            if result.address().is_none() {
                if let Some(captures) = ADDRESS_RE.captures(line) {
                    if let Ok(address) = captures[1].parse::<DeviceAddress>() {
                        result.set_address(address);
                    }
                }
            }

            if let Some(captures) = NAME_RE.captures(line) {
                result.set_attribute("name", captures[1].trim());
            }
            if let Some(captures) = RSSI_RE.captures(line) {
                result.set_attribute("rssi", &captures[1]);
            }
            if let Some(captures) = COMPANY_RE.captures(line) {
                result.set_attribute("company", &captures[1]);
            }

            if LE_MARKERS.iter().any(|marker| line.contains(marker)) {
                result.set_le_mode(true);
            }
            if CLASSIC_MARKERS.iter().any(|marker| line.contains(marker)) {
                result.set_classic_mode(true);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(lines: &[&str]) -> Chunk {
        lines
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn extracts_address_and_le_mode_from_advertising_report() {
        let result = Parser::parse(&chunk(&[
            "> HCI Event: LE Meta Event (0x3e) plen 42",
            "        LE Advertising Report (0x02)",
            "          Address: 5c:f3:70:6b:57:f2 (OUI 5C-F3-70)",
            "          RSSI: -71 dBm (0xb9)",
        ]));

        assert_eq!(result.address().unwrap().as_str(), "5C:F3:70:6B:57:F2");
        assert!(result.le_mode());
        assert!(!result.classic_mode());
        assert_eq!(result.attribute("rssi"), Some("-71"));
    }

    #[test]
    fn extracts_classic_mode_from_extended_inquiry() {
        let result = Parser::parse(&chunk(&[
            "> HCI Event: Extended Inquiry Result (0x2f) plen 255",
            "        Address: 00:1A:7D:DA:71:13 (cyber-blue(HK)Ltd)",
            "        Name (complete): BT Speaker",
            "        Company: Apple, Inc. (76)",
        ]));

        assert_eq!(result.address().unwrap().as_str(), "00:1A:7D:DA:71:13");
        assert!(result.classic_mode());
        assert!(!result.le_mode());
        assert_eq!(result.attribute("name"), Some("BT Speaker"));
        assert_eq!(result.attribute("company"), Some("Apple, Inc."));
    }

    #[test]
    fn first_address_wins() {
        let result = Parser::parse(&chunk(&[
            "> HCI Event: Connect Complete",
            "        Address: 00:11:22:33:44:55 (first)",
            "        Address: AA:BB:CC:DD:EE:FF (second)",
        ]));
        assert_eq!(result.address().unwrap().as_str(), "00:11:22:33:44:55");
    }

    #[test]
    fn record_without_address_yields_none() {
        let result = Parser::parse(&chunk(&[
            "< HCI Command: Inquiry (0x01|0x0001) plen 5",
            "        Lap: 0x9e8b33",
        ]));
        assert!(result.address().is_none());
    }
}

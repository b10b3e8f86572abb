//! # blodhund-protocols
//!
//! Trace structure handling for the discovery pipeline: the chunker groups
//! raw monitor lines into discrete protocol records, the parser extracts
//! per-device attributes from a record.

pub mod chunker;
pub mod parser;

pub use chunker::Chunker;
pub use parser::Parser;

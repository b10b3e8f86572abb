//! # blodhund-capture
//!
//! Capture source for the discovery pipeline: launches the external trace
//! producer (live `btmon` or a file replay command) and streams its stdout
//! into the raw-line queue.

pub mod command;
pub mod source;

pub use command::ExternalCommand;
pub use source::{run, CaptureError};

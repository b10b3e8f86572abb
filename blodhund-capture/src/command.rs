//! External command descriptions.
//!
//! The pipeline treats every external invocation as an opaque program plus
//! argument list; no shell is involved. The capture command is built from
//! configuration and handed explicitly to the runner.

use std::fmt;
use std::path::Path;

/// A program invocation for an external tool or trace producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Live controller-monitor capture from the given adapter.
    pub fn live_trace(interface: &str) -> Self {
        Self::new("btmon").arg("-T").arg("-i").arg(interface)
    }

    /// Replay of a recorded trace file; `.xz` files are decompressed on
    /// the fly.
    pub fn replay_trace(file: &Path) -> Self {
        let program = if file.extension().is_some_and(|ext| ext == "xz") {
            "xzcat"
        } else {
            "cat"
        };
        Self::new(program).arg(file.to_string_lossy())
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

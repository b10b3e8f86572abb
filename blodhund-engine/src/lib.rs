//! # blodhund-engine
//!
//! Runtime orchestration for the discovery pipeline: the runner owns the
//! five queues and the lifecycle of all workers, the discovery scheduler
//! drives active probing, and the result aggregator turns parsed results
//! into device state and probe commands.
//!
//! Failure model: a worker fault is logged and ends that worker only; the
//! pipeline keeps running degraded until an operator stops it. The one
//! self-healing spot is the discovery cycle, which backs off and resumes
//! after a crashed iteration.

mod aggregator;
mod error;
mod executor;
mod history;
mod probes;
mod runner;
mod scheduler;

pub use aggregator::ResultAggregator;
pub use error::EngineError;
pub use executor::{CommandExecutor, CommandOutput, ShellExecutor};
pub use history::QueryHistory;
pub use probes::ProbeCommands;
pub use runner::Runner;
pub use scheduler::DiscoveryScheduler;

#[cfg(test)]
pub(crate) mod testing;

//! Engine error conditions.

use thiserror::Error;

use blodhund_capture::CaptureError;
use blodhund_store::StoreError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Runner is already running; stop it before starting again")]
    AlreadyRunning,

    #[error("Replay mode requires a trace file in the capture configuration")]
    MissingReplayFile,

    #[error("Capture source error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Device store error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to run external command: {0}")]
    Exec(#[source] std::io::Error),
}

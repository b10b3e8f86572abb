//! Typed channel set connecting the pipeline workers.
//!
//! Five unbounded FIFO channels: raw lines, chunks, parsed results, and
//! the two command queues (info-scan, liveness-ping). Channels are the
//! only synchronization primitive crossing worker boundaries; senders are
//! cheap to clone for the multi-producer queues. There is no backpressure
//! by contract: depth on the result queue is surfaced as a log warning,
//! never as throttling.

use tokio::sync::mpsc;

use crate::events::{Chunk, ParsedResult, RawLine, ScanCommand};

pub type RawLineSender = mpsc::UnboundedSender<RawLine>;
pub type RawLineReceiver = mpsc::UnboundedReceiver<RawLine>;

pub type ChunkSender = mpsc::UnboundedSender<Chunk>;
pub type ChunkReceiver = mpsc::UnboundedReceiver<Chunk>;

pub type ResultSender = mpsc::UnboundedSender<ParsedResult>;
pub type ResultReceiver = mpsc::UnboundedReceiver<ParsedResult>;

pub type CommandSender = mpsc::UnboundedSender<ScanCommand>;
pub type CommandReceiver = mpsc::UnboundedReceiver<ScanCommand>;

pub fn raw_line_channel() -> (RawLineSender, RawLineReceiver) {
    mpsc::unbounded_channel()
}

pub fn chunk_channel() -> (ChunkSender, ChunkReceiver) {
    mpsc::unbounded_channel()
}

pub fn result_channel() -> (ResultSender, ResultReceiver) {
    mpsc::unbounded_channel()
}

pub fn command_channel() -> (CommandSender, CommandReceiver) {
    mpsc::unbounded_channel()
}

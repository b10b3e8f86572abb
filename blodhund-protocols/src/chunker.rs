//! Record-boundary grouping of raw trace lines.
//!
//! `btmon` prints one record header per HCI packet, prefixed with a stream
//! marker (`<` command, `>` event, `@` user channel, `*` system note,
//! `=` monitor metadata); detail lines are indented below the header. A
//! chunk is the header plus its continuation lines. Ordering is preserved;
//! the pending chunk is flushed when the raw queue closes.

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use blodhund_core::channels::{ChunkSender, RawLineReceiver};
use blodhund_core::events::Chunk;

/// Returns true when a line opens a new protocol record.
pub fn is_record_start(line: &str) -> bool {
    matches!(
        line.as_bytes().first(),
        Some(b'<' | b'>' | b'@' | b'*' | b'=')
    )
}

/// Groups raw lines into protocol-record chunks.
pub struct Chunker {
    current: Chunk,
}

impl Chunker {
    pub fn new() -> Self {
        Self {
            current: Chunk::new(),
        }
    }

    /// Feed one line; returns a completed chunk when the line opens the
    /// next record.
    pub fn feed(&mut self, line: String) -> Option<Chunk> {
        if is_record_start(&line) {
            let completed = if self.current.is_empty() {
                None
            } else {
                Some(std::mem::take(&mut self.current))
            };
            self.current.push(line);
            return completed;
        }

        if self.current.is_empty() {
            // Preamble before the first record (version banners etc).
            trace!(line, "Skipping line outside any record");
            return None;
        }

        self.current.push(line);
        None
    }

    /// Take whatever record is still being accumulated.
    pub fn flush(&mut self) -> Option<Chunk> {
        if self.current.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.current))
        }
    }

    /// Consume the raw queue until cancellation or close, emitting one
    /// chunk per record boundary.
    pub async fn run(
        mut self,
        mut raw_rx: RawLineReceiver,
        chunk_tx: ChunkSender,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Chunker cancelled");
                    break;
                }
                line = raw_rx.recv() => match line {
                    Some(line) => {
                        if let Some(chunk) = self.feed(line) {
                            if chunk_tx.send(chunk).is_err() {
                                debug!("Chunk queue closed, stopping chunker");
                                return;
                            }
                        }
                    }
                    None => {
                        debug!("Raw queue closed, flushing final record");
                        if let Some(chunk) = self.flush() {
                            let _ = chunk_tx.send(chunk);
                        }
                        break;
                    }
                }
            }
        }
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new()
    }
}

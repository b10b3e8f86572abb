//! Pipeline runner.
//!
//! Owns the queues and the lifecycle of every worker. Workers are not
//! supervised: one dying is logged and leaves the rest of the pipeline
//! running degraded. Shutdown is cooperative, a shared cancellation token
//! that every worker loop observes.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use blodhund_capture::{self as capture, ExternalCommand};
use blodhund_config::BlodhundConfig;
use blodhund_core::channels::{
    chunk_channel, command_channel, raw_line_channel, result_channel, ChunkReceiver, ResultSender,
};
use blodhund_core::time::{Clock, SystemClock};
use blodhund_protocols::{Chunker, Parser};
use blodhund_store::DeviceStore;
use blodhund_telemetry::MetricsRecorder;

use crate::aggregator::ResultAggregator;
use crate::executor::CommandExecutor;
use crate::probes::ProbeCommands;
use crate::scheduler::DiscoveryScheduler;
use crate::EngineError;

pub struct Runner {
    config: BlodhundConfig,
    store: Arc<dyn DeviceStore>,
    executor: Arc<dyn CommandExecutor>,
    clock: Arc<dyn Clock>,
    metrics: MetricsRecorder,
    cancel: Option<CancellationToken>,
    workers: Vec<(&'static str, JoinHandle<()>)>,
}

impl Runner {
    pub fn new(
        config: BlodhundConfig,
        store: Arc<dyn DeviceStore>,
        executor: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self::with_clock(config, store, executor, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: BlodhundConfig,
        store: Arc<dyn DeviceStore>,
        executor: Arc<dyn CommandExecutor>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            store,
            executor,
            clock,
            metrics: MetricsRecorder::new(),
            cancel: None,
            workers: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.cancel.is_some()
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    /// Trace producer for the configured capture mode.
    fn capture_command(&self) -> Result<ExternalCommand, EngineError> {
        if self.config.capture.is_replay() {
            let file = self
                .config
                .capture
                .file
                .as_deref()
                .ok_or(EngineError::MissingReplayFile)?;
            Ok(ExternalCommand::replay_trace(file))
        } else {
            Ok(ExternalCommand::live_trace(&self.config.capture.interface))
        }
    }

    /// Spawn all workers. Fails without side effects when already running
    /// or when replay mode lacks a trace file.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.is_running() {
            return Err(EngineError::AlreadyRunning);
        }

        let command = self.capture_command()?;
        let replay = self.config.capture.is_replay();
        info!(mode = %self.config.capture.mode, %command, "Starting pipeline");

        let cancel = CancellationToken::new();
        let (raw_tx, raw_rx) = raw_line_channel();
        let (chunk_tx, chunk_rx) = chunk_channel();
        let (result_tx, result_rx) = result_channel();
        let (info_tx, info_rx) = command_channel();
        let (ping_tx, ping_rx) = command_channel();

        self.spawn_worker("capture", {
            let cancel = cancel.clone();
            async move {
                capture::run(&command, raw_tx, cancel)
                    .await
                    .map_err(EngineError::from)
            }
        });

        self.spawn_worker("chunker", {
            let cancel = cancel.clone();
            async move {
                Chunker::new().run(raw_rx, chunk_tx, cancel).await;
                Ok::<_, EngineError>(())
            }
        });

        self.spawn_worker("parser", {
            let cancel = cancel.clone();
            async move {
                parse_loop(chunk_rx, result_tx, cancel).await;
                Ok::<_, EngineError>(())
            }
        });

        let aggregator = ResultAggregator::new(
            result_rx,
            info_tx,
            ping_tx,
            self.store.clone(),
            self.clock.clone(),
            self.config.scheduler.clone(),
            replay,
            self.metrics.clone(),
        );
        self.spawn_worker("aggregator", {
            let cancel = cancel.clone();
            async move { aggregator.run(cancel).await }
        });

        // Replay traces carry no adapter to probe.
        if !replay {
            let scheduler = DiscoveryScheduler::new(
                info_rx,
                ping_rx,
                self.executor.clone(),
                ProbeCommands::new(
                    &self.config.capture.interface,
                    &self.config.scheduler.discovery_tool,
                ),
                self.config.scheduler.clone(),
                self.metrics.clone(),
            );
            self.spawn_worker("scheduler", {
                let cancel = cancel.clone();
                async move { scheduler.run(cancel).await }
            });
        }

        self.cancel = Some(cancel);
        Ok(())
    }

    /// Cancel every worker and wait for all of them to wind down. A no-op
    /// when the pipeline is not running.
    pub async fn stop(&mut self) {
        let Some(cancel) = self.cancel.take() else {
            debug!("Stop requested but pipeline is not running");
            return;
        };

        info!("Stopping pipeline");
        cancel.cancel();
        for (name, handle) in self.workers.drain(..) {
            if handle.await.is_err() {
                error!(worker = name, "Worker panicked during shutdown");
            }
        }
        info!("Pipeline stopped");
    }

    fn spawn_worker<E, F>(&mut self, name: &'static str, work: F)
    where
        E: std::fmt::Display,
        F: Future<Output = Result<(), E>> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            match work.await {
                Ok(()) => info!(worker = name, "Worker stopped"),
                Err(e) => error!(worker = name, error = %e, "Worker terminated"),
            }
        });
        self.workers.push((name, handle));
    }
}

/// Parse each chunk off the chunk queue onto the result queue.
async fn parse_loop(mut chunk_rx: ChunkReceiver, result_tx: ResultSender, cancel: CancellationToken) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Parser cancelled");
                return;
            }
            chunk = chunk_rx.recv() => match chunk {
                Some(chunk) => {
                    if result_tx.send(Parser::parse(&chunk)).is_err() {
                        debug!("Result queue closed, stopping parser");
                        return;
                    }
                }
                None => {
                    debug!("Chunk queue closed, stopping parser");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingExecutor;
    use blodhund_config::CaptureConfig;
    use blodhund_store::MemoryStore;
    use std::io::Write;
    use std::time::Duration;

    fn replay_config(file: Option<std::path::PathBuf>) -> BlodhundConfig {
        BlodhundConfig {
            capture: CaptureConfig {
                mode: "replay".into(),
                file,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn runner(config: BlodhundConfig, store: Arc<MemoryStore>) -> Runner {
        Runner::new(config, store, Arc::new(RecordingExecutor::default()))
    }

    #[tokio::test]
    async fn replay_trace_flows_into_the_store() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "> HCI Event: LE Meta Event").unwrap();
        writeln!(file, "        Address: 00:11:22:33:44:55 (Vendor)").unwrap();
        writeln!(file, "        Name: Beacon").unwrap();
        writeln!(file, "> HCI Event: LE Meta Event").unwrap();
        writeln!(file, "        Address: AA:BB:CC:DD:EE:FF (Vendor)").unwrap();
        file.flush().unwrap();

        let store = Arc::new(MemoryStore::new());
        let mut runner = runner(replay_config(Some(file.path().into())), store.clone());
        runner.start().unwrap();

        // The aggregator drains once per sweep interval; poll until both
        // devices land.
        let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
        while store.len() < 2 {
            assert!(tokio::time::Instant::now() < deadline, "trace never drained");
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        let device = store.get(&"00:11:22:33:44:55".parse().unwrap()).unwrap();
        assert_eq!(device.name.as_deref(), Some("Beacon"));
        assert!(device.le_mode);

        runner.stop().await;
        assert!(!runner.is_running());
    }

    #[tokio::test]
    async fn starting_twice_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "> HCI Event: Command Complete").unwrap();
        file.flush().unwrap();

        let store = Arc::new(MemoryStore::new());
        let mut runner = runner(replay_config(Some(file.path().into())), store);
        runner.start().unwrap();

        assert!(matches!(runner.start(), Err(EngineError::AlreadyRunning)));
        runner.stop().await;
    }

    #[tokio::test]
    async fn replay_without_file_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let mut runner = runner(replay_config(None), store);

        assert!(matches!(
            runner.start(),
            Err(EngineError::MissingReplayFile)
        ));
        assert!(!runner.is_running());
    }

    #[test]
    fn capture_faults_surface_as_engine_errors() {
        let err = EngineError::from(blodhund_capture::CaptureError::MissingStdout);
        assert!(matches!(err, EngineError::Capture(_)));
        assert!(err.to_string().contains("Capture source error"));
    }

    #[tokio::test]
    async fn stop_without_start_is_a_noop() {
        let store = Arc::new(MemoryStore::new());
        let mut runner = runner(replay_config(None), store);
        runner.stop().await;
        assert!(!runner.is_running());
    }
}

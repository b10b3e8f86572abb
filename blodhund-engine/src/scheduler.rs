//! Discovery scheduler worker (live-capture mode only).
//!
//! One cycle: reset the adapter, let it settle, run the active discovery
//! probe, then drain the command queues. The info-scan queue drains fully
//! while the liveness-ping queue yields one entry at a time, so info scans
//! always win when both are pending. A crashed cycle backs off and
//! resumes; this is the only self-healing worker in the pipeline.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use blodhund_config::SchedulerConfig;
use blodhund_core::channels::CommandReceiver;
use blodhund_core::events::ScanCommand;
use blodhund_telemetry::MetricsRecorder;

use crate::executor::CommandExecutor;
use crate::probes::ProbeCommands;
use crate::EngineError;

pub struct DiscoveryScheduler {
    info_rx: CommandReceiver,
    ping_rx: CommandReceiver,
    executor: Arc<dyn CommandExecutor>,
    probes: ProbeCommands,
    config: SchedulerConfig,
    metrics: MetricsRecorder,
}

impl DiscoveryScheduler {
    pub fn new(
        info_rx: CommandReceiver,
        ping_rx: CommandReceiver,
        executor: Arc<dyn CommandExecutor>,
        probes: ProbeCommands,
        config: SchedulerConfig,
        metrics: MetricsRecorder,
    ) -> Self {
        Self {
            info_rx,
            ping_rx,
            executor,
            probes,
            config,
            metrics,
        }
    }

    pub async fn run(mut self, cancel: CancellationToken) -> Result<(), EngineError> {
        info!("Discovery scheduler starting");

        loop {
            if cancel.is_cancelled() {
                debug!("Discovery scheduler cancelled");
                return Ok(());
            }

            let timer = self.metrics.discovery_cycle_seconds.start_timer();
            let outcome = self.run_cycle(&cancel).await;
            timer.observe_duration();

            if let Err(e) = outcome {
                error!(error = %e, "Discovery cycle crashed");
                error!(
                    "Backing off {}s before next cycle",
                    self.config.cycle_backoff_secs
                );
                tokio::select! {
                    _ = cancel.cancelled() => return Ok(()),
                    _ = sleep(Duration::from_secs(self.config.cycle_backoff_secs)) => {}
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                _ = sleep(Duration::from_secs(1)) => {}
            }
        }
    }

    /// One discovery cycle. Exposed for deterministic tests.
    pub async fn run_cycle(&mut self, cancel: &CancellationToken) -> Result<(), EngineError> {
        let reset = self.executor.execute(&self.probes.adapter_reset()).await?;
        if !reset.success() {
            debug!(status = ?reset.status, "Adapter reset exited non-zero");
        }

        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            _ = sleep(Duration::from_secs(self.config.settle_secs)) => {}
        }

        let discovery = self.executor.execute(&self.probes.discovery()).await?;
        if !discovery.stderr.is_empty() {
            error!("Error with discovery tool..");
            for line in discovery.stderr.lines() {
                error!("{line}");
            }
        }

        self.drain_command_queues(cancel).await
    }

    /// Drain both command queues: the whole info-scan queue first, then at
    /// most one liveness ping before re-evaluating, so pings interleave
    /// one-at-a-time with info scans arriving mid-drain.
    async fn drain_command_queues(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<(), EngineError> {
        while !(self.info_rx.is_empty() && self.ping_rx.is_empty()) {
            if cancel.is_cancelled() {
                return Ok(());
            }

            while let Ok(command) = self.info_rx.try_recv() {
                if cancel.is_cancelled() {
                    return Ok(());
                }
                debug!(depth = self.info_rx.len(), "Popping off info scan queue");
                match command {
                    ScanCommand::Info { address } => {
                        self.executor.execute(&self.probes.info(&address)).await?;
                    }
                    ScanCommand::LeInfo { address } => {
                        self.executor.execute(&self.probes.le_info(&address)).await?;
                    }
                    other => {
                        error!(command = ?other, "Invalid command on info scan queue");
                    }
                }
            }

            if let Ok(command) = self.ping_rx.try_recv() {
                debug!(depth = self.ping_rx.len(), "Popping off l2ping queue");
                self.executor
                    .execute(&self.probes.l2ping(command.address()))
                    .await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingExecutor, RecordingExecutor};
    use blodhund_core::channels::{command_channel, CommandSender};
    use blodhund_core::events::DeviceAddress;

    fn address(s: &str) -> DeviceAddress {
        s.parse().unwrap()
    }

    struct Harness {
        scheduler: DiscoveryScheduler,
        info_tx: CommandSender,
        ping_tx: CommandSender,
        executor: Arc<RecordingExecutor>,
    }

    fn harness() -> Harness {
        let (info_tx, info_rx) = command_channel();
        let (ping_tx, ping_rx) = command_channel();
        let executor = Arc::new(RecordingExecutor::default());

        let scheduler = DiscoveryScheduler::new(
            info_rx,
            ping_rx,
            executor.clone(),
            ProbeCommands::new("hci0", "test-discovery"),
            SchedulerConfig::default(),
            MetricsRecorder::new(),
        );

        Harness {
            scheduler,
            info_tx,
            ping_tx,
            executor,
        }
    }

    #[tokio::test]
    async fn info_queue_drains_before_any_ping() {
        let mut h = harness();
        h.info_tx
            .send(ScanCommand::Info {
                address: address("00:11:22:33:44:55"),
            })
            .unwrap();
        h.info_tx
            .send(ScanCommand::LeInfo {
                address: address("AA:BB:CC:DD:EE:FF"),
            })
            .unwrap();
        h.ping_tx
            .send(ScanCommand::L2Ping {
                address: address("11:11:11:11:11:11"),
            })
            .unwrap();
        h.ping_tx
            .send(ScanCommand::L2Ping {
                address: address("22:22:22:22:22:22"),
            })
            .unwrap();

        h.scheduler
            .drain_command_queues(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            h.executor.recorded(),
            vec![
                "hcitool -i hci0 info 00:11:22:33:44:55",
                "hcitool -i hci0 leinfo --random AA:BB:CC:DD:EE:FF",
                "l2ping -c 3 -i hci0 11:11:11:11:11:11",
                "l2ping -c 3 -i hci0 22:22:22:22:22:22",
            ]
        );
    }

    #[tokio::test]
    async fn misrouted_ping_on_info_queue_is_skipped() {
        let mut h = harness();
        h.info_tx
            .send(ScanCommand::L2Ping {
                address: address("00:11:22:33:44:55"),
            })
            .unwrap();

        h.scheduler
            .drain_command_queues(&CancellationToken::new())
            .await
            .unwrap();

        assert!(h.executor.recorded().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cycle_resets_then_discovers_then_drains() {
        let mut h = harness();
        h.info_tx
            .send(ScanCommand::Info {
                address: address("00:11:22:33:44:55"),
            })
            .unwrap();

        h.scheduler
            .run_cycle(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            h.executor.recorded(),
            vec![
                "hciconfig hci0 reset",
                "test-discovery -i hci0",
                "hcitool -i hci0 info 00:11:22:33:44:55",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn executor_failure_is_a_cycle_fault() {
        let (_info_tx, info_rx) = command_channel();
        let (_ping_tx, ping_rx) = command_channel();
        let mut scheduler = DiscoveryScheduler::new(
            info_rx,
            ping_rx,
            Arc::new(FailingExecutor),
            ProbeCommands::new("hci0", "test-discovery"),
            SchedulerConfig::default(),
            MetricsRecorder::new(),
        );

        let err = scheduler.run_cycle(&CancellationToken::new()).await;
        assert!(matches!(err, Err(EngineError::Exec(_))));
    }

    #[tokio::test]
    async fn run_stops_on_cancellation() {
        let h = harness();
        let cancel = CancellationToken::new();
        cancel.cancel();
        h.scheduler.run(cancel).await.unwrap();
    }
}

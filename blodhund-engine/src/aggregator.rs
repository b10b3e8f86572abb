//! Result aggregator worker.
//!
//! Drains the result queue into the device store and decides, from the
//! per-address query history, when to enqueue active probes. In replay
//! mode the aggregator is purely passive: no sweeps, no command enqueues.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use blodhund_config::SchedulerConfig;
use blodhund_core::channels::{CommandSender, ResultReceiver};
use blodhund_core::events::{ProbeKind, ScanCommand};
use blodhund_core::time::Clock;
use blodhund_store::{Device, DeviceStatus, DeviceStore};
use blodhund_telemetry::MetricsRecorder;

use crate::history::QueryHistory;
use crate::EngineError;

pub struct ResultAggregator {
    result_rx: ResultReceiver,
    info_tx: CommandSender,
    ping_tx: CommandSender,
    store: Arc<dyn DeviceStore>,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
    replay: bool,
    metrics: MetricsRecorder,
    history: QueryHistory,
}

impl ResultAggregator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        result_rx: ResultReceiver,
        info_tx: CommandSender,
        ping_tx: CommandSender,
        store: Arc<dyn DeviceStore>,
        clock: Arc<dyn Clock>,
        config: SchedulerConfig,
        replay: bool,
        metrics: MetricsRecorder,
    ) -> Self {
        Self {
            result_rx,
            info_tx,
            ping_tx,
            store,
            clock,
            config,
            replay,
            metrics,
            history: QueryHistory::new(),
        }
    }

    pub async fn run(mut self, cancel: CancellationToken) -> Result<(), EngineError> {
        info!(replay = self.replay, "Result aggregator starting");

        loop {
            if cancel.is_cancelled() {
                debug!("Result aggregator cancelled");
                return Ok(());
            }

            self.run_once()?;

            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Result aggregator cancelled");
                    return Ok(());
                }
                _ = sleep(Duration::from_secs(self.config.sweep_interval_secs)) => {}
            }
        }
    }

    /// One aggregator iteration: liveness sweep, result drain, offline
    /// sweep. Exposed for deterministic tests.
    pub fn run_once(&mut self) -> Result<(), EngineError> {
        let now = self.clock.now();

        if !self.replay {
            self.liveness_sweep(now);
        }
        self.drain_results(now)?;
        if !self.replay {
            self.offline_sweep(now)?;
        }

        Ok(())
    }

    /// Ping devices seen long enough ago to be stale but not so long ago
    /// they are presumed gone: `last_seen` strictly inside
    /// `(now - gone_window, now - stale_window)`.
    fn liveness_sweep(&mut self, now: u64) {
        let lower = now.saturating_sub(self.config.gone_window_secs);
        let upper = now.saturating_sub(self.config.stale_window_secs);

        let stale = self
            .store
            .select(&|d: &Device| d.last_seen > lower && d.last_seen < upper);

        for device in stale {
            if !self.history.is_due(
                &device.address,
                ProbeKind::L2Ping,
                now,
                self.config.reprobe_interval_secs,
            ) {
                continue;
            }
            debug!(address = %device.address, "Liveness ping triggered");
            if self
                .ping_tx
                .send(ScanCommand::L2Ping {
                    address: device.address.clone(),
                })
                .is_ok()
            {
                self.metrics.probes_enqueued.inc();
                self.history.stamp(&device.address, ProbeKind::L2Ping, now);
            }
        }
    }

    /// Pop every pending parsed result: upsert addressable results and, in
    /// live mode, enqueue throttled info probes for the device's modes.
    fn drain_results(&mut self, now: u64) -> Result<(), EngineError> {
        let depth = self.result_rx.len();
        if depth > self.config.result_queue_warn_depth {
            warn!(depth, "Result queue backlog");
        }

        while let Ok(result) = self.result_rx.try_recv() {
            if result.address().is_none() {
                warn!(attributes = ?result.attributes(), "Result without address dropped");
                self.metrics.malformed_results.inc();
                continue;
            }

            let device = self.store.upsert_from_result(&result, now)?;
            self.metrics.parsed_results.inc();

            if self.replay {
                continue;
            }

            if device.le_mode
                && self.history.is_due(
                    &device.address,
                    ProbeKind::Le,
                    now,
                    self.config.reprobe_interval_secs,
                )
            {
                debug!(address = %device.address, "LE info scan triggered");
                if self
                    .info_tx
                    .send(ScanCommand::LeInfo {
                        address: device.address.clone(),
                    })
                    .is_ok()
                {
                    self.metrics.probes_enqueued.inc();
                    self.history.stamp(&device.address, ProbeKind::Le, now);
                }
            }

            if device.classic_mode
                && self.history.is_due(
                    &device.address,
                    ProbeKind::Info,
                    now,
                    self.config.reprobe_interval_secs,
                )
            {
                debug!(address = %device.address, "Classic info scan triggered");
                if self
                    .info_tx
                    .send(ScanCommand::Info {
                        address: device.address.clone(),
                    })
                    .is_ok()
                {
                    self.metrics.probes_enqueued.inc();
                    self.history.stamp(&device.address, ProbeKind::Info, now);
                }
            }
        }

        Ok(())
    }

    /// Mark online devices unseen for the gone window as offline.
    fn offline_sweep(&mut self, now: u64) -> Result<(), EngineError> {
        let threshold = self.config.gone_window_secs;
        let gone = self
            .store
            .select(&|d: &Device| d.is_online() && now.saturating_sub(d.last_seen) >= threshold);

        for mut device in gone {
            info!(address = %device.address, last_seen = device.last_seen, "Marking device offline");
            device.status = DeviceStatus::Offline;
            self.store.persist(&device)?;
            self.metrics.devices_offline.inc();
        }

        Ok(())
    }
}

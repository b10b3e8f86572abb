//! Prometheus metrics for the discovery pipeline.

use prometheus::{Counter, Histogram, HistogramOpts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    /// Parsed results drained from the result queue.
    pub parsed_results: Counter,
    /// Results dropped for lacking an address.
    pub malformed_results: Counter,
    /// Scan commands enqueued by the aggregator.
    pub probes_enqueued: Counter,
    /// Devices transitioned online -> offline by the sweep.
    pub devices_offline: Counter,
    /// Wall time of one discovery cycle.
    pub discovery_cycle_seconds: Histogram,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let parsed_results =
            Counter::new("blodhund_parsed_results_total", "Parsed results processed").unwrap();
        let malformed_results = Counter::new(
            "blodhund_malformed_results_total",
            "Results dropped for missing address",
        )
        .unwrap();
        let probes_enqueued =
            Counter::new("blodhund_probes_enqueued_total", "Scan commands enqueued").unwrap();
        let devices_offline = Counter::new(
            "blodhund_devices_offline_total",
            "Devices marked offline by the sweep",
        )
        .unwrap();
        let discovery_cycle_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "blodhund_discovery_cycle_seconds",
                "Duration of one discovery cycle",
            )
            .buckets(vec![1.0, 5.0, 15.0, 60.0, 300.0]),
        )
        .unwrap();

        registry.register(Box::new(parsed_results.clone())).unwrap();
        registry
            .register(Box::new(malformed_results.clone()))
            .unwrap();
        registry
            .register(Box::new(probes_enqueued.clone()))
            .unwrap();
        registry
            .register(Box::new(devices_offline.clone()))
            .unwrap();
        registry
            .register(Box::new(discovery_cycle_seconds.clone()))
            .unwrap();

        Self {
            registry,
            parsed_results,
            malformed_results,
            probes_enqueued,
            devices_offline,
            discovery_cycle_seconds,
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }
}

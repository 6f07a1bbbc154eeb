//! Prometheus metrics for the relayer
//!
//! Exposed on `/metrics` by the HTTP server.

use prometheus::{IntCounterVec, IntGauge, Opts, Registry};

pub struct Metrics {
    /// Webhook requests by outcome (`relayed` or a rejection reason)
    pub requests_total: IntCounterVec,
    /// Bridge calls broadcast, by kind (`mint_token` / `unwrap_token`)
    pub dispatched_total: IntCounterVec,
    /// Current entries in the consumed-tag cache
    pub replay_cache_size: IntGauge,
    pub registry: Registry,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("relayer_requests_total", "Webhook requests by outcome"),
            &["outcome"],
        )?;
        let dispatched_total = IntCounterVec::new(
            Opts::new(
                "relayer_dispatched_total",
                "Bridge transactions broadcast by kind",
            ),
            &["kind"],
        )?;
        let replay_cache_size = IntGauge::new(
            "relayer_replay_cache_size",
            "Current entries in the consumed request tag cache",
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(dispatched_total.clone()))?;
        registry.register(Box::new(replay_cache_size.clone()))?;

        Ok(Self {
            requests_total,
            dispatched_total,
            replay_cache_size,
            registry,
        })
    }

    pub fn record_outcome(&self, outcome: &str) {
        self.requests_total.with_label_values(&[outcome]).inc();
    }
}

use prometheus::{HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder, Encoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub route_lookups_total: IntCounterVec,
    pub provider_fallbacks_total: IntCounterVec,
    pub route_latency_seconds: HistogramVec,
    pub geocode_failures_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let route_lookups_total = IntCounterVec::new(
            Opts::new("route_lookups_total", "Route lookups by provider and outcome"),
            &["provider", "outcome"],
        )
        .expect("valid route_lookups_total metric");

        let provider_fallbacks_total = IntCounterVec::new(
            Opts::new(
                "provider_fallbacks_total",
                "Chain stages that failed and triggered the next stage",
            ),
            &["provider"],
        )
        .expect("valid provider_fallbacks_total metric");

        let route_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "route_latency_seconds",
                "Latency of provider stages in seconds",
            ),
            &["provider"],
        )
        .expect("valid route_latency_seconds metric");

        let geocode_failures_total = IntCounter::new(
            "geocode_failures_total",
            "Addresses that could not be resolved to coordinates",
        )
        .expect("valid geocode_failures_total metric");

        registry
            .register(Box::new(route_lookups_total.clone()))
            .expect("register route_lookups_total");
        registry
            .register(Box::new(provider_fallbacks_total.clone()))
            .expect("register provider_fallbacks_total");
        registry
            .register(Box::new(route_latency_seconds.clone()))
            .expect("register route_latency_seconds");
        registry
            .register(Box::new(geocode_failures_total.clone()))
            .expect("register geocode_failures_total");

        Self {
            registry,
            route_lookups_total,
            provider_fallbacks_total,
            route_latency_seconds,
            geocode_failures_total,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

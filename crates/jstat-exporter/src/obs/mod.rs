//! Exporter self-metrics.
//!
//! Scrape outcomes and jstat latency, registered next to the GC gauges in the
//! same `prometheus::Registry`.

pub mod metrics;

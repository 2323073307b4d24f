//! Counters and histograms describing the exporter itself.
//!
//! Kept in a separate collector so the GC descriptor set stays exactly one
//! descriptor per schema field.

use std::time::Duration;

use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry};

use jstat_core::error::{ErrorKind, JstatError, Result};

// jstat usually answers in tens of milliseconds; the tail covers JVM attach stalls.
const DURATION_BUCKETS: [f64; 9] = [0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

const RESULT_LABELS: [&str; 3] = ["ok", "execution_error", "format_error"];

#[derive(Clone)]
pub struct ExporterMetrics {
    scrapes: IntCounterVec,
    sample_duration: Histogram,
}

impl ExporterMetrics {
    pub fn new(namespace: &str) -> Result<Self> {
        let scrapes = IntCounterVec::new(
            Opts::new("exporter_scrapes_total", "jstat scrapes by result.").namespace(namespace),
            &["result"],
        )
        .map_err(internal)?;
        for r in RESULT_LABELS {
            scrapes.with_label_values(&[r]);
        }

        let sample_duration = Histogram::with_opts(
            HistogramOpts::new(
                "exporter_sample_duration_seconds",
                "Wall time of one jstat invocation.",
            )
            .namespace(namespace)
            .buckets(DURATION_BUCKETS.to_vec()),
        )
        .map_err(internal)?;

        Ok(Self {
            scrapes,
            sample_duration,
        })
    }

    pub fn register(&self, registry: &Registry) -> Result<()> {
        registry
            .register(Box::new(self.scrapes.clone()))
            .map_err(internal)?;
        registry
            .register(Box::new(self.sample_duration.clone()))
            .map_err(internal)?;
        Ok(())
    }

    /// Record one sampler pass. `failure` is `None` on success.
    pub fn observe(&self, elapsed: Duration, failure: Option<ErrorKind>) {
        self.sample_duration.observe(elapsed.as_secs_f64());
        let result = failure.map_or("ok", ErrorKind::label);
        self.scrapes.with_label_values(&[result]).inc();
    }

    pub fn scrapes(&self, result: &str) -> u64 {
        self.scrapes.with_label_values(&[result]).get()
    }

    pub fn samples_observed(&self) -> u64 {
        self.sample_duration.get_sample_count()
    }
}

fn internal(e: prometheus::Error) -> JstatError {
    JstatError::Internal(format!("metrics registration failed: {e}"))
}

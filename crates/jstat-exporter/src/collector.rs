//! Prometheus collector over a `Sampler`.
//!
//! Every scrape runs one sampler pass. The pass, the gauge update, and the
//! emission all happen under one lock, so concurrent scrapes never see a set
//! of gauges mixing two samples.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use clap::ValueEnum;
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{Gauge, Opts};
use serde::Deserialize;

use jstat_core::error::{JstatError, Result};
use jstat_core::Schema;

use crate::obs::metrics::ExporterMetrics;
use crate::sampler::Sampler;

/// What a failed scrape does to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the error and exit with status 1.
    #[default]
    FailFast,
    /// Log the error, emit nothing for this scrape, keep the cached values.
    Degrade,
}

impl FailurePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            FailurePolicy::FailFast => "fail_fast",
            FailurePolicy::Degrade => "degrade",
        }
    }
}

pub struct GcCollector {
    schema: Schema,
    sampler: Arc<dyn Sampler>,
    policy: FailurePolicy,
    descs: Vec<Desc>,
    gauges: Mutex<Vec<Gauge>>,
    metrics: Option<Arc<ExporterMetrics>>,
}

impl GcCollector {
    /// Build one gauge per schema field, named `<namespace>_<field>`.
    pub fn new(
        schema: Schema,
        namespace: &str,
        sampler: Arc<dyn Sampler>,
        policy: FailurePolicy,
    ) -> Result<Self> {
        schema.validate()?;

        let mut gauges = Vec::with_capacity(schema.len());
        for f in schema.fields() {
            let gauge = Gauge::with_opts(Opts::new(f.name, f.help).namespace(namespace))
                .map_err(|e| JstatError::Config(format!("invalid gauge {}: {e}", f.name)))?;
            gauges.push(gauge);
        }
        let descs = gauges
            .iter()
            .flat_map(|g| g.desc().into_iter().cloned())
            .collect();

        Ok(Self {
            schema,
            sampler,
            policy,
            descs,
            gauges: Mutex::new(gauges),
            metrics: None,
        })
    }

    /// Record scrape outcomes and sampler latency.
    pub fn with_metrics(mut self, metrics: Arc<ExporterMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// One sampler pass. On error the cached gauge values are left untouched
    /// and nothing is emitted.
    pub fn try_collect(&self) -> Result<Vec<MetricFamily>> {
        let gauges = self.gauges.lock().unwrap_or_else(PoisonError::into_inner);

        let started = Instant::now();
        let res = self.sampler.sample();
        if let Some(m) = &self.metrics {
            m.observe(started.elapsed(), res.as_ref().err().map(JstatError::kind));
        }
        let row = res?;

        if row.schema() != &self.schema {
            return Err(JstatError::Internal(
                "sampler returned a row for a different schema".into(),
            ));
        }

        for (gauge, value) in gauges.iter().zip(row.values()) {
            gauge.set(*value);
        }
        Ok(gauges.iter().flat_map(|g| g.collect()).collect())
    }

    /// Current gauge values in schema order, without sampling.
    pub fn current_values(&self) -> Vec<(&'static str, f64)> {
        let gauges = self.gauges.lock().unwrap_or_else(PoisonError::into_inner);
        self.schema
            .fields()
            .iter()
            .zip(gauges.iter())
            .map(|(f, g)| (f.name, g.get()))
            .collect()
    }

    fn on_failure(&self, err: &JstatError) -> Vec<MetricFamily> {
        match self.policy {
            FailurePolicy::FailFast => {
                tracing::error!(kind = err.kind().as_str(), error = %err, "jstat sampling failed, exiting");
                std::process::exit(1);
            }
            FailurePolicy::Degrade => {
                tracing::warn!(kind = err.kind().as_str(), error = %err, "jstat sampling failed, skipping scrape");
                Vec::new()
            }
        }
    }
}

impl Collector for GcCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.descs.iter().collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        match self.try_collect() {
            Ok(mfs) => mfs,
            Err(e) => self.on_failure(&e),
        }
    }
}

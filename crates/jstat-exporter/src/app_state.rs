//! Shared application state for the jstat exporter.
//!
//! Owns the `prometheus::Registry` explicitly (no process-wide default
//! registry). The GC collector and the self-metrics are registered once here.

use std::sync::Arc;

use prometheus::{Encoder, Registry, TextEncoder};

use jstat_core::error::{JstatError, Result};
use jstat_core::Schema;

use crate::collector::GcCollector;
use crate::config::ExporterConfig;
use crate::obs::metrics::ExporterMetrics;
use crate::sampler::{JstatSampler, Sampler};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    registry: Registry,
    metrics: Arc<ExporterMetrics>,
}

impl AppState {
    /// Build state around a real jstat process runner.
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let sampler = JstatSampler::new(&cfg.jstat);
        Self::with_sampler(cfg, Arc::new(sampler))
    }

    /// Build state around any sampler (tests plug stubs in here).
    pub fn with_sampler(cfg: ExporterConfig, sampler: Arc<dyn Sampler>) -> Result<Self> {
        let registry = Registry::new();

        let metrics = Arc::new(ExporterMetrics::new(&cfg.namespace)?);
        metrics.register(&registry)?;

        let collector = GcCollector::new(Schema::gc(), &cfg.namespace, sampler, cfg.failure_policy)?
            .with_metrics(Arc::clone(&metrics));
        registry
            .register(Box::new(collector))
            .map_err(|e| JstatError::Internal(format!("register gc collector failed: {e}")))?;

        tracing::info!(
            pid = %cfg.jstat.target_pid,
            jstat = %cfg.jstat.path,
            policy = cfg.failure_policy.as_str(),
            "gc collector registered"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, registry, metrics }),
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn metrics(&self) -> Arc<ExporterMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    /// Gather every collector and render the text exposition format.
    ///
    /// Blocks while jstat runs.
    pub fn render_metrics(&self) -> Result<String> {
        let families = self.inner.registry.gather();
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&families, &mut buf)
            .map_err(|e| JstatError::Internal(format!("encode metrics failed: {e}")))?;
        String::from_utf8(buf).map_err(|e| JstatError::Internal(format!("metrics not utf-8: {e}")))
    }
}

//! Command-line flags.
//!
//! Flags override values loaded from `--config`; without a config file the
//! built-in defaults apply.

use std::path::PathBuf;

use clap::Parser;

use jstat_core::error::Result;

use crate::collector::FailurePolicy;
use crate::config::{self, ExporterConfig};

#[derive(Debug, Default, Parser)]
#[command(name = "jstat-exporter", version, about = "Prometheus exporter for jstat -gc")]
pub struct Cli {
    /// YAML config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address on which to expose metrics and web interface.
    #[arg(long = "web.listen-address")]
    pub listen_address: Option<String>,

    /// Path under which to expose metrics.
    #[arg(long = "web.telemetry-path")]
    pub telemetry_path: Option<String>,

    /// jstat binary.
    #[arg(long = "jstat.path")]
    pub jstat_path: Option<String>,

    /// Target JVM process id.
    #[arg(long = "target.pid")]
    pub target_pid: Option<String>,

    /// Kill jstat after this many milliseconds.
    #[arg(long = "jstat.timeout-ms")]
    pub timeout_ms: Option<u64>,

    /// Reject jstat output whose header does not match the expected columns.
    /// `--jstat.verify-header=false` switches a config-file `true` back off.
    #[arg(long = "jstat.verify-header", num_args = 0..=1, default_missing_value = "true")]
    pub verify_header: Option<bool>,

    /// What a failed scrape does to the process.
    #[arg(long = "failure-policy", value_enum)]
    pub failure_policy: Option<FailurePolicy>,
}

impl Cli {
    /// Resolve the effective, validated config.
    pub fn into_config(self) -> Result<ExporterConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_unvalidated(path)?,
            None => ExporterConfig::default(),
        };

        if let Some(v) = self.listen_address {
            cfg.web.listen = v;
        }
        if let Some(v) = self.telemetry_path {
            cfg.web.metrics_path = v;
        }
        if let Some(v) = self.jstat_path {
            cfg.jstat.path = v;
        }
        if let Some(v) = self.target_pid {
            cfg.jstat.target_pid = v;
        }
        if let Some(v) = self.timeout_ms {
            cfg.jstat.timeout_ms = v;
        }
        if let Some(v) = self.verify_header {
            cfg.jstat.verify_header = v;
        }
        if let Some(v) = self.failure_policy {
            cfg.failure_policy = v;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

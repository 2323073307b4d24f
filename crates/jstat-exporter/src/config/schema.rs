use std::net::SocketAddr;

use serde::Deserialize;
use jstat_core::error::{JstatError, Result};

use crate::collector::FailurePolicy;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default)]
    pub web: WebSection,

    #[serde(default)]
    pub jstat: JstatSection,

    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            namespace: default_namespace(),
            web: WebSection::default(),
            jstat: JstatSection::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(JstatError::Config(format!(
                "unsupported config version {} (expected 1)",
                self.version
            )));
        }
        if !is_metric_identifier(&self.namespace) {
            return Err(JstatError::Config(format!(
                "namespace {:?} is not a valid metric name prefix",
                self.namespace
            )));
        }

        self.web.validate()?;
        self.jstat.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

impl Default for WebSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_path: default_metrics_path(),
        }
    }
}

impl WebSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.metrics_path.starts_with('/') {
            return Err(JstatError::Config("web.metrics_path must start with '/'".into()));
        }
        if matches!(self.metrics_path.as_str(), "/" | "/healthz") {
            return Err(JstatError::Config(format!(
                "web.metrics_path {} collides with a built-in route",
                self.metrics_path
            )));
        }
        Ok(())
    }

    /// Accepts the host-less `:9010` form as `0.0.0.0:9010`.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let addr = match self.listen.strip_prefix(':') {
            Some(port) => format!("0.0.0.0:{port}"),
            None => self.listen.clone(),
        };
        addr.parse().map_err(|_| {
            JstatError::Config(format!("web.listen {:?} is not a valid socket address", self.listen))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JstatSection {
    #[serde(default = "default_jstat_path")]
    pub path: String,

    /// Target JVM process id. Opaque, passed to jstat as is.
    #[serde(default)]
    pub target_pid: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Reject output whose header does not match the schema.
    #[serde(default)]
    pub verify_header: bool,
}

impl Default for JstatSection {
    fn default() -> Self {
        Self {
            path: default_jstat_path(),
            target_pid: String::new(),
            timeout_ms: default_timeout_ms(),
            verify_header: false,
        }
    }
}

impl JstatSection {
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(JstatError::Config("jstat.path must not be empty".into()));
        }
        if self.target_pid.trim().is_empty() {
            return Err(JstatError::Config("jstat.target_pid must not be empty".into()));
        }
        if !(100..=60000).contains(&self.timeout_ms) {
            return Err(JstatError::Config(
                "jstat.timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`
fn is_metric_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn default_namespace() -> String {
    "jstat".into()
}
fn default_listen() -> String {
    "0.0.0.0:9010".into()
}
fn default_metrics_path() -> String {
    "/metrics".into()
}
fn default_jstat_path() -> String {
    "/usr/bin/jstat".into()
}
fn default_timeout_ms() -> u64 {
    5000
}

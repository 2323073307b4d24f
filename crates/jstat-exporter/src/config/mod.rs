//! Exporter config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use jstat_core::error::{JstatError, Result};

pub use schema::{ExporterConfig, JstatSection, WebSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ExporterConfig> {
    let cfg = load_unvalidated(path)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg = parse(s)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Parse without validating, so command-line overrides can fill required
/// fields (such as the target pid) before `validate` runs.
pub(crate) fn load_unvalidated(path: impl AsRef<Path>) -> Result<ExporterConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .map_err(|e| JstatError::Config(format!("read {} failed: {e}", path.display())))?;
    parse(&s)
}

fn parse(s: &str) -> Result<ExporterConfig> {
    serde_yaml::from_str(s).map_err(|e| JstatError::Config(format!("invalid yaml: {e}")))
}

//! `jstat -gc` output parsing (panic-free).
//!
//! Parsing rules:
//! - Line 0 is the header, line 1 the only data row. Later lines are ignored:
//!   the exporter never asks jstat for more than one sample.
//! - Tokens are read with `get()`, never indexed directly.

use crate::error::{FormatError, Result};
use crate::schema::{MetricField, Schema};

/// One parsed observation, aligned with the schema that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow {
    schema: Schema,
    values: Vec<f64>,
}

impl SampleRow {
    /// Build a row from values in schema order.
    ///
    /// Returns `None` when the value count does not match the schema.
    pub fn from_values(schema: Schema, values: Vec<f64>) -> Option<Self> {
        (values.len() == schema.len()).then_some(Self { schema, values })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        let idx = self.schema.fields().iter().position(|f| f.name == name)?;
        self.values.get(idx).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate `(field, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static MetricField, f64)> + '_ {
        self.schema.fields().iter().zip(self.values.iter().copied())
    }
}

/// Parse options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Require the header tokens to match `MetricField::header`.
    pub verify_header: bool,
}

/// Parse the captured stdout of `jstat -gc <pid>`.
pub fn parse_gc_output(schema: &Schema, text: &str, opts: ParseOptions) -> Result<SampleRow> {
    let mut lines = text.lines();
    let (Some(header), Some(data)) = (lines.next(), lines.next()) else {
        let n = text.lines().count();
        return Err(FormatError::MissingDataRow { lines: n }.into());
    };

    if opts.verify_header {
        verify_header(schema, header)?;
    }

    let tokens: Vec<&str> = data.split_whitespace().collect();
    let mut values = Vec::with_capacity(schema.len());
    for f in schema.fields() {
        let token = tokens.get(f.column).ok_or(FormatError::MissingColumn {
            index: f.column,
            field: f.name,
        })?;
        let v = token.parse::<f64>().map_err(|_| FormatError::NotNumeric {
            field: f.name,
            token: (*token).to_string(),
        })?;
        values.push(v);
    }

    if tokens.len() > schema.width() {
        tracing::debug!(
            extra = tokens.len() - schema.width(),
            "jstat data row has more columns than the schema reads"
        );
    }

    Ok(SampleRow {
        schema: *schema,
        values,
    })
}

fn verify_header(schema: &Schema, header: &str) -> Result<()> {
    let titles: Vec<&str> = header.split_whitespace().collect();
    for f in schema.fields() {
        let found = titles.get(f.column).copied().unwrap_or("");
        if found != f.header {
            return Err(FormatError::HeaderMismatch {
                index: f.column,
                expected: f.header,
                found: found.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

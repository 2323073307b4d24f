//! `jstat -gc` column schema.
//!
//! One table row per exported gauge. The table is the single source of truth
//! for both the expected column layout and the exported metric set.

use crate::error::{JstatError, Result};

/// One named gauge in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricField {
    /// Metric name (without namespace).
    pub name: &'static str,
    /// Position in the whitespace-split data row.
    pub column: usize,
    /// Column title printed by jstat at this position.
    pub header: &'static str,
    /// Help text of the gauge.
    pub help: &'static str,
}

const fn field(
    name: &'static str,
    column: usize,
    header: &'static str,
    help: &'static str,
) -> MetricField {
    MetricField { name, column, header, help }
}

/// Column layout of `jstat -gc` (JDK 8 style, 17 columns).
pub const GC_FIELDS: [MetricField; 17] = [
    field("sv0Cur", 0, "S0C", "Current survivor space 0 capacity (kB)."),
    field("sv1Cur", 1, "S1C", "Current survivor space 1 capacity (kB)."),
    field("sv0Used", 2, "S0U", "Survivor space 0 utilization (kB)."),
    field("sv1Used", 3, "S1U", "Survivor space 1 utilization (kB)."),
    field("edenCur", 4, "EC", "Current eden space capacity (kB)."),
    field("edenUsed", 5, "EU", "Eden space utilization (kB)."),
    field("oldCur", 6, "OC", "Current old space capacity (kB)."),
    field("oldUsed", 7, "OU", "Old space utilization (kB)."),
    field("metaCur", 8, "MC", "Metaspace capacity (kB)."),
    field("metaUsed", 9, "MU", "Metaspace utilization (kB)."),
    field("classCur", 10, "CCSC", "Compressed class space capacity (kB)."),
    field("classUsed", 11, "CCSU", "Compressed class space used (kB)."),
    field("ygcTimes", 12, "YGC", "Number of young generation GC events."),
    field("ygcSec", 13, "YGCT", "Young generation garbage collection time (s)."),
    field("fgcTimes", 14, "FGC", "Number of full GC events."),
    field("fgcSec", 15, "FGCT", "Full garbage collection time (s)."),
    field("gcSec", 16, "GCT", "Total garbage collection time (s)."),
];

/// Ordered list of fields, fixed at build time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schema {
    fields: &'static [MetricField],
}

impl Schema {
    pub const fn new(fields: &'static [MetricField]) -> Self {
        Self { fields }
    }

    /// The `jstat -gc` schema.
    pub fn gc() -> Self {
        Self::new(&GC_FIELDS)
    }

    pub fn fields(&self) -> &'static [MetricField] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Highest column index any field reads, plus one.
    pub fn width(&self) -> usize {
        self.fields.iter().map(|f| f.column + 1).max().unwrap_or(0)
    }

    pub fn field(&self, name: &str) -> Option<&'static MetricField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check that names are unique and columns are exactly `0..len`.
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(JstatError::Config("schema must not be empty".into()));
        }

        let mut seen = vec![false; self.fields.len()];
        for (i, f) in self.fields.iter().enumerate() {
            if f.name.is_empty() {
                return Err(JstatError::Config(format!("schema field {i} has an empty name")));
            }
            if self.fields[..i].iter().any(|p| p.name == f.name) {
                return Err(JstatError::Config(format!("duplicate schema field name: {}", f.name)));
            }
            match seen.get_mut(f.column) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(JstatError::Config(format!(
                        "duplicate schema column {} ({})",
                        f.column, f.name
                    )))
                }
                None => {
                    return Err(JstatError::Config(format!(
                        "schema column {} ({}) is out of range 0..{}",
                        f.column,
                        f.name,
                        self.fields.len()
                    )))
                }
            }
        }
        Ok(())
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::gc()
    }
}

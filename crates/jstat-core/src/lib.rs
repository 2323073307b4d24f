//! jstat core: error types, the `jstat -gc` column schema, and the output parser.
//!
//! This crate carries no runtime or transport dependencies so it can be reused
//! by the exporter binary and by tests that feed canned jstat output.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed tool output always surfaces as `FormatError` instead of a crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod sample;
pub mod schema;

/// Shared result type.
pub use error::{ErrorKind, ExecutionError, FormatError, JstatError, Result};
pub use sample::{parse_gc_output, ParseOptions, SampleRow};
pub use schema::{MetricField, Schema, GC_FIELDS};

//! Top-level facade crate for the jstat exporter.
//!
//! Re-exports the core types and the exporter library so users can depend on a single crate.

pub mod core {
    pub use jstat_core::*;
}

pub mod exporter {
    pub use jstat_exporter::*;
}

//! jstat exporter library entry.
//!
//! This crate wires the jstat process runner, the Prometheus collector, the
//! config layer, and the HTTP surface into one exporter. It is consumed by the
//! binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod cli;
pub mod collector;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod sampler;

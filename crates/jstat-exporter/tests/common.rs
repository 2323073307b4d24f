//! Stub samplers shared by exporter tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use jstat_core::error::Result;
use jstat_core::{SampleRow, Schema};
use jstat_exporter::sampler::Sampler;

pub const JDK8_OUTPUT: &str = "\
S0C S1C S0U S1U EC EU OC OU MC MU CCSC CCSU YGC YGCT FGC FGCT GCT
0.0 512.0 0.0 256.0 10240.0 4096.0 20480.0 8192.0 4096.0 2048.0 512.0 256.0 3.0 0.012 1.0 0.045 0.057
";

pub fn row(values: &[f64]) -> SampleRow {
    SampleRow::from_values(Schema::gc(), values.to_vec()).unwrap()
}

pub fn uniform_row(v: f64) -> SampleRow {
    row(&[v; 17])
}

/// Hands out queued results in order; panics when the queue runs dry.
pub struct ScriptedSampler {
    queue: Mutex<VecDeque<Result<SampleRow>>>,
}

impl ScriptedSampler {
    pub fn new(results: Vec<Result<SampleRow>>) -> Self {
        Self {
            queue: Mutex::new(results.into()),
        }
    }
}

impl Sampler for ScriptedSampler {
    fn sample(&self) -> Result<SampleRow> {
        self.queue.lock().unwrap().pop_front().expect("scripted sampler exhausted")
    }
}

/// Alternates between two internally consistent rows and sleeps while
/// "running", so overlapping scrapes have a chance to interleave.
pub struct AlternatingSampler {
    calls: AtomicUsize,
    delay: Duration,
}

impl AlternatingSampler {
    pub fn new(delay: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay,
        }
    }
}

impl Sampler for AlternatingSampler {
    fn sample(&self) -> Result<SampleRow> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        thread::sleep(self.delay);
        Ok(uniform_row(if n % 2 == 0 { 1.0 } else { 2.0 }))
    }
}

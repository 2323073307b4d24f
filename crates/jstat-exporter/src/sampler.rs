//! jstat process runner.
//!
//! A `Sampler` produces one `SampleRow` per call. `JstatSampler` spawns
//! `<path> -gc <pid>`, waits for it (bounded by a timeout), and hands stdout to
//! the core parser. Calls block the current thread; async callers must go
//! through `spawn_blocking`.

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use jstat_core::error::{ExecutionError, JstatError, Result};
use jstat_core::{parse_gc_output, ParseOptions, SampleRow, Schema};

use crate::config::JstatSection;

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Source of GC samples.
pub trait Sampler: Send + Sync {
    fn sample(&self) -> Result<SampleRow>;
}

/// Runs the jstat binary against one target process.
#[derive(Debug, Clone)]
pub struct JstatSampler {
    path: String,
    target_pid: String,
    timeout: Duration,
    schema: Schema,
    opts: ParseOptions,
}

impl JstatSampler {
    pub fn new(cfg: &JstatSection) -> Self {
        Self {
            path: cfg.path.clone(),
            target_pid: cfg.target_pid.clone(),
            timeout: Duration::from_millis(cfg.timeout_ms),
            schema: Schema::gc(),
            opts: ParseOptions {
                verify_header: cfg.verify_header,
            },
        }
    }

    /// Run jstat and return its stdout.
    ///
    /// One deadline covers the exit wait and both pipe reads, so a leftover
    /// grandchild holding the pipes open can't stretch a scrape.
    fn run(&self) -> Result<String> {
        let deadline = Instant::now() + self.timeout;
        let mut child = Command::new(&self.path)
            .arg("-gc")
            .arg(&self.target_pid)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExecutionError::Spawn {
                path: self.path.clone(),
                source,
            })?;

        // Drain both pipes concurrently so a chatty child can't block on a full pipe.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = self.wait(&mut child, deadline)?;
        let stdout = self.read_output(stdout, deadline)?;

        if !status.success() {
            let stderr = self.read_output(stderr, deadline).unwrap_or_default();
            let detail = if stderr.trim().is_empty() { &stdout } else { &stderr };
            return Err(ExecutionError::Exited {
                path: self.path.clone(),
                code: status.code(),
                detail: detail.trim().to_string(),
            }
            .into());
        }

        Ok(stdout)
    }

    fn wait(&self, child: &mut Child, deadline: Instant) -> Result<ExitStatus> {
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(self.timed_out());
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ExecutionError::Wait {
                        path: self.path.clone(),
                        source,
                    }
                    .into());
                }
            }
        }
    }

    fn read_output(
        &self,
        pipe: Option<Receiver<io::Result<Vec<u8>>>>,
        deadline: Instant,
    ) -> Result<String> {
        let Some(rx) = pipe else { return Ok(String::new()) };
        let left = deadline.saturating_duration_since(Instant::now());
        let bytes = match rx.recv_timeout(left) {
            Ok(res) => res.map_err(|source| ExecutionError::Read {
                path: self.path.clone(),
                source,
            })?,
            Err(RecvTimeoutError::Timeout) => return Err(self.timed_out()),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(ExecutionError::Read {
                    path: self.path.clone(),
                    source: io::Error::new(io::ErrorKind::Other, "pipe reader stopped"),
                }
                .into())
            }
        };
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn timed_out(&self) -> JstatError {
        ExecutionError::TimedOut {
            path: self.path.clone(),
            timeout: self.timeout,
        }
        .into()
    }
}

impl Sampler for JstatSampler {
    fn sample(&self) -> Result<SampleRow> {
        let started = Instant::now();
        let out = self.run()?;
        tracing::debug!(
            path = %self.path,
            pid = %self.target_pid,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "jstat finished"
        );
        parse_gc_output(&self.schema, &out, self.opts)
    }
}

/// Read a pipe to EOF on its own thread; the result arrives on the channel.
fn drain<R: Read + Send + 'static>(mut pipe: R) -> Receiver<io::Result<Vec<u8>>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let res = pipe.read_to_end(&mut buf).map(|_| buf);
        let _ = tx.send(res);
    });
    rx
}

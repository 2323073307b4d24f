//! Error kinds stay within the execution/format split.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io;
use std::time::Duration;

use jstat_core::{ErrorKind, ExecutionError, FormatError, JstatError};

#[test]
fn process_failures_are_execution_errors() {
    let path = || "/usr/bin/jstat".to_string();
    let errs: Vec<JstatError> = vec![
        ExecutionError::Spawn { path: path(), source: io::Error::from(io::ErrorKind::NotFound) }.into(),
        ExecutionError::Exited { path: path(), code: Some(1), detail: "4242 not found".into() }.into(),
        ExecutionError::TimedOut { path: path(), timeout: Duration::from_millis(200) }.into(),
        ExecutionError::Read { path: path(), source: io::Error::from(io::ErrorKind::BrokenPipe) }.into(),
        ExecutionError::Wait { path: path(), source: io::Error::from(io::ErrorKind::Interrupted) }.into(),
    ];
    for e in errs {
        assert_eq!(e.kind(), ErrorKind::Execution, "{e}");
        assert_eq!(e.kind().as_str(), "EXECUTION_ERROR");
    }
}

#[test]
fn messages_name_the_culprit() {
    let e: JstatError = ExecutionError::Read {
        path: "/usr/bin/jstat".into(),
        source: io::Error::from(io::ErrorKind::BrokenPipe),
    }
    .into();
    assert!(e.to_string().contains("reading output of /usr/bin/jstat failed"));

    let e: JstatError = ExecutionError::Exited { path: "jstat".into(), code: None, detail: String::new() }.into();
    assert!(e.to_string().contains("killed by signal"));

    let e: JstatError = FormatError::NotNumeric { field: "gcSec", token: "x".into() }.into();
    assert_eq!(e.kind(), ErrorKind::Format);
    assert!(e.to_string().contains("gcSec"));
}

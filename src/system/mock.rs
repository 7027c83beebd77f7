//! Mock system implementation for testing

use super::System;
use std::io::{self, Write};
use std::sync::{Arc, RwLock};

use tracing::error;

/// In-memory implementation of System trait for testing
///
/// `MockSystem` records everything written to the error stream and every
/// exit request, so a full run can be observed without terminating the
/// test process.
///
/// # Example
/// ```
/// use kli::system::{MockSystem, System};
/// use std::io::Write;
///
/// let system = MockSystem::new().with_args(["cow", "say"]);
/// writeln!(system.stderr(), "moo").unwrap();
/// system.exit(3);
///
/// assert_eq!(system.args(), vec!["cow", "say"]);
/// assert_eq!(system.stderr_output(), "moo\n");
/// assert_eq!(system.exit_code(), Some(3));
/// ```
#[derive(Clone, Default)]
pub struct MockSystem {
    state: Arc<RwLock<MockSystemState>>,
}

#[derive(Default)]
struct MockSystemState {
    args: Vec<String>,
    stderr: Vec<u8>,
    exit_codes: Vec<i32>,
}

impl MockSystem {
    /// Create a new `MockSystem` with no arguments and no recorded output
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the argument vector, program path first (builder pattern)
    #[must_use]
    pub fn with_args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.state.write() {
            Ok(mut state) => state.args = args.into_iter().map(Into::into).collect(),
            Err(e) => error!("Failed to set mock arguments: {e}"),
        }
        self
    }

    /// Everything written to the error stream so far
    #[must_use]
    pub fn stderr_output(&self) -> String {
        self.state
            .read()
            .map(|state| String::from_utf8_lossy(&state.stderr).into_owned())
            .unwrap_or_default()
    }

    /// The code of the first exit request, if any
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.exit_codes.first().copied())
    }

    /// How many times exit was requested
    #[must_use]
    pub fn exit_calls(&self) -> usize {
        self.state
            .read()
            .map(|state| state.exit_codes.len())
            .unwrap_or_default()
    }
}

impl System for MockSystem {
    fn args(&self) -> Vec<String> {
        self.state
            .read()
            .map(|state| state.args.clone())
            .unwrap_or_default()
    }

    fn stderr(&self) -> Box<dyn Write + '_> {
        Box::new(MockWriter {
            system: self.clone(),
        })
    }

    fn exit(&self, code: i32) {
        match self.state.write() {
            Ok(mut state) => state.exit_codes.push(code),
            Err(e) => error!("Failed to record exit code {code}: {e}"),
        }
    }
}

/// Writer appending straight into the mock's error buffer
struct MockWriter {
    system: MockSystem,
}

impl Write for MockWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .system
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        state.stderr.extend_from_slice(buf);
        drop(state);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

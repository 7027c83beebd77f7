//! System abstraction for the process boundary
//!
//! This module provides a unified trait for everything a run touches outside
//! the command tree: the argument vector, the error stream and process
//! termination. Tests swap in [`MockSystem`] to observe a run without
//! ending the test process.

use std::io::Write;

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Unified trait for process-level operations
///
/// # Implementations
/// - `RealSystem`: Production implementation using `std::env`, `std::io` and `std::process`
/// - `MockSystem`: Test implementation recording output and exit codes in memory
pub trait System {
    /// The full argument vector, program path first
    fn args(&self) -> Vec<String>;

    /// Stream receiving usage text and error messages
    fn stderr(&self) -> Box<dyn Write + '_>;

    /// Terminate the process with `code`
    ///
    /// `RealSystem` never returns from this call.
    fn exit(&self, code: i32);
}

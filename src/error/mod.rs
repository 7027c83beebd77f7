//! Error handling module
//!
//! Defines the parse, wiring and execution errors along with exit codes

pub mod types;

pub use types::*;

//! Real system implementation using `std::env`, `std::io` and `std::process`

use super::System;
use std::io::{self, Write};

/// Production implementation of System trait
///
/// This implementation directly delegates to the standard library.
#[derive(Debug, Clone, Copy)]
pub struct RealSystem;

impl RealSystem {
    /// Create a new `RealSystem` instance
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for RealSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for RealSystem {
    fn args(&self) -> Vec<String> {
        std::env::args().collect()
    }

    /// Unlocked handle; each write takes the stream lock on its own
    fn stderr(&self) -> Box<dyn Write + '_> {
        Box::new(io::stderr())
    }

    fn exit(&self, code: i32) {
        std::process::exit(code)
    }
}

//! Input for a single run

use crate::system::System;

/// The argument tokens of one run
///
/// Decoupled from the live process so tests can supply synthetic input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    args: Vec<String>,
}

impl Context {
    /// An empty context
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tokens (builder pattern)
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// The tokens of the system's argument vector, minus the program path
    ///
    /// The program name is never matched against the root command, so the
    /// binary can be renamed freely.
    #[must_use]
    pub fn from_system(system: &dyn System) -> Self {
        Self::new().with_args(system.args().into_iter().skip(1))
    }

    #[must_use]
    #[inline]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

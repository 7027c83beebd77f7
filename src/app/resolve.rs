//! Results of walking the command tree and of dispatching to it

use crate::command::Command;
use crate::error::{ExecError, ParseError, exit_code};

/// The chain of commands matched by a run, root first
#[derive(Debug, Clone)]
pub struct Resolution {
    path: Vec<Command>,
}

impl Resolution {
    pub(crate) fn new(root: Command) -> Self {
        Self { path: vec![root] }
    }

    pub(crate) fn push(&mut self, command: Command) {
        self.path.push(command);
    }

    /// Every matched command, root first
    #[must_use]
    #[inline]
    pub fn path(&self) -> &[Command] {
        &self.path
    }

    /// The command whose flags are global: the root
    #[must_use]
    #[inline]
    pub fn globals(&self) -> &Command {
        &self.path[0]
    }

    /// The deepest matched command, the one to execute
    #[must_use]
    #[inline]
    pub fn target(&self) -> &Command {
        &self.path[self.path.len() - 1]
    }
}

/// Resolution stopped at `command` because of `error`
#[derive(Debug, Clone)]
pub struct Unresolved {
    pub command: Command,
    pub error: ParseError,
}

/// What a dispatch amounted to
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Outcome {
    /// Usage was shown instead of executing anything
    Help { command: String },
    /// Flags of `command` could not be parsed
    ParseFailed { command: String, error: ParseError },
    /// The execution target has no handler
    MissingHandler { command: String },
    /// The handler ran and succeeded
    Completed { command: String },
    /// The handler ran and reported an error
    Failed { command: String, error: ExecError },
}

impl Outcome {
    /// Get the process exit code for this outcome
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Help { .. } | Self::Completed { .. } => exit_code::OK,
            Self::ParseFailed { .. } | Self::MissingHandler { .. } => exit_code::GENERAL_ERROR,
            Self::Failed { ref error, .. } => error.code(),
        }
    }

    /// Name of the command the outcome concerns
    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            Self::Help { command }
            | Self::ParseFailed { command, .. }
            | Self::MissingHandler { command }
            | Self::Completed { command }
            | Self::Failed { command, .. } => command,
        }
    }
}

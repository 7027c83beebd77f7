//! Error types for parsing, tree wiring and command execution

use thiserror::Error;

/// Unix exit codes, as documented in the Advanced Bash-Scripting Guide
/// (<https://tldp.org/LDP/abs/html/exitcodes.html>)
pub mod exit_code {
    /// Success
    pub const OK: i32 = 0;
    /// Catchall for general errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Misuse of shell builtins, missing keyword or command
    pub const MISUSE: i32 = 2;
    /// Command invoked cannot execute
    pub const CANNOT_EXECUTE: i32 = 126;
    /// Command not found
    pub const NOT_FOUND: i32 = 127;
    /// Invalid argument to exit
    pub const INVALID_ARGUMENT: i32 = 128;
    /// Terminated by Control-C (128 + SIGINT)
    pub const USER_TERMINATION: i32 = 130;
    /// Exit status out of range
    pub const OUT_OF_RANGE: i32 = 255;
}

/// Failure while parsing a command's own flags, or while resolving the
/// command path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// `-h` or `-help` was given and no flag of that name is declared
    #[error("help requested")]
    HelpRequested,

    /// The flag is not declared on the command being parsed
    #[error("flag provided but not defined: -{name}")]
    UnknownFlag { name: String },

    /// The token starts with a dash but is not a valid flag
    #[error("bad flag syntax: {token}")]
    BadSyntax { token: String },

    /// A value flag was the last token
    #[error("flag needs an argument: -{name}")]
    MissingValue { name: String },

    /// The value could not be parsed as the flag's kind
    #[error("invalid value \"{value}\" for flag -{name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    /// Strict resolution met a token that names none of the children
    #[error("unknown command \"{name}\" for \"{parent}\"")]
    UnknownCommand { name: String, parent: String },
}

impl ParseError {
    /// Whether this is the help request rather than a real failure
    #[must_use]
    #[inline]
    pub const fn is_help(&self) -> bool {
        matches!(*self, Self::HelpRequested)
    }

    /// Get the process exit code for this error
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        if self.is_help() {
            exit_code::OK
        } else {
            exit_code::GENERAL_ERROR
        }
    }

    /// Create an invalid value error
    #[inline]
    pub fn invalid_value<N, V, R>(name: N, value: V, reason: R) -> Self
    where
        N: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        Self::InvalidValue {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Failure while linking commands into a tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WireError {
    /// The child is already attached somewhere
    #[error("command {child} already has the parent: {parent}")]
    AlreadyParented { child: String, parent: String },

    /// Attaching the child would make it its own ancestor
    #[error("command {child} cannot be attached beneath {parent}: it is an ancestor of {parent}")]
    Cycle { child: String, parent: String },
}

/// Failure reported by a command handler, carrying the process exit code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ExecError {
    message: String,
    code: i32,
}

impl ExecError {
    /// Create an error with an explicit exit code
    ///
    /// Exit statuses are a single byte, so codes outside `0..=255` become
    /// [`exit_code::OUT_OF_RANGE`].
    #[inline]
    pub fn new<S: Into<String>>(message: S, code: i32) -> Self {
        let code = if (0..=255).contains(&code) {
            code
        } else {
            exit_code::OUT_OF_RANGE
        };
        Self {
            message: message.into(),
            code,
        }
    }

    /// Create an error exiting with [`exit_code::GENERAL_ERROR`]
    #[inline]
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::new(message, exit_code::GENERAL_ERROR)
    }

    /// Create an error exiting with [`exit_code::CANNOT_EXECUTE`]
    #[inline]
    pub fn cannot_execute<S: Into<String>>(message: S) -> Self {
        Self::new(message, exit_code::CANNOT_EXECUTE)
    }

    /// Create an error exiting with [`exit_code::INVALID_ARGUMENT`]
    #[inline]
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::new(message, exit_code::INVALID_ARGUMENT)
    }

    /// The human readable message
    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The process exit code
    #[must_use]
    #[inline]
    pub const fn code(&self) -> i32 {
        self.code
    }
}

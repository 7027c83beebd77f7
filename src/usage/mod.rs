//! Usage rendering
//!
//! Renders a command, its flags and, recursively, its children. Two
//! renderers ship with the crate: the boxed text layout and JSON.

pub mod json;
pub mod text;

use core::str::FromStr;
use std::io::{self, Write};

use crate::command::Command;
pub use json::{CommandUsage, FlagUsage, JsonUsage};
pub use text::TextUsage;

/// Something that can describe a command tree
pub trait UsageRenderer {
    /// Write the usage of `command` and its descendants to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails
    fn render(&self, command: &Command, out: &mut dyn Write) -> io::Result<()>;
}

/// Output format for usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// Boxed, human readable text
    #[default]
    Text,
    /// Pretty printed JSON document
    Json,
}

impl OutputFormat {
    /// The renderer for this format
    #[must_use]
    pub fn renderer(self) -> Box<dyn UsageRenderer> {
        match self {
            Self::Text => Box::new(TextUsage),
            Self::Json => Box::new(JsonUsage),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {s}. Use 'text' or 'json'")),
        }
    }
}

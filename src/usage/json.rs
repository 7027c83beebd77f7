//! JSON usage for tooling

use std::io::{self, Write};

use serde::Serialize;

use super::UsageRenderer;
use crate::command::Command;
use crate::flag::{Flag, FlagKind};

/// Serializable description of one flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagUsage {
    pub name: String,
    pub kind: FlagKind,
    pub usage: String,
    pub default: String,
}

impl From<&Flag> for FlagUsage {
    #[inline]
    fn from(flag: &Flag) -> Self {
        Self {
            name: flag.name().to_owned(),
            kind: flag.kind(),
            usage: flag.usage().to_owned(),
            default: flag.default_value().to_string(),
        }
    }
}

/// Serializable description of a command and its descendants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandUsage {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub executable: bool,
    pub flags: Vec<FlagUsage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandUsage>,
}

impl From<&Command> for CommandUsage {
    fn from(command: &Command) -> Self {
        Self {
            name: command.name(),
            description: command.description(),
            detail: command.detail(),
            executable: command.is_executable(),
            flags: command.flags().iter().map(FlagUsage::from).collect(),
            commands: command
                .children()
                .iter()
                .map(CommandUsage::from)
                .collect(),
        }
    }
}

/// Renders the command tree as a pretty printed JSON document
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonUsage;

impl UsageRenderer for JsonUsage {
    fn render(&self, command: &Command, out: &mut dyn Write) -> io::Result<()> {
        let usage = CommandUsage::from(command);
        serde_json::to_writer_pretty(&mut *out, &usage).map_err(io::Error::other)?;
        writeln!(out)
    }
}

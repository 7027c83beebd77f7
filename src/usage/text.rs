//! Boxed text usage

use std::io::{self, Write};

use super::UsageRenderer;
use crate::command::Command;
use crate::flag::{Flag, FlagKind, FlagValue};

const DIVIDER_WIDTH: usize = 78;

/// Renders each command as a titled block followed by its children
///
/// ```text
/// |------------------------------------------------------------------------------
/// | SAY - the cow speaks
/// |------------------------------------------------------------------------------
///
///  ARGS:
///  ⎺⎺⎺
///   -repeat int
///     	how many times it repeats the word (default 1)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextUsage;

impl UsageRenderer for TextUsage {
    fn render(&self, command: &Command, out: &mut dyn Write) -> io::Result<()> {
        let divider = "-".repeat(DIVIDER_WIDTH);
        let title = command.name().to_uppercase();

        writeln!(out)?;
        writeln!(out, "|{divider}")?;
        match command.description() {
            Some(description) => writeln!(out, "| {title} - {description}")?,
            None => writeln!(out, "| {title}")?,
        }
        writeln!(out, "|{divider}")?;

        writeln!(out, "\n ARGS:\n ⎺⎺⎺")?;
        let flags = command.flags().iter().cloned().collect::<Vec<_>>();
        if flags.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for flag in &flags {
            write_flag(flag, out)?;
        }

        if let Some(detail) = command.detail() {
            writeln!(out, "\n USAGE:\n ⎺⎺⎺")?;
            for line in detail.lines() {
                writeln!(out, "  {line}")?;
            }
        }

        for child in command.children() {
            self.render(&child, out)?;
        }
        Ok(())
    }
}

fn write_flag(flag: &Flag, out: &mut dyn Write) -> io::Result<()> {
    if flag.kind() == FlagKind::Bool {
        writeln!(out, "  -{}", flag.name())?;
    } else {
        writeln!(out, "  -{} {}", flag.name(), flag.kind())?;
    }

    let default = flag.default_value();
    if default.is_zero() {
        writeln!(out, "    \t{}", flag.usage())
    } else if let FlagValue::String(text) = default {
        writeln!(out, "    \t{} (default {text:?})", flag.usage())
    } else {
        writeln!(out, "    \t{} (default {default})", flag.usage())
    }
}

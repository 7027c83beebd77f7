//! Splitting a command's own flags from the positional remainder

use crate::error::ParseError;
use crate::flag::{FlagKind, FlagStore};

const HELP_NAMES: [&str; 2] = ["h", "help"];

/// Result of parsing one command's tokens
#[derive(Debug)]
pub(crate) struct Parsed {
    /// Tokens from the first positional onward
    pub remainder: Vec<String>,
    pub result: Result<(), ParseError>,
}

/// Consume leading flag tokens into `flags`
///
/// Stops at the first token that is not flag syntax, or after a `--`
/// terminator. Everything from there on is returned untouched, including
/// later tokens that look like flags. On error the remainder is whatever
/// follows the offending token.
pub(crate) fn parse_flags(flags: &mut FlagStore, tokens: &[String]) -> Parsed {
    let mut index = 0;
    let result = loop {
        match parse_one(flags, tokens, &mut index) {
            Ok(true) => {}
            Ok(false) => break Ok(()),
            Err(e) => break Err(e),
        }
    };

    Parsed {
        remainder: tokens.get(index..).unwrap_or_default().to_vec(),
        result,
    }
}

/// Parse the flag at `tokens[*index]`, advancing past what it consumed.
/// `Ok(false)` means flag parsing is over.
fn parse_one(
    flags: &mut FlagStore,
    tokens: &[String],
    index: &mut usize,
) -> Result<bool, ParseError> {
    let Some(token) = tokens.get(*index) else {
        return Ok(false);
    };
    if token.len() < 2 || !token.starts_with('-') {
        return Ok(false);
    }

    let body = if let Some(long) = token.strip_prefix("--") {
        if long.is_empty() {
            // "--" terminates the flags
            *index += 1;
            return Ok(false);
        }
        long
    } else {
        &token[1..]
    };
    if body.starts_with('-') || body.starts_with('=') {
        return Err(ParseError::BadSyntax {
            token: token.clone(),
        });
    }
    *index += 1;

    let (name, inline_value) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };

    let Some(kind) = flags.kind(name) else {
        if HELP_NAMES.contains(&name) {
            return Err(ParseError::HelpRequested);
        }
        return Err(ParseError::UnknownFlag {
            name: name.to_owned(),
        });
    };

    if kind == FlagKind::Bool {
        flags.set(name, inline_value.unwrap_or("true"))?;
        return Ok(true);
    }

    let value = match inline_value {
        Some(value) => value,
        None => {
            let value = tokens.get(*index).ok_or_else(|| ParseError::MissingValue {
                name: name.to_owned(),
            })?;
            *index += 1;
            value.as_str()
        }
    };
    flags.set(name, value)?;
    Ok(true)
}

//! Typed flags
//!
//! A flag is a named, typed cell owned by one command. Its kind is chosen by
//! the type of the default value given at registration and never changes.

pub mod duration;
pub mod store;

use core::fmt;
use core::time::Duration;

use serde::Serialize;

use crate::error::ParseError;
pub use duration::{format_duration, parse_duration};
pub use store::FlagStore;

/// The kind of value a flag holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum FlagKind {
    Bool,
    Int,
    Int64,
    Uint,
    Uint64,
    Float64,
    String,
    Duration,
}

impl fmt::Display for FlagKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint64 => "uint64",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// A flag value, tagged with its kind
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum FlagValue {
    Bool(bool),
    Int(i32),
    Int64(i64),
    Uint(u32),
    Uint64(u64),
    Float64(f64),
    String(String),
    /// Kept as text; read back through [`parse_duration`]
    Duration(String),
}

impl FlagValue {
    /// The kind tag of this value
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> FlagKind {
        match *self {
            Self::Bool(_) => FlagKind::Bool,
            Self::Int(_) => FlagKind::Int,
            Self::Int64(_) => FlagKind::Int64,
            Self::Uint(_) => FlagKind::Uint,
            Self::Uint64(_) => FlagKind::Uint64,
            Self::Float64(_) => FlagKind::Float64,
            Self::String(_) => FlagKind::String,
            Self::Duration(_) => FlagKind::Duration,
        }
    }

    /// Parse `raw` as a value of `kind`
    ///
    /// # Errors
    ///
    /// Returns an error message if `raw` is not a valid literal for `kind`
    pub fn parse(kind: FlagKind, raw: &str) -> Result<Self, String> {
        let value = match kind {
            FlagKind::Bool => Self::Bool(parse_bool(raw)?),
            FlagKind::Int => Self::Int(raw.parse().map_err(|e| format!("{e}"))?),
            FlagKind::Int64 => Self::Int64(raw.parse().map_err(|e| format!("{e}"))?),
            FlagKind::Uint => Self::Uint(raw.parse().map_err(|e| format!("{e}"))?),
            FlagKind::Uint64 => Self::Uint64(raw.parse().map_err(|e| format!("{e}"))?),
            FlagKind::Float64 => Self::Float64(raw.parse().map_err(|e| format!("{e}"))?),
            FlagKind::String => Self::String(raw.to_owned()),
            FlagKind::Duration => {
                parse_duration(raw)?;
                Self::Duration(raw.to_owned())
            }
        };
        Ok(value)
    }

    /// Whether this is the zero value of its kind
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Bool(v) => !v,
            Self::Int(v) => *v == 0,
            Self::Int64(v) => *v == 0,
            Self::Uint(v) => *v == 0,
            Self::Uint64(v) => *v == 0,
            Self::Float64(v) => *v == 0.0,
            Self::String(v) => v.is_empty(),
            Self::Duration(v) => parse_duration(v).is_ok_and(|d| d.is_zero()),
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Uint64(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::String(v) | Self::Duration(v) => f.write_str(v),
        }
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(format!("{raw:?} is not a boolean")),
    }
}

impl From<bool> for FlagValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FlagValue {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for FlagValue {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<u32> for FlagValue {
    #[inline]
    fn from(value: u32) -> Self {
        Self::Uint(value)
    }
}

impl From<u64> for FlagValue {
    #[inline]
    fn from(value: u64) -> Self {
        Self::Uint64(value)
    }
}

impl From<f64> for FlagValue {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float64(value)
    }
}

impl From<&str> for FlagValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for FlagValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Duration> for FlagValue {
    #[inline]
    fn from(value: Duration) -> Self {
        Self::Duration(format_duration(value))
    }
}

/// Types a flag value can be read back as
///
/// Reading never coerces: a value is only returned when the stored kind is
/// exactly the one the type maps to.
pub trait FromFlagValue: Sized {
    /// Extract `Self` from a value of the matching kind
    fn from_flag_value(value: &FlagValue) -> Option<Self>;
}

macro_rules! from_flag_value {
    ($ty:ty, $variant:ident) => {
        impl FromFlagValue for $ty {
            #[inline]
            fn from_flag_value(value: &FlagValue) -> Option<Self> {
                match value {
                    FlagValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

from_flag_value!(bool, Bool);
from_flag_value!(i32, Int);
from_flag_value!(i64, Int64);
from_flag_value!(u32, Uint);
from_flag_value!(u64, Uint64);
from_flag_value!(f64, Float64);
from_flag_value!(String, String);

impl FromFlagValue for Duration {
    #[inline]
    fn from_flag_value(value: &FlagValue) -> Option<Self> {
        match value {
            FlagValue::Duration(text) => parse_duration(text).ok(),
            _ => None,
        }
    }
}

/// A registered flag: its name, usage text, default and current value
#[derive(Debug, Clone, PartialEq)]
pub struct Flag {
    name: String,
    usage: String,
    default: FlagValue,
    value: FlagValue,
    set: bool,
}

impl Flag {
    pub(crate) fn new(name: String, default: FlagValue, usage: String) -> Self {
        Self {
            name,
            usage,
            value: default.clone(),
            default,
            set: false,
        }
    }

    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    #[inline]
    pub fn usage(&self) -> &str {
        &self.usage
    }

    #[must_use]
    #[inline]
    pub const fn default_value(&self) -> &FlagValue {
        &self.default
    }

    #[must_use]
    #[inline]
    pub const fn value(&self) -> &FlagValue {
        &self.value
    }

    #[must_use]
    #[inline]
    pub const fn kind(&self) -> FlagKind {
        self.default.kind()
    }

    /// Whether the last parse assigned this flag
    #[must_use]
    #[inline]
    pub const fn was_set(&self) -> bool {
        self.set
    }

    pub(crate) fn assign(&mut self, raw: &str) -> Result<(), ParseError> {
        self.value = FlagValue::parse(self.kind(), raw)
            .map_err(|reason| ParseError::invalid_value(self.name.as_str(), raw, reason))?;
        self.set = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_default_type() {
        assert_eq!(FlagValue::from(true).kind(), FlagKind::Bool);
        assert_eq!(FlagValue::from(1).kind(), FlagKind::Int);
        assert_eq!(FlagValue::from(1_i64).kind(), FlagKind::Int64);
        assert_eq!(FlagValue::from(1_u32).kind(), FlagKind::Uint);
        assert_eq!(FlagValue::from(1_u64).kind(), FlagKind::Uint64);
        assert_eq!(FlagValue::from(1.5).kind(), FlagKind::Float64);
        assert_eq!(FlagValue::from("x").kind(), FlagKind::String);
        assert_eq!(
            FlagValue::from(Duration::from_secs(90)),
            FlagValue::Duration("1m30s".to_owned())
        );
    }

    #[test]
    fn test_parse_respects_kind() {
        assert_eq!(
            FlagValue::parse(FlagKind::Bool, "T").unwrap(),
            FlagValue::Bool(true)
        );
        assert!(FlagValue::parse(FlagKind::Bool, "yes").is_err());
        assert!(FlagValue::parse(FlagKind::Uint, "-3").is_err());
        assert!(FlagValue::parse(FlagKind::Int, "3.5").is_err());
        assert!(FlagValue::parse(FlagKind::Duration, "soon").is_err());
        assert_eq!(
            FlagValue::parse(FlagKind::Float64, "2.5").unwrap(),
            FlagValue::Float64(2.5)
        );
    }

    #[test]
    fn test_no_coercion_on_read() {
        let value = FlagValue::String("5".to_owned());
        assert_eq!(i32::from_flag_value(&value), None);
        assert_eq!(String::from_flag_value(&value), Some("5".to_owned()));
        assert_eq!(i64::from_flag_value(&FlagValue::Int(5)), None);
    }

    #[test]
    fn test_zero_values() {
        assert!(FlagValue::from("").is_zero());
        assert!(FlagValue::from(false).is_zero());
        assert!(FlagValue::from(Duration::ZERO).is_zero());
        assert!(!FlagValue::from("mooooo").is_zero());
    }
}

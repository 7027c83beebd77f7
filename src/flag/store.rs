//! Name to typed-cell mapping owned by each command

use std::collections::BTreeMap;

use tracing::warn;

use super::{Flag, FlagKind, FlagValue, FromFlagValue};
use crate::error::ParseError;

/// The flags declared on one command
///
/// Iteration is in name order so usage output is stable.
///
/// # Example
/// ```
/// use kli::flag::{FlagKind, FlagStore};
///
/// let mut store = FlagStore::new();
/// store.register("repeat", 1, "how many times it repeats the word");
/// store.set("repeat", "5").unwrap();
///
/// assert_eq!(store.get::<i32>("repeat"), Some(5));
/// assert_eq!(store.get::<String>("repeat"), None);
/// assert_eq!(store.kind("repeat"), Some(FlagKind::Int));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagStore {
    flags: BTreeMap<String, Flag>,
}

impl FlagStore {
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a flag; the type of `default` fixes its kind
    ///
    /// Declaring a name twice replaces the earlier flag.
    pub fn register<N, V, U>(&mut self, name: N, default: V, usage: U) -> &Flag
    where
        N: Into<String>,
        V: Into<FlagValue>,
        U: Into<String>,
    {
        let name = name.into();
        let flag = Flag::new(name.clone(), default.into(), usage.into());
        if let Some(previous) = self.flags.get(&name) {
            warn!(
                "flag -{} redeclared, replacing {} flag with {} flag",
                name,
                previous.kind(),
                flag.kind()
            );
        }
        self.flags.insert(name.clone(), flag);
        &self.flags[&name]
    }

    /// Read a flag's current value
    ///
    /// Returns `None` when the flag does not exist or its kind is not the
    /// one `T` maps to.
    #[must_use]
    #[inline]
    pub fn get<T: FromFlagValue>(&self, name: &str) -> Option<T> {
        self.flags
            .get(name)
            .and_then(|flag| T::from_flag_value(flag.value()))
    }

    /// Assign a flag from its textual form
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No flag of that name is declared
    /// - `raw` is not a valid literal for the flag's kind
    pub fn set(&mut self, name: &str, raw: &str) -> Result<(), ParseError> {
        let flag = self
            .flags
            .get_mut(name)
            .ok_or_else(|| ParseError::UnknownFlag {
                name: name.to_owned(),
            })?;
        flag.assign(raw)
    }

    #[must_use]
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    #[must_use]
    #[inline]
    pub fn kind(&self, name: &str) -> Option<FlagKind> {
        self.flags.get(name).map(Flag::kind)
    }

    /// Every declared flag with its kind
    #[must_use]
    pub fn kinds(&self) -> BTreeMap<String, FlagKind> {
        self.flags
            .iter()
            .map(|(name, flag)| (name.clone(), flag.kind()))
            .collect()
    }

    #[must_use]
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

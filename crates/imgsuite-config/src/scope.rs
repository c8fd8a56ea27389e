use std::collections::BTreeMap;
use std::ffi::OsString;

use crate::{truth, Error, Result};

/// Named string values visible to condition checks.
pub trait Scope {
    fn get(&self, name: &str) -> Option<&str>;

    /// Returns whether the variable is set to a true value. Unset variables are not true.
    fn is_true(&self, name: &str) -> bool {
        self.get(name).is_some_and(truth::is_true)
    }

    /// Returns whether the variable is set, and set to a false value. Unset variables are not
    /// explicitly false.
    fn is_explicitly_false(&self, name: &str) -> bool {
        self.get(name).is_some_and(truth::is_false)
    }
}

/// Variables defined by the build configuration, such as `PNG_FOUND` or `ENABLE_PNG`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables(BTreeMap<String, String>);

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Scope for Variables {
    fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Splits a `NAME=VALUE` definition. The value may be empty, the name may not.
pub fn parse_definition(definition: &str) -> Result<(String, String)> {
    match definition.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_owned(), value.to_owned()))
        }
        _ => Err(Error::InvalidVariable(definition.to_owned())),
    }
}

/// Snapshot of the process environment.
///
/// Captured once so that every check in a configuration pass sees the same values. Variables
/// that are not valid Unicode are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvScope(BTreeMap<String, String>);

impl EnvScope {
    pub fn capture() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    fn from_os_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        let map = vars
            .into_iter()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self(map)
    }

    /// Returns the value, treating an empty value as unset.
    pub fn get_nonempty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }
}

impl Scope for EnvScope {
    fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvScope {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

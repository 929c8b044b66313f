//! Ordered environment variable set handed to build commands

use serde::{Deserialize, Serialize};
use std::ffi::OsString;

/// Ordered mapping of environment variable names to values
///
/// Keys are unique. Setting an existing key drops the earlier binding and
/// appends the new one, so the most recent assignment is always last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    vars: Vec<(String, String)>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment
    ///
    /// Variables whose name or value is not valid UTF-8 are left out. Use
    /// [`Environment::from_os_vars`] to learn which ones.
    pub fn from_process() -> Self {
        Self::from_os_vars(std::env::vars_os()).0
    }

    /// Build from OS-encoded pairs, keeping the UTF-8 ones
    ///
    /// Returns the environment and the names of the skipped variables.
    pub fn from_os_vars<I>(vars: I) -> (Self, Vec<OsString>)
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut env = Environment::new();
        let mut skipped = Vec::new();
        for (key, value) in vars {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => env.set(key, value),
                (Ok(key), Err(_)) => skipped.push(OsString::from(key)),
                (Err(key), _) => skipped.push(key),
            }
        }
        (env, skipped)
    }

    /// Bind `key` to `value`, moving it to the end
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.vars.retain(|(k, _)| *k != key);
        self.vars.push((key, value.into()));
    }

    /// Builder-style [`Environment::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Render as `KEY=value` assignments
    pub fn to_assignments(&self) -> Vec<String> {
        self.vars.iter().map(|(k, v)| format!("{}={}", k, v)).collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Environment::new();
        for (k, v) in iter {
            env.set(k, v);
        }
        env
    }
}

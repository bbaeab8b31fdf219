//! Raw environment input

use crate::keys;
use std::collections::BTreeMap;

/// Unvalidated key/value parameters as handed to the resolver
///
/// Blank values are treated as absent, so `ENVIRONMENT=""` falls back to the
/// default exactly like an unset variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    values: BTreeMap<String, String>,
}

impl RawInput {
    /// Empty input; every parameter takes its default
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the known keys from the process environment
    ///
    /// This is the only place the environment is read. Keys with values that
    /// are not valid unicode are skipped.
    #[must_use]
    pub fn from_env() -> Self {
        keys::ALL
            .iter()
            .filter_map(|&key| std::env::var(key).ok().map(|value| (key, value)))
            .collect()
    }

    /// Set a value
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Trimmed value, `None` when absent or blank
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Number of keys present, blank ones included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no key is present
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawInput
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

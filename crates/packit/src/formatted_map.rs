// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Aligned, sorted rendering of key/value pairs for build output.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::environment::EnvironmentSource;

#[cfg(test)]
#[path = "./formatted_map_test.rs"]
mod formatted_map_test;

/// A string-keyed map that renders as one aligned line per key.
///
/// ```text
/// first  -> "1"
/// second -> "2"
/// third  -> "3"
/// ```
///
/// Lines are always sorted by key and the key column is as wide as the
/// longest key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormattedMap<V = String>(BTreeMap<String, V>);

impl<V> FormattedMap<V> {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &V)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FormattedMap {
    /// Build a display map from environment operations or a plain string map.
    ///
    /// See [`EnvironmentSource`] for how each source is flattened.
    pub fn from_environment<E: EnvironmentSource + ?Sized>(source: &E) -> Self {
        Self(source.resolve())
    }
}

impl<V> Default for FormattedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for FormattedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<V: fmt::Display> fmt::Display for FormattedMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .0
            .keys()
            .map(|key| key.chars().count())
            .max()
            .unwrap_or_default();

        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{key:<width$} -> \"{value}\"")?;
        }
        Ok(())
    }
}

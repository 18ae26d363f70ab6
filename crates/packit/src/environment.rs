// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Environment variable operations for build and launch layers.
//!
//! An [`Environment`] holds keys of the form `NAME.operation`, mirroring the
//! files of a layer's `env/` directory. The operation suffix tells the
//! lifecycle how to combine the value with any existing value of `NAME`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Error;

#[cfg(test)]
#[path = "./environment_test.rs"]
mod environment_test;

/// Operation suffix of an environment key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnvOp {
    /// Replace any existing value.
    Override,
    /// Set the value only if the variable is unset.
    Default,
    /// Place the value before the existing value.
    Prepend,
    /// Place the value after the existing value.
    Append,
    /// Separator used by prepend and append.
    Delim,
}

impl EnvOp {
    /// Parse an operation suffix, returning `None` for unknown suffixes.
    pub fn parse(suffix: &str) -> Option<Self> {
        match suffix {
            "override" => Some(Self::Override),
            "default" => Some(Self::Default),
            "prepend" => Some(Self::Prepend),
            "append" => Some(Self::Append),
            "delim" => Some(Self::Delim),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Override => "override",
            Self::Default => "default",
            Self::Prepend => "prepend",
            Self::Append => "append",
            Self::Delim => "delim",
        }
    }
}

impl fmt::Display for EnvOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split `NAME.operation` into the variable name and its operation.
///
/// Keys without a recognised suffix are returned whole with no operation.
pub fn split_key(key: &str) -> (&str, Option<EnvOp>) {
    match key.rsplit_once('.') {
        Some((name, suffix)) => match EnvOp::parse(suffix) {
            Some(op) => (name, Some(op)),
            None => (key, None),
        },
        None => (key, None),
    }
}

/// A set of environment variable operations keyed by `NAME.operation`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment(BTreeMap<String, String>);

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an environment from a layer `env/` directory.
    ///
    /// Each regular file becomes one key (the file name) whose value is the
    /// file content. A missing directory yields an empty environment.
    pub fn load<P: AsRef<Path>>(dir: P) -> crate::Result<Self> {
        let dir = dir.as_ref();
        let read_dir = match std::fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(?dir, "no environment directory");
                return Ok(Self::new());
            }
            Err(error) => {
                return Err(Error::ReadFailed {
                    path: dir.to_path_buf(),
                    error,
                });
            }
        };

        let mut env = Self::new();
        for dirent in read_dir {
            let dirent = dirent?;
            let path = dirent.path();
            if !path.is_file() {
                tracing::warn!(?path, "skipping non-file in environment directory");
                continue;
            }
            let Some(key) = dirent.file_name().to_str().map(String::from) else {
                tracing::warn!(?path, "skipping environment file with non-utf8 name");
                continue;
            };
            let value = std::fs::read_to_string(&path).map_err(|error| Error::ReadFailed {
                path: path.clone(),
                error,
            })?;
            tracing::trace!(%key, "loaded environment entry");
            env.0.insert(key, value);
        }

        tracing::debug!(?dir, count = env.len(), "loaded environment");
        Ok(env)
    }

    /// Record `NAME.override`.
    pub fn set_override(&mut self, name: impl AsRef<str>, value: impl fmt::Display) {
        self.insert_op(name.as_ref(), EnvOp::Override, value.to_string());
    }

    /// Record `NAME.default`.
    pub fn set_default(&mut self, name: impl AsRef<str>, value: impl fmt::Display) {
        self.insert_op(name.as_ref(), EnvOp::Default, value.to_string());
    }

    /// Record `NAME.prepend`, and `NAME.delim` when `delim` is not empty.
    pub fn prepend(&mut self, name: impl AsRef<str>, value: impl fmt::Display, delim: &str) {
        let name = name.as_ref();
        self.insert_op(name, EnvOp::Prepend, value.to_string());
        if !delim.is_empty() {
            self.insert_op(name, EnvOp::Delim, delim.to_string());
        }
    }

    /// Record `NAME.append`, and `NAME.delim` when `delim` is not empty.
    pub fn append(&mut self, name: impl AsRef<str>, value: impl fmt::Display, delim: &str) {
        let name = name.as_ref();
        self.insert_op(name, EnvOp::Append, value.to_string());
        if !delim.is_empty() {
            self.insert_op(name, EnvOp::Delim, delim.to_string());
        }
    }

    fn insert_op(&mut self, name: &str, op: EnvOp, value: String) {
        self.0.insert(format!("{name}.{op}"), value);
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Something that can be flattened into one display value per variable.
pub trait EnvironmentSource {
    fn resolve(&self) -> BTreeMap<String, String>;
}

impl<S: BuildHasher> EnvironmentSource for HashMap<String, String, S> {
    fn resolve(&self) -> BTreeMap<String, String> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl EnvironmentSource for BTreeMap<String, String> {
    fn resolve(&self) -> BTreeMap<String, String> {
        self.clone()
    }
}

/// Operations collected for a single variable.
#[derive(Default)]
struct Directives<'a> {
    override_value: Option<&'a str>,
    default_value: Option<&'a str>,
    prepend: Option<&'a str>,
    append: Option<&'a str>,
    delim: &'a str,
}

impl Directives<'_> {
    fn display_value(&self, name: &str) -> Option<String> {
        if let Some(value) = self.override_value.or(self.default_value) {
            return Some(value.to_string());
        }
        let delim = self.delim;
        match (self.prepend, self.append) {
            (Some(pre), Some(post)) => Some(format!("{pre}{delim}${name}{delim}{post}")),
            (Some(pre), None) => Some(format!("{pre}{delim}${name}")),
            (None, Some(post)) => Some(format!("${name}{delim}{post}")),
            (None, None) => None,
        }
    }
}

impl EnvironmentSource for Environment {
    /// Collapse the operations of each variable into one value.
    ///
    /// Override wins over default, and either wins over prepend/append.
    /// A variable with only a delimiter produces nothing. Keys without an
    /// operation suffix pass through unchanged.
    fn resolve(&self) -> BTreeMap<String, String> {
        let mut resolved = BTreeMap::new();
        let mut vars: BTreeMap<&str, Directives<'_>> = BTreeMap::new();

        for (key, value) in &self.0 {
            let (name, op) = split_key(key);
            let Some(op) = op else {
                resolved.insert(key.clone(), value.clone());
                continue;
            };
            let directives = vars.entry(name).or_default();
            match op {
                EnvOp::Override => directives.override_value = Some(value.as_str()),
                EnvOp::Default => directives.default_value = Some(value.as_str()),
                EnvOp::Prepend => directives.prepend = Some(value.as_str()),
                EnvOp::Append => directives.append = Some(value.as_str()),
                EnvOp::Delim => directives.delim = value.as_str(),
            }
        }

        for (name, directives) in vars {
            if let Some(value) = directives.display_value(name) {
                resolved.insert(name.to_string(), value);
            }
        }
        resolved
    }
}

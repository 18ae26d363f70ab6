// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Service bindings mounted under `SERVICE_BINDING_ROOT`.
//!
//! Each binding is a directory whose files are its entries. The `type` entry
//! is required and `provider` is optional.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{Entry, Error, Result};

#[cfg(test)]
#[path = "./binding_test.rs"]
mod binding_test;

/// Environment variable naming the directory that holds all bindings.
pub const SERVICE_BINDING_ROOT_ENV: &str = "SERVICE_BINDING_ROOT";

const TYPE_ENTRY: &str = "type";
const PROVIDER_ENTRY: &str = "provider";

/// A single service binding.
#[derive(Debug)]
pub struct Binding {
    /// Directory name of the binding.
    pub name: String,
    pub path: PathBuf,
    /// Content of the `type` entry.
    pub binding_type: String,
    /// Content of the `provider` entry, if present.
    pub provider: Option<String>,
    /// Every entry of the binding, keyed by file name.
    pub entries: BTreeMap<String, Entry>,
}

impl Binding {
    /// Load the binding rooted at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(Error::BindingNotFound(path.to_path_buf()));
        }
        let path = dunce::canonicalize(path).map_err(|error| Error::ReadFailed {
            path: path.to_path_buf(),
            error,
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let read_dir = std::fs::read_dir(&path).map_err(|error| Error::ReadFailed {
            path: path.clone(),
            error,
        })?;

        let mut entries = BTreeMap::new();
        for dirent in read_dir {
            let dirent = dirent?;
            let entry_name = dirent.file_name().to_string_lossy().into_owned();
            let entry_path = dirent.path();
            // Kubernetes projects entries through hidden `..data` links
            if entry_name.starts_with('.') || !entry_path.is_file() {
                tracing::trace!(?entry_path, "skipping binding entry");
                continue;
            }
            entries.insert(entry_name, Entry::new(entry_path));
        }

        let binding_type = match entries.get_mut(TYPE_ENTRY) {
            Some(entry) => entry.read_string()?.trim().to_string(),
            None => return Err(Error::MissingBindingType(path)),
        };
        let provider = match entries.get_mut(PROVIDER_ENTRY) {
            Some(entry) => Some(entry.read_string()?.trim().to_string()),
            None => None,
        };

        tracing::debug!(%name, %binding_type, entries = entries.len(), "loaded binding");
        Ok(Self {
            name,
            path,
            binding_type,
            provider,
            entries,
        })
    }

    pub fn entry(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries.get_mut(name)
    }

    fn matches(&self, binding_type: &str, provider: Option<&str>) -> bool {
        self.binding_type.eq_ignore_ascii_case(binding_type)
            && provider.is_none_or(|wanted| {
                self.provider
                    .as_deref()
                    .is_some_and(|p| p.eq_ignore_ascii_case(wanted))
            })
    }
}

/// Finds bindings under a binding root directory.
#[derive(Debug, Clone)]
pub struct BindingResolver {
    root: PathBuf,
}

impl BindingResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Use the root named by `SERVICE_BINDING_ROOT`.
    pub fn from_env() -> Result<Self> {
        std::env::var_os(SERVICE_BINDING_ROOT_ENV)
            .filter(|root| !root.is_empty())
            .map(Self::new)
            .ok_or(Error::BindingRootUnset)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every binding under the root, sorted by name.
    ///
    /// A missing root means there are no bindings.
    pub fn load_all(&self) -> Result<Vec<Binding>> {
        let read_dir = match std::fs::read_dir(&self.root) {
            Ok(read_dir) => read_dir,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(root = ?self.root, "binding root does not exist");
                return Ok(Vec::new());
            }
            Err(error) => {
                return Err(Error::ReadFailed {
                    path: self.root.clone(),
                    error,
                });
            }
        };

        let mut bindings = Vec::new();
        for dirent in read_dir {
            let path = dirent?.path();
            if !path.is_dir() {
                continue;
            }
            bindings.push(Binding::load(&path)?);
        }
        bindings.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(bindings)
    }

    /// Bindings whose type (and provider, if given) match, ignoring case.
    pub fn resolve(&self, binding_type: &str, provider: Option<&str>) -> Result<Vec<Binding>> {
        let bindings: Vec<Binding> = self
            .load_all()?
            .into_iter()
            .filter(|b| b.matches(binding_type, provider))
            .collect();
        tracing::debug!(%binding_type, ?provider, found = bindings.len(), "resolved bindings");
        Ok(bindings)
    }

    /// The single binding matching the query.
    pub fn resolve_one(&self, binding_type: &str, provider: Option<&str>) -> Result<Binding> {
        let mut bindings = self.resolve(binding_type, provider)?;
        if bindings.len() != 1 {
            return Err(Error::BindingCount {
                binding_type: binding_type.to_string(),
                count: bindings.len(),
            });
        }
        Ok(bindings.remove(0))
    }
}

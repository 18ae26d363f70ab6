// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Read-only content of a service binding entry.

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::Error;

#[cfg(test)]
#[path = "./entry_test.rs"]
mod entry_test;

#[derive(Debug)]
enum Source {
    /// Content of the file at `path`, opened on the first streaming read.
    File { path: PathBuf, file: Option<File> },
    /// In-memory content with its own read position.
    Value(Cursor<Vec<u8>>),
}

/// The read-only content of a binding entry.
///
/// An entry is backed either by a file or by a predefined value. Streaming
/// reads go through [`Read`] and keep their position until [`Entry::close`]
/// resets the entry.
#[derive(Debug)]
pub struct Entry {
    source: Source,
}

impl Entry {
    /// Create an entry whose content is the file at `path`.
    ///
    /// The file is not touched until it is read.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File {
                path: path.into(),
                file: None,
            },
        }
    }

    /// Create an entry with a predefined value.
    pub fn with_value(value: impl Into<Vec<u8>>) -> Self {
        Self {
            source: Source::Value(Cursor::new(value.into())),
        }
    }

    /// The backing file, if this entry is file-backed.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::File { path, .. } => Some(path),
            Source::Value(_) => None,
        }
    }

    /// Read the entire raw content of the entry.
    ///
    /// File-backed entries read the whole file and leave no handle open, so
    /// there is no need to call [`Entry::close`] afterwards. Value-backed
    /// entries return everything from the current read position onward.
    pub fn read_bytes(&mut self) -> crate::Result<Vec<u8>> {
        match &mut self.source {
            Source::File { path, .. } => std::fs::read(&*path).map_err(|error| Error::ReadFailed {
                path: path.clone(),
                error,
            }),
            Source::Value(cursor) => {
                let mut buf = Vec::new();
                cursor.read_to_end(&mut buf)?;
                Ok(buf)
            }
        }
    }

    /// Read the entire content of the entry as a string.
    ///
    /// Bytes are not validated; invalid UTF-8 sequences are replaced.
    pub fn read_string(&mut self) -> crate::Result<String> {
        let bytes = self.read_bytes()?;
        Ok(match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }

    /// Reset the entry so the next [`Read::read`] starts from the beginning.
    ///
    /// Closing an entry that is not open is a no-op.
    pub fn close(&mut self) -> crate::Result<()> {
        match &mut self.source {
            Source::File { path, file } => {
                if file.take().is_some() {
                    tracing::debug!(?path, "closed binding entry");
                }
            }
            Source::Value(cursor) => {
                cursor.seek(SeekFrom::Start(0))?;
            }
        }
        Ok(())
    }
}

impl Read for Entry {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match &mut self.source {
            Source::Value(cursor) => cursor.read(buf),
            Source::File { path, file } => {
                let file = match file {
                    Some(file) => file,
                    None => {
                        tracing::debug!(?path, "opening binding entry");
                        file.insert(File::open(&*path)?)
                    }
                };
                file.read(buf)
            }
        }
    }
}

// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for packit operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience Result type with packit Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during packit operations.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Failed to read file
    #[error("Failed to read file: {path:?}")]
    #[diagnostic(code(packit::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Binding directory does not exist
    #[error("Service binding not found at {0:?}")]
    #[diagnostic(
        code(packit::binding_not_found),
        help("A binding is a directory containing one file per entry")
    )]
    BindingNotFound(PathBuf),

    /// Binding directory has no `type` entry
    #[error("Service binding at {0:?} has no 'type' entry")]
    #[diagnostic(
        code(packit::missing_binding_type),
        help("Every binding must contain a file named 'type'")
    )]
    MissingBindingType(PathBuf),

    /// SERVICE_BINDING_ROOT is not set
    #[error("SERVICE_BINDING_ROOT is not set")]
    #[diagnostic(
        code(packit::binding_root_unset),
        help("Export SERVICE_BINDING_ROOT or pass the root directory explicitly")
    )]
    BindingRootUnset,

    /// Wrong number of bindings matched a query
    #[error("Expected exactly 1 binding of type '{binding_type}', found {count}")]
    #[diagnostic(code(packit::binding_count))]
    BindingCount { binding_type: String, count: usize },

    /// IO error passthrough
    #[error(transparent)]
    #[diagnostic(code(packit::io_error))]
    Io(#[from] std::io::Error),
}

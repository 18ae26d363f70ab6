// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! packit - helpers for writing buildpacks
//!
//! This crate provides small building blocks shared by buildpack
//! implementations:
//!
//! - [`Environment`] records how a layer modifies environment variables
//!   (`NAME.override`, `NAME.default`, `NAME.prepend`, `NAME.append`,
//!   `NAME.delim`).
//! - [`FormattedMap`] renders key/value pairs as aligned text for build logs.
//! - [`Entry`] and [`Binding`] give read-only access to service bindings.
//!
//! # Example
//!
//! ```
//! use packit::{Environment, FormattedMap};
//!
//! let mut env = Environment::new();
//! env.prepend("PATH", "/layers/node/bin", ":");
//! env.set_default("NODE_ENV", "production");
//!
//! let map = FormattedMap::from_environment(&env);
//! assert_eq!(
//!     map.to_string(),
//!     "NODE_ENV -> \"production\"\nPATH     -> \"/layers/node/bin:$PATH\""
//! );
//! ```

pub mod binding;
pub mod entry;
pub mod environment;
pub mod error;
pub mod formatted_map;

pub use binding::{Binding, BindingResolver, SERVICE_BINDING_ROOT_ENV};
pub use entry::Entry;
pub use environment::{EnvOp, Environment, EnvironmentSource, split_key};
pub use error::{Error, Result};
pub use formatted_map::FormattedMap;

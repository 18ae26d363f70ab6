// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `packit bindings` command.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use miette::Result;
use packit::{Binding, BindingResolver, FormattedMap};

/// List service bindings and their entries
#[derive(Debug, Args)]
pub struct CmdBindings {
    /// Directory containing the bindings
    #[clap(long, env = packit::SERVICE_BINDING_ROOT_ENV)]
    root: Option<PathBuf>,

    /// Only show bindings of this type
    #[clap(long = "type")]
    binding_type: Option<String>,

    /// Only show bindings from this provider (requires --type)
    #[clap(long, requires = "binding_type")]
    provider: Option<String>,

    /// Print entry contents instead of their paths
    #[clap(long)]
    show_values: bool,
}

impl CmdBindings {
    pub fn run(&mut self) -> Result<i32> {
        let resolver = match &self.root {
            Some(root) => BindingResolver::new(root),
            None => BindingResolver::from_env()?,
        };

        let mut bindings = match &self.binding_type {
            Some(binding_type) => resolver.resolve(binding_type, self.provider.as_deref())?,
            None => resolver.load_all()?,
        };

        if bindings.is_empty() {
            println!(
                "{} {}",
                "No bindings found in".dimmed(),
                resolver.root().display()
            );
            return Ok(1);
        }

        for (i, binding) in bindings.iter_mut().enumerate() {
            if i > 0 {
                println!();
            }
            self.show_binding(binding)?;
        }

        println!();
        println!("Total: {} binding(s)", bindings.len());
        Ok(0)
    }

    fn show_binding(&self, binding: &mut Binding) -> Result<()> {
        let provider = binding
            .provider
            .as_deref()
            .map(|p| format!(" ({p})"))
            .unwrap_or_default();
        println!(
            "{} [{}]{}",
            binding.name.bold(),
            binding.binding_type.cyan(),
            provider.yellow()
        );

        let mut rows = FormattedMap::new();
        for (name, entry) in binding.entries.iter_mut() {
            let value = if self.show_values {
                entry.read_string()?.trim_end().to_string()
            } else {
                entry
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            };
            rows.insert(name.as_str(), value);
        }

        for line in rows.to_string().lines() {
            println!("  {line}");
        }
        Ok(())
    }
}

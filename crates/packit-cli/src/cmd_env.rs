// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `packit env` command.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use miette::{IntoDiagnostic, Result};

/// Show the resolved variables of a layer env directory
#[derive(Debug, Args)]
pub struct CmdEnv {
    /// Environment directory (e.g. <layer>/env or <layer>/env.launch)
    #[clap(default_value = "env")]
    dir: PathBuf,

    /// Output format: table, yaml
    #[clap(long, default_value = "table")]
    format: String,
}

impl CmdEnv {
    pub fn run(&mut self) -> Result<i32> {
        let env = packit::Environment::load(&self.dir)?;
        let map = packit::FormattedMap::from_environment(&env);

        if self.format == "yaml" {
            let yaml = serde_yaml::to_string(&map).into_diagnostic()?;
            print!("{yaml}");
            return Ok(0);
        }

        println!("{}", format!("{}:", self.dir.display()).bold());
        if map.is_empty() {
            println!("  {}", "(no environment variables)".dimmed());
        } else {
            for line in map.to_string().lines() {
                println!("  {line}");
            }
        }

        Ok(0)
    }
}

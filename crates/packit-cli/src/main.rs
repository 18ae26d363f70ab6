// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! packit - inspect buildpack layer environments and service bindings

use clap::{Parser, Subcommand};
use miette::Result;

mod cmd_bindings;
mod cmd_env;

use cmd_bindings::CmdBindings;
use cmd_env::CmdEnv;

#[derive(Parser)]
#[clap(
    name = "packit",
    about = "Buildpack layer inspection",
    version,
    long_about = "Render layer environment directories and service bindings the way buildpacks log them"
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[clap(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show the resolved variables of a layer env directory
    Env(CmdEnv),

    /// List service bindings and their entries
    Bindings(CmdBindings),
}

impl Opt {
    fn run(self) -> Result<i32> {
        let log_level = match (self.logging.quiet, self.logging.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .init();

        match self.cmd {
            Command::Env(mut cmd) => cmd.run(),
            Command::Bindings(mut cmd) => cmd.run(),
        }
    }
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    let code = opt.run()?;
    std::process::exit(code);
}

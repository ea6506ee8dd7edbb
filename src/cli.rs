//! CLI argument parsing using clap derive macros

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{ndk::NdkCommand, run::RunCommand, status::StatusCommand};
use crate::utils::terminal;

/// install-android-tools - Android NDK and SDK component setup for CI
///
/// Installs the NDK version a project asks for, publishes its location to
/// later build steps, and makes sure the project's SDK components are present.
#[derive(Parser, Debug)]
#[command(name = "install-android-tools")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the whole step: NDK, licenses, project SDK components
    Run(RunCommand),

    /// Install the requested NDK or clear the NDK environment
    Ndk(NdkCommand),

    /// Show the current NDK location and revision
    Status(StatusCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        if self.no_color {
            terminal::disable_colors();
        }
        terminal::set_verbose(self.verbose);

        match self.command {
            Commands::Run(cmd) => cmd.execute(self.verbose),
            Commands::Ndk(cmd) => cmd.execute(self.verbose),
            Commands::Status(cmd) => cmd.execute(self.verbose),
        }
    }
}

//! install-android-tools - Android toolchain setup step for CI pipelines
//!
//! Reconciles the NDK version a project declares with what is installed on
//! the build host, then lets the project build fetch its SDK components.
//!
//! ## Architecture
//!
//! ```text
//! CLI → commands/ → reconcile (NDK decision) → android/ (sdkmanager, gradlew)
//!                                            → env/ (envman or dotenv export)
//! ```

mod android;
mod cli;
mod commands;
mod env;
mod error;
mod exec;
mod reconcile;
mod utils;
mod version;

use clap::Parser;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        utils::terminal::clear_line();
        error::report(&err);
        std::process::exit(1);
    }
}

//! Terminal output utilities
//!
//! The step log is the only user interface, so every phase reports through
//! these helpers rather than printing ad hoc.

use std::sync::atomic::{AtomicBool, Ordering};

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable or disable debug output
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

/// Whether debug output is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(title).blue().bold());
}

/// Print a plain progress line
pub fn print_step(message: &str) {
    println!("{}", message);
}

/// Print a debug line (only with --verbose)
pub fn print_debug(message: &str) {
    if is_verbose() {
        println!("{}", style(message).dim());
    }
}

/// Print a warning message to stderr
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", style("warning").yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), style(message).green());
}

/// Print a key/value line of the effective configuration
pub fn print_config_entry(key: &str, value: &str) {
    let value = if value.is_empty() { "<unset>" } else { value };
    println!("- {}: {}", style(key).bold(), value);
}

/// Create a spinner progress bar
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(spinner_style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Disable colored output on both streams
pub fn disable_colors() {
    console::set_colors_enabled(false);
    console::set_colors_enabled_stderr(false);
}

/// Clear the current line
pub fn clear_line() {
    let _ = Term::stderr().clear_line();
}

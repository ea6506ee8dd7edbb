//! Environment access for the step
//!
//! The process environment is how this step talks to the ones that follow
//! it. All reads and writes go through [`EnvironmentPort`] so the
//! reconciliation logic never touches process globals directly.

pub mod export;
pub mod publish;

#[cfg(test)]
pub mod memory;

use anyhow::{bail, Result};

pub use export::Exporter;

/// Explicit NDK location, also what this step publishes
pub const ANDROID_NDK_HOME: &str = "ANDROID_NDK_HOME";
/// Deprecated SDK location variable
pub const ANDROID_HOME: &str = "ANDROID_HOME";
/// Preferred SDK location variable
pub const ANDROID_SDK_ROOT: &str = "ANDROID_SDK_ROOT";
pub const HOME: &str = "HOME";
pub const PATH: &str = "PATH";

/// Read-one, write-one, export-one access to the step environment
pub trait EnvironmentPort {
    /// Current value of `key`; unset and non-unicode values read as empty
    fn get(&self, key: &str) -> String;

    /// Set `key` in the live process environment; an empty value unsets it
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Persist `key` for later pipeline steps
    fn export(&mut self, key: &str, value: &str) -> Result<()>;

    /// Persist several variables, in order
    fn export_all(&mut self, vars: &[(&str, &str)]) -> Result<()> {
        for (key, value) in vars {
            self.export(key, value)?;
        }
        Ok(())
    }
}

/// The real process environment plus a cross-step exporter
pub struct ProcessEnvironment {
    exporter: Option<Exporter>,
}

impl ProcessEnvironment {
    pub fn new(exporter: Exporter) -> Self {
        Self {
            exporter: Some(exporter),
        }
    }

    /// For inspection only; exporting fails
    pub fn read_only() -> Self {
        Self { exporter: None }
    }
}

impl EnvironmentPort for ProcessEnvironment {
    fn get(&self, key: &str) -> String {
        std::env::var(key).unwrap_or_default()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            std::env::remove_var(key);
        } else {
            std::env::set_var(key, value);
        }
        Ok(())
    }

    fn export(&mut self, key: &str, value: &str) -> Result<()> {
        match &self.exporter {
            Some(exporter) => exporter.export(key, value),
            None => bail!("cannot export {}: environment opened read-only", key),
        }
    }

    fn export_all(&mut self, vars: &[(&str, &str)]) -> Result<()> {
        match &self.exporter {
            Some(exporter) => exporter.export_all(vars),
            None => bail!("cannot export: environment opened read-only"),
        }
    }
}

//! Cross-step environment persistence
//!
//! On a Bitrise-style runner later steps read their environment from
//! `envman`; anywhere else a dotenv file (e.g. `$GITHUB_ENV`) plays the
//! same role.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::error::{hints, StepError};
use crate::exec::CommandSpec;
use crate::utils::terminal;
use crate::utils::tools;

/// Where exported variables are persisted
#[derive(Debug, Clone)]
pub enum Exporter {
    /// `envman add --key KEY`, value on stdin
    Envman(PathBuf),
    /// Append `KEY=VALUE` lines to a file
    DotEnv(PathBuf),
}

impl Exporter {
    /// Use the export file if one was given, otherwise require envman
    pub fn detect(export_file: Option<PathBuf>) -> Result<Self> {
        match export_file {
            Some(path) => Ok(Exporter::DotEnv(path)),
            None => {
                let envman = tools::require_tool(
                    "envman",
                    "exporting environment variables to later steps",
                    hints::envman(),
                )?;
                Ok(Exporter::Envman(envman))
            }
        }
    }

    /// Persist one variable
    pub fn export(&self, key: &str, value: &str) -> Result<()> {
        self.export_all(&[(key, value)])
    }

    /// Persist several variables together.
    ///
    /// A dotenv file receives all lines in one write, or none when a value
    /// cannot be represented. envman takes one call per variable.
    pub fn export_all(&self, vars: &[(&str, &str)]) -> Result<()> {
        match self {
            Exporter::Envman(envman) => {
                for (key, value) in vars {
                    let result = CommandSpec::new(envman)
                        .arg("add")
                        .arg("--key")
                        .arg(*key)
                        .stdin(*value)
                        .run()?;

                    if !result.success {
                        return Err(StepError::external_tool(
                            "envman",
                            format!("could not export {} (exit code {})", key, result.exit_code),
                            result.trimmed_output(),
                        )
                        .into());
                    }
                }
            }
            Exporter::DotEnv(path) => {
                let mut lines = String::new();
                for (key, value) in vars {
                    if value.contains('\n') {
                        return Err(StepError::config_error(format!(
                            "value of {} spans multiple lines and cannot be written to {}",
                            key,
                            path.display()
                        ))
                        .into());
                    }
                    lines.push_str(&format!("{}={}\n", key, value));
                }

                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                file.write_all(lines.as_bytes())
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }

        for (key, value) in vars {
            terminal::print_debug(&format!("exported {}={}", key, value));
        }
        Ok(())
    }
}

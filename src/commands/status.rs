//! Status command - Show which NDK the next reconciliation would see
//!
//! Usage:
//!   install-android-tools status
//!   install-android-tools status --format json

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::android::{installed_ndk_version, resolve_ndk_location};
use crate::env::{EnvironmentPort, ProcessEnvironment};

/// Output format for status command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Text format (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Show the current NDK location and installed revision
#[derive(Args, Debug)]
pub struct StatusCommand {
    /// Output format: text, json
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize, Debug)]
struct NdkStatus {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'static str>,
    exists: bool,
    version: Option<String>,
}

impl NdkStatus {
    fn collect<E: EnvironmentPort + ?Sized>(env: &E) -> Self {
        let location = resolve_ndk_location(env);
        Self {
            exists: location.path.exists(),
            version: installed_ndk_version(&location.path),
            path: location.path.display().to_string(),
            source: location.source,
        }
    }
}

impl StatusCommand {
    /// Execute the status command
    pub fn execute(self, _verbose: bool) -> Result<()> {
        let status = NdkStatus::collect(&ProcessEnvironment::read_only());

        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&status)
                    .context("Failed to serialize NDK status")?;
                println!("{}", json);
            }
            OutputFormat::Text => {
                let source = status
                    .source
                    .map(|key| format!("${}", key))
                    .unwrap_or_else(|| "default".to_string());
                println!("NDK home: {} (from {})", status.path, source);
                match (&status.version, status.exists) {
                    (Some(version), _) => println!("Installed: {}", version),
                    (None, true) => println!("Installed: unknown (no revision in source.properties)"),
                    (None, false) => println!("Installed: none"),
                }
            }
        }

        Ok(())
    }
}

//! Command implementations
//!
//! Each command module provides a clap-derived struct and execute method.
//! Step inputs can be given as flags or through the environment variables
//! a pipeline sets for the step.

pub mod ndk;
pub mod run;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::android::AndroidSdk;
use crate::env::{EnvironmentPort, Exporter, ProcessEnvironment, ANDROID_HOME, ANDROID_SDK_ROOT};
use crate::utils::terminal;

/// Where the Android SDK lives
#[derive(Args, Debug, Clone)]
pub struct SdkArgs {
    /// Android SDK directory (deprecated variable, used first when valid)
    #[arg(long, env = "ANDROID_HOME")]
    pub android_home: Option<String>,

    /// Android SDK directory
    #[arg(long, env = "ANDROID_SDK_ROOT")]
    pub android_sdk_root: Option<String>,
}

impl SdkArgs {
    /// Resolve the SDK handle
    pub fn resolve(&self) -> Result<AndroidSdk> {
        AndroidSdk::from_env(
            self.android_home.as_deref().unwrap_or_default(),
            self.android_sdk_root.as_deref().unwrap_or_default(),
        )
        .context("Failed to initialize Android SDK")
    }

    /// Make flag values visible to NDK location detection, which reads the
    /// environment only. Variables without a flag value are left alone.
    pub fn apply<E: EnvironmentPort + ?Sized>(&self, env: &mut E) -> Result<()> {
        for (key, value) in [
            (ANDROID_HOME, &self.android_home),
            (ANDROID_SDK_ROOT, &self.android_sdk_root),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                env.set(key, value)
                    .with_context(|| format!("Failed to set {}", key))?;
            }
        }
        Ok(())
    }

    pub fn print(&self) {
        terminal::print_config_entry("android_home", self.android_home.as_deref().unwrap_or_default());
        terminal::print_config_entry(
            "android_sdk_root",
            self.android_sdk_root.as_deref().unwrap_or_default(),
        );
    }
}

/// Where exported variables go
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Append exported variables to this dotenv file instead of using envman
    #[arg(long, env = "ENV_EXPORT_FILE")]
    pub export_file: Option<PathBuf>,
}

impl ExportArgs {
    /// The process environment wired to the configured exporter
    pub fn environment(&self) -> Result<ProcessEnvironment> {
        let exporter = Exporter::detect(self.export_file.clone())
            .context("Failed to set up environment export")?;
        Ok(ProcessEnvironment::new(exporter))
    }

    pub fn print(&self) {
        let target = self
            .export_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "envman".to_string());
        terminal::print_config_entry("export", &target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::android::ndk::current_ndk_home;
    use crate::env::memory::MemoryEnvironment;
    use crate::env::HOME;

    #[test]
    fn test_sdk_flags_reach_ndk_detection() {
        let args = SdkArgs {
            android_home: Some("/opt/sdk".to_string()),
            android_sdk_root: None,
        };
        let mut env = MemoryEnvironment::new()
            .with(HOME, "/home/ci")
            .with(ANDROID_SDK_ROOT, "/opt/root");

        args.apply(&mut env).unwrap();

        assert_eq!(env.get(ANDROID_HOME), "/opt/sdk");
        assert_eq!(env.get(ANDROID_SDK_ROOT), "/opt/root");
        assert_eq!(
            current_ndk_home(&env),
            std::path::Path::new("/opt/sdk").join("ndk-bundle")
        );
        assert!(env.exported.is_empty());
    }

    #[test]
    fn test_empty_sdk_flags_keep_environment() {
        let args = SdkArgs {
            android_home: Some(String::new()),
            android_sdk_root: None,
        };
        let mut env = MemoryEnvironment::new().with(ANDROID_HOME, "/opt/sdk");

        args.apply(&mut env).unwrap();

        assert_eq!(env.get(ANDROID_HOME), "/opt/sdk");
    }
}
